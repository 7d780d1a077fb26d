// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use tracing::{error, warn};

use callsheet::{
    BoardMetadata, Command, DecisionPrompt, RescheduleIntent, RescheduleResolution, ScheduleState,
    apply, apply_bootstrap, plan_reschedule, plan_staff_move, resolve_reschedule,
};
use callsheet_audit::{Action, AuditEvent, Cause, StateSnapshot};
use callsheet_domain::{
    Department, LinkPhase, LinkRef, LogisticsRequest, Production, ProductionDay,
    ReferenceRange, ReinforcementDetail, RequestKind, RoundTripMode, ScheduleLink, Sequence,
    derive_phase_days, derive_round_trip, format_date, parse_date, resolve_reference,
    validate_duration, validate_staff_name, week_info,
};
use callsheet_persistence::Persistence;

use crate::auth::{AuthenticatedActor, require_production};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::ids::{generate_group_id, generate_staff_id};
use crate::request_response::{
    ApproveStaffRequest, ApproveStaffResponse, CreateDepartmentRequest, CreateDepartmentResponse,
    CreateProductionRequest, CreateProductionResponse, CreateReinforcementsRequest,
    CreateReinforcementsResponse, CreateRoundTripRequest, CreateRoundTripResponse,
    CreatedStaffInfo, DeleteRequestRequest, DeleteRequestResponse, DeleteStaffRequest,
    ListLogisticsResponse, ListReinforcementsResponse, LogisticsInfo, MoveStaffRequest,
    MoveStaffResponse, ReferenceSelection, ReinforcementInfo, RescheduleRequest,
    RescheduleResponse, RoundTripPreviewRequest, RoundTripPreviewResponse, SetShootingStartRequest,
    SetShootingStartResponse, StaffInfo, UpdateRequestRequest, UpdateRequestResponse,
    UpdateStaffRequest, UpsertProductionDayRequest, UpsertSequenceRequest, WeekInfoResponse,
};

/// Loads the production id, board metadata, and scoped schedule state for a
/// production name.
fn load_context(
    persistence: &mut Persistence,
    production: &str,
) -> Result<(i64, BoardMetadata, ScheduleState), ApiError> {
    let production_id = persistence
        .get_production_id(production)
        .map_err(translate_persistence_error)?;
    let metadata = persistence
        .load_board_metadata()
        .map_err(translate_persistence_error)?;
    let state = persistence
        .load_schedule_state(production)
        .map_err(translate_persistence_error)?;
    Ok((production_id, metadata, state))
}

/// Persists an audit event, logging instead of failing the operation when
/// the log write itself fails.
fn record_audit_event(
    persistence: &mut Persistence,
    production_id: Option<i64>,
    production: &str,
    event: &AuditEvent,
) {
    if let Err(e) = persistence.persist_audit_event(production_id, production, event) {
        error!(production, error = %e, "Failed to persist audit event");
    }
}

/// Resolves a reference selection into an optional link and a date range.
///
/// Selections are checked in order: sequence, location, explicit date. A
/// sequence or location that cannot be resolved blocks the operation — the
/// caller gets a validation rejection, nothing is written.
fn resolve_selection(
    persistence: &mut Persistence,
    production_id: i64,
    selection: &ReferenceSelection,
) -> Result<(Option<LinkRef>, ReferenceRange), ApiError> {
    if let Some(sequence_id) = &selection.sequence_id {
        let sequences = persistence
            .list_sequences(production_id)
            .map_err(translate_persistence_error)?;
        let reference = LinkRef::Sequence(sequence_id.clone());
        let range = resolve_reference(&reference, &[], &sequences).ok_or_else(|| {
            ApiError::InvalidInput {
                field: String::from("reference"),
                message: format!("Sequence '{sequence_id}' has no usable date"),
            }
        })?;
        return Ok((Some(reference), range));
    }

    if let Some(location_id) = &selection.location_id {
        let days = persistence
            .list_production_days(production_id)
            .map_err(translate_persistence_error)?;
        let reference = LinkRef::Location(location_id.clone());
        let range = resolve_reference(&reference, &days, &[]).ok_or_else(|| {
            ApiError::InvalidInput {
                field: String::from("reference"),
                message: format!("No production day shoots at location '{location_id}'"),
            }
        })?;
        return Ok((Some(reference), range));
    }

    if let Some(raw_date) = &selection.date {
        let date = parse_date(raw_date).map_err(translate_domain_error)?;
        return Ok((None, ReferenceRange::single_day(date)));
    }

    Err(ApiError::InvalidInput {
        field: String::from("reference"),
        message: String::from("A sequence, a location, or an explicit date is required"),
    })
}

// ============================================================================
// Bootstrap operations
// ============================================================================

/// Creates a new production.
///
/// # Errors
///
/// Returns an error if the actor lacks production authority, the name is
/// invalid, or the production already exists.
pub fn create_production(
    persistence: &mut Persistence,
    request: &CreateProductionRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateProductionResponse, ApiError> {
    require_production(actor, "create_production")?;

    let metadata = persistence
        .load_board_metadata()
        .map_err(translate_persistence_error)?;

    let result = apply_bootstrap(
        &metadata,
        Command::CreateProduction {
            name: request.name.clone(),
        },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let production_id = persistence
        .create_production(&request.name)
        .map_err(translate_persistence_error)?;
    record_audit_event(persistence, None, &request.name, &result.audit_event);

    Ok(CreateProductionResponse {
        production_id,
        name: request.name.clone(),
    })
}

/// Sets or clears a production's shooting start date.
///
/// # Errors
///
/// Returns an error if the actor lacks production authority or the
/// production does not exist.
pub fn set_shooting_start(
    persistence: &mut Persistence,
    request: &SetShootingStartRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<SetShootingStartResponse, ApiError> {
    require_production(actor, "set_shooting_start")?;

    let metadata = persistence
        .load_board_metadata()
        .map_err(translate_persistence_error)?;
    let date = request
        .shooting_start_date
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(translate_domain_error)?;

    let result = apply_bootstrap(
        &metadata,
        Command::SetShootingStart {
            production: Production::new(&request.production),
            date,
        },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let production_id = persistence
        .get_production_id(&request.production)
        .map_err(translate_persistence_error)?;
    persistence
        .set_shooting_start(production_id, date)
        .map_err(translate_persistence_error)?;
    record_audit_event(
        persistence,
        Some(production_id),
        &request.production,
        &result.audit_event,
    );

    Ok(SetShootingStartResponse {
        production: request.production.clone(),
        shooting_start_date: date.map(format_date),
    })
}

/// Creates a new department within a production.
///
/// # Errors
///
/// Returns an error if the actor lacks production authority, the
/// production does not exist, or the department already exists.
pub fn create_department(
    persistence: &mut Persistence,
    request: &CreateDepartmentRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateDepartmentResponse, ApiError> {
    require_production(actor, "create_department")?;

    let metadata = persistence
        .load_board_metadata()
        .map_err(translate_persistence_error)?;

    let result = apply_bootstrap(
        &metadata,
        Command::CreateDepartment {
            production: Production::new(&request.production),
            name: request.name.clone(),
        },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let production_id = persistence
        .get_production_id(&request.production)
        .map_err(translate_persistence_error)?;
    let department = Department::new(&request.name);
    let department_id = persistence
        .create_department(production_id, department.name())
        .map_err(translate_persistence_error)?;
    record_audit_event(
        persistence,
        Some(production_id),
        &request.production,
        &result.audit_event,
    );

    Ok(CreateDepartmentResponse {
        department_id,
        name: department.name().to_string(),
    })
}

/// Upserts one production day in the day table.
///
/// # Errors
///
/// Returns an error if the actor lacks production authority or a field is
/// invalid.
pub fn upsert_production_day(
    persistence: &mut Persistence,
    request: &UpsertProductionDayRequest,
    actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    require_production(actor, "upsert_production_day")?;

    let production_id = persistence
        .get_production_id(&request.production)
        .map_err(translate_persistence_error)?;
    let day = ProductionDay {
        date: parse_date(&request.date).map_err(translate_domain_error)?,
        location: request.location.clone(),
        linked_location: request.linked_location.clone(),
    };

    persistence
        .upsert_production_day(production_id, &day)
        .map_err(translate_persistence_error)
}

/// Upserts one sequence in the sequence table.
///
/// # Errors
///
/// Returns an error if the actor lacks production authority or a field is
/// invalid.
pub fn upsert_sequence(
    persistence: &mut Persistence,
    request: &UpsertSequenceRequest,
    actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    require_production(actor, "upsert_sequence")?;

    let production_id = persistence
        .get_production_id(&request.production)
        .map_err(translate_persistence_error)?;
    let sequence = Sequence {
        sequence_id: request.sequence_id.clone(),
        date: parse_date(&request.date).map_err(translate_domain_error)?,
        decor: request.decor.clone(),
    };

    persistence
        .upsert_sequence(production_id, &sequence)
        .map_err(translate_persistence_error)
}

// ============================================================================
// Transport operations
// ============================================================================

/// Previews the derived dates of a transport round trip.
///
/// This backs the creation form's auto-fill: selecting a reference (or
/// changing the selection) re-derives all three dates.
///
/// # Errors
///
/// Returns an error if the reference cannot be resolved.
pub fn preview_round_trip(
    persistence: &mut Persistence,
    request: &RoundTripPreviewRequest,
) -> Result<RoundTripPreviewResponse, ApiError> {
    let production_id = persistence
        .get_production_id(&request.production)
        .map_err(translate_persistence_error)?;
    let (_, range) = resolve_selection(persistence, production_id, &request.reference)?;

    let mode = if request.full_duration && range.is_multi_day() {
        RoundTripMode::FullDuration
    } else {
        RoundTripMode::FirstDayOnly
    };
    let legs = derive_round_trip(&range, mode);

    Ok(RoundTripPreviewResponse {
        pickup_date: legs
            .first()
            .map(|l| format_date(l.date))
            .unwrap_or_default(),
        usage_date: legs.get(1).map(|l| format_date(l.date)).unwrap_or_default(),
        dropoff_date: legs.get(2).map(|l| format_date(l.date)).unwrap_or_default(),
        multi_day: range.is_multi_day(),
    })
}

/// Builds the phase-specific description for one leg of a round trip.
///
/// The base description is copied verbatim; only the leg suffix differs.
fn leg_description(base: Option<&str>, kind: RequestKind) -> Option<String> {
    let suffix = match kind {
        RequestKind::Pickup | RequestKind::PickupSet => " (pickup)",
        RequestKind::Dropoff | RequestKind::DropoffSet => " (return)",
        RequestKind::RoundTrip | RequestKind::Usage => "",
    };
    match base {
        Some(base) if !suffix.is_empty() => Some(format!("{base}{suffix}")),
        Some(base) => Some(base.to_string()),
        None => None,
    }
}

/// Creates the 3-leg transport round trip for a reference.
///
/// Every leg shares the group id and the descriptive fields; only date,
/// kind, and the description suffix differ. The legs land in one
/// transaction.
///
/// # Errors
///
/// Returns an error if the reference cannot be resolved, a derived leg
/// violates a domain rule, or the write fails.
pub fn create_round_trip(
    persistence: &mut Persistence,
    request: &CreateRoundTripRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateRoundTripResponse, ApiError> {
    let (production_id, metadata, state) = load_context(persistence, &request.production)?;
    let (reference, range) = resolve_selection(persistence, production_id, &request.reference)?;

    let mode = if request.full_duration && range.is_multi_day() {
        RoundTripMode::FullDuration
    } else {
        RoundTripMode::FirstDayOnly
    };
    let derived = derive_round_trip(&range, mode);

    let span_days = (range.last_date - range.first_date).whole_days() + 1;
    let duration = u32::try_from(span_days).unwrap_or(1).max(1);
    let group_id = generate_group_id();
    let department = Department::new(&request.department);

    let legs: Vec<LogisticsRequest> = derived
        .iter()
        .map(|leg| {
            let mut entry = LogisticsRequest::new(leg.kind, leg.date, department.clone());
            entry.group_id = Some(group_id.clone());
            entry.time_note = request.time_note.clone();
            entry.location = request.location.clone();
            entry.description = leg_description(request.description.as_deref(), leg.kind);
            entry.vehicle_type = request.vehicle_type.clone();
            if let Some(reference) = &reference {
                if let Ok(link) = ScheduleLink::new(
                    reference.clone(),
                    LinkPhase::Shooting,
                    leg.day_offset,
                    duration,
                ) {
                    entry = entry.with_link(link);
                }
            }
            entry
        })
        .collect();

    // Validate the group against the current state before touching the store
    let transition = apply(
        &metadata,
        &state,
        Command::AddLogisticsGroup { legs: legs.clone() },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let request_ids = persistence
        .insert_logistics_group(production_id, &legs)
        .map_err(translate_persistence_error)?;
    record_audit_event(
        persistence,
        Some(production_id),
        &request.production,
        &transition.audit_event,
    );

    Ok(CreateRoundTripResponse {
        request_ids,
        group_id: group_id.value().to_string(),
        pickup_date: derived
            .first()
            .map(|l| format_date(l.date))
            .unwrap_or_default(),
        usage_date: derived
            .get(1)
            .map(|l| format_date(l.date))
            .unwrap_or_default(),
        dropoff_date: derived
            .get(2)
            .map(|l| format_date(l.date))
            .unwrap_or_default(),
    })
}

/// Edits the descriptive fields (and optionally the date) of a request.
///
/// # Errors
///
/// Returns an error if the request does not exist or the edit violates a
/// domain rule.
pub fn update_request(
    persistence: &mut Persistence,
    request: &UpdateRequestRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<UpdateRequestResponse, ApiError> {
    let (production_id, metadata, state) = load_context(persistence, &request.production)?;

    let mut edited = persistence
        .get_logistics_request(request.request_id)
        .map_err(translate_persistence_error)?;
    if let Some(raw_date) = &request.date {
        edited.date = parse_date(raw_date).map_err(translate_domain_error)?;
    }
    edited.time_note = request.time_note.clone();
    edited.location = request.location.clone();
    edited.description = request.description.clone();
    edited.vehicle_type = request.vehicle_type.clone();

    let transition = apply(
        &metadata,
        &state,
        Command::UpdateLogisticsRequest {
            request: edited.clone(),
        },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    persistence
        .update_logistics_request(&edited)
        .map_err(translate_persistence_error)?;
    record_audit_event(
        persistence,
        Some(production_id),
        &request.production,
        &transition.audit_event,
    );

    Ok(UpdateRequestResponse {
        request_id: request.request_id,
    })
}

/// Deletes a logistics request.
///
/// # Errors
///
/// Returns an error if the request does not exist or the delete fails.
pub fn delete_request(
    persistence: &mut Persistence,
    request: &DeleteRequestRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<DeleteRequestResponse, ApiError> {
    let (production_id, metadata, state) = load_context(persistence, &request.production)?;

    let transition = apply(
        &metadata,
        &state,
        Command::DeleteLogisticsRequest {
            request_id: request.request_id,
        },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    persistence
        .delete_logistics_request(request.request_id)
        .map_err(translate_persistence_error)?;
    record_audit_event(
        persistence,
        Some(production_id),
        &request.production,
        &transition.audit_event,
    );

    Ok(DeleteRequestResponse {
        request_id: request.request_id,
    })
}

/// Maps a confirmation to its stable protocol slug.
fn confirmation_slug(confirmation: &callsheet::ConfirmationKind) -> String {
    match confirmation {
        callsheet::ConfirmationKind::DetachFromReference => String::from("detach_from_reference"),
        callsheet::ConfirmationKind::CascadeSiblings { .. } => String::from("cascade_siblings"),
    }
}

/// Reschedules an entry by drag, driving the confirmation workflow.
///
/// Confirmations arrive pre-answered in the request (the two-phase
/// protocol): when one is missing, the response names it and nothing is
/// written. Cascade writes are best-effort — a failing sibling is logged
/// and skipped, already-written siblings stay moved.
///
/// # Errors
///
/// Returns an error if the target is a Sunday, the entry does not exist,
/// or the dragged entry's own write fails.
pub fn reschedule_by_drag(
    persistence: &mut Persistence,
    request: &RescheduleRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<RescheduleResponse, ApiError> {
    let (production_id, _metadata, state) = load_context(persistence, &request.production)?;
    let target_date = parse_date(&request.target_date).map_err(translate_domain_error)?;

    let intent = RescheduleIntent {
        request_id: request.request_id,
        target_date,
    };
    let plan = plan_reschedule(&state, &intent).map_err(translate_core_error)?;

    let mut prompt = DecisionPrompt::new(request.detach_confirmed, request.cascade_confirmed);
    let resolution =
        resolve_reschedule(&state, &plan, &mut prompt).map_err(translate_core_error)?;

    match resolution {
        RescheduleResolution::Aborted => Ok(RescheduleResponse {
            moved: false,
            cascaded: Vec::new(),
            unlinked: false,
            confirmation_required: None,
            message: Some(String::from(
                "Move cancelled: the entry stays linked to its reference",
            )),
        }),
        RescheduleResolution::AwaitingDecision(confirmation) => Ok(RescheduleResponse {
            moved: false,
            cascaded: Vec::new(),
            unlinked: false,
            confirmation_required: Some(confirmation_slug(&confirmation)),
            message: Some(confirmation.message()),
        }),
        RescheduleResolution::Apply {
            moves,
            unlinked,
            cascaded,
        } => {
            // Siblings first, dragged entry last; each write stands alone
            let mut applied_cascade: Vec<i64> = Vec::new();
            for entry_move in moves
                .iter()
                .filter(|m| cascaded.contains(&m.request_id))
            {
                match persistence.apply_request_move(
                    entry_move.request_id,
                    entry_move.new_date,
                    entry_move.clear_link,
                ) {
                    Ok(()) => applied_cascade.push(entry_move.request_id),
                    Err(e) => {
                        warn!(
                            request_id = entry_move.request_id,
                            error = %e,
                            "Cascade write failed; sibling left in place"
                        );
                    }
                }
            }

            let dragged = moves
                .iter()
                .find(|m| m.request_id == request.request_id)
                .ok_or_else(|| ApiError::Internal {
                    message: String::from("Resolved move set is missing the dragged entry"),
                })?;
            persistence
                .apply_request_move(dragged.request_id, dragged.new_date, dragged.clear_link)
                .map_err(translate_persistence_error)?;

            let after = persistence
                .load_schedule_state(&request.production)
                .map(|s| s.to_snapshot())
                .unwrap_or_else(|_| StateSnapshot::new(String::from("unavailable")));
            let event = AuditEvent::new(
                actor.to_audit_actor(),
                cause,
                Action::new(
                    String::from("RescheduleByDrag"),
                    Some(format!(
                        "Moved request {} to {} ({} sibling(s) cascaded{})",
                        request.request_id,
                        format_date(target_date),
                        applied_cascade.len(),
                        if unlinked { ", detached" } else { "" }
                    )),
                ),
                state.to_snapshot(),
                after,
            );
            record_audit_event(persistence, Some(production_id), &request.production, &event);

            Ok(RescheduleResponse {
                moved: true,
                cascaded: applied_cascade,
                unlinked,
                confirmation_required: None,
                message: None,
            })
        }
    }
}

// ============================================================================
// Reinforcement operations
// ============================================================================

/// Creates reinforcement staff entries for the selected phases.
///
/// Every person gets one entry on every derived day of every selected
/// phase. Entries submitted by a production-office actor are born
/// approved; everything else starts pending.
///
/// # Errors
///
/// Returns an error if the reference cannot be resolved, a phase or
/// duration is invalid, a name is blank, or a write fails.
pub fn create_reinforcements(
    persistence: &mut Persistence,
    request: &CreateReinforcementsRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateReinforcementsResponse, ApiError> {
    let production_id = persistence
        .get_production_id(&request.production)
        .map_err(translate_persistence_error)?;
    let (reference, range) = resolve_selection(persistence, production_id, &request.reference)?;

    if request.phases.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("phases"),
            message: String::from("At least one phase is required"),
        });
    }
    for person in &request.people {
        validate_staff_name(&person.name).map_err(translate_domain_error)?;
    }

    let context = actor.acting_context();
    let department = Department::new(&request.department);
    let mut created: Vec<CreatedStaffInfo> = Vec::new();

    for selection in &request.phases {
        let phase: LinkPhase = selection
            .phase
            .parse()
            .map_err(translate_domain_error)?;
        validate_duration(selection.duration).map_err(translate_domain_error)?;

        for (date, day_offset) in derive_phase_days(phase, &range, selection.duration) {
            for person in &request.people {
                let mut detail = ReinforcementDetail::new(
                    generate_staff_id(),
                    person.name.clone(),
                    context.initial_validation_status(),
                );
                detail.phone = person.phone.clone();
                detail.email = person.email.clone();
                detail.role = person.role.clone();
                if let Some(reference) = &reference {
                    detail.link = ScheduleLink::new(
                        reference.clone(),
                        phase,
                        day_offset,
                        selection.duration,
                    )
                    .ok();
                }

                persistence
                    .add_staff(production_id, date, &department, &detail)
                    .map_err(translate_persistence_error)?;

                created.push(CreatedStaffInfo {
                    staff_id: detail.staff_id,
                    name: person.name.clone(),
                    date: format_date(date),
                    phase: phase.as_str().to_string(),
                    validation_status: context.initial_validation_status().as_str().to_string(),
                });
            }
        }
    }

    let event = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        Action::new(
            String::from("CreateReinforcements"),
            Some(format!(
                "Added {} staff entr(ies) for department '{}'",
                created.len(),
                department.name()
            )),
        ),
        StateSnapshot::new(format!("production={}", request.production)),
        StateSnapshot::new(format!("created={}", created.len())),
    );
    record_audit_event(persistence, Some(production_id), &request.production, &event);

    Ok(CreateReinforcementsResponse { created })
}

/// Moves a staff entry to another date.
///
/// The entry is added to the target record BEFORE it is removed from the
/// source record: a failure between the two steps duplicates the person
/// rather than losing them.
///
/// # Errors
///
/// Returns an error if the entry does not exist or a write fails.
pub fn move_staff(
    persistence: &mut Persistence,
    request: &MoveStaffRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<MoveStaffResponse, ApiError> {
    let (production_id, _metadata, state) = load_context(persistence, &request.production)?;
    let source_date = parse_date(&request.source_date).map_err(translate_domain_error)?;
    let target_date = parse_date(&request.target_date).map_err(translate_domain_error)?;
    let department = Department::new(&request.department);

    let staff_move = plan_staff_move(
        &state,
        source_date,
        &department,
        &request.staff_id,
        target_date,
    )
    .map_err(translate_core_error)?;

    let Command::AddReinforcementStaff { detail, .. } = &staff_move.add else {
        return Err(ApiError::Internal {
            message: String::from("Staff move planned an unexpected add command"),
        });
    };

    persistence
        .add_staff(production_id, target_date, &department, detail)
        .map_err(translate_persistence_error)?;

    if let Err(e) = persistence.remove_staff(
        production_id,
        source_date,
        &department,
        &request.staff_id,
    ) {
        // The add already landed: the person is duplicated, not lost
        error!(
            staff_id = request.staff_id.as_str(),
            error = %e,
            "Staff move remove-step failed after a successful add"
        );
        return Err(translate_persistence_error(e));
    }

    let event = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        Action::new(
            String::from("MoveStaff"),
            Some(format!(
                "Moved staff '{}' from {} to {}",
                request.staff_id,
                format_date(source_date),
                format_date(target_date)
            )),
        ),
        state.to_snapshot(),
        StateSnapshot::new(format!("staff={} date={}", request.staff_id, target_date)),
    );
    record_audit_event(persistence, Some(production_id), &request.production, &event);

    Ok(MoveStaffResponse {
        staff_id: request.staff_id.clone(),
        date: format_date(target_date),
    })
}

/// Approves a pending staff entry.
///
/// Approving an already-approved entry is a no-op, not an error. Only the
/// addressed entry changes; siblings in the same record are untouched.
///
/// # Errors
///
/// Returns an error if the actor lacks production authority or the entry
/// does not exist.
pub fn approve_staff(
    persistence: &mut Persistence,
    request: &ApproveStaffRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApproveStaffResponse, ApiError> {
    require_production(actor, "approve_staff")?;

    let (production_id, metadata, state) = load_context(persistence, &request.production)?;
    let date = parse_date(&request.date).map_err(translate_domain_error)?;
    let department = Department::new(&request.department);

    let previously_approved = state
        .find_reinforcement(date, &department)
        .and_then(|record| record.find_staff(&request.staff_id))
        .is_some_and(|detail| detail.validation_status.is_approved());

    let transition = apply(
        &metadata,
        &state,
        Command::ApproveStaff {
            date,
            department,
            staff_id: request.staff_id.clone(),
        },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    if !previously_approved {
        persistence
            .set_staff_validation(
                &request.staff_id,
                callsheet_domain::ValidationStatus::Approved,
            )
            .map_err(translate_persistence_error)?;
    }
    record_audit_event(
        persistence,
        Some(production_id),
        &request.production,
        &transition.audit_event,
    );

    Ok(ApproveStaffResponse {
        staff_id: request.staff_id.clone(),
        validation_status: String::from("APPROVED"),
    })
}

/// Edits a staff entry's descriptive fields, preserving its link and
/// approval status.
///
/// # Errors
///
/// Returns an error if the entry does not exist or the name is blank.
pub fn update_staff(
    persistence: &mut Persistence,
    request: &UpdateStaffRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<(), ApiError> {
    validate_staff_name(&request.name).map_err(translate_domain_error)?;

    let (production_id, _metadata, state) = load_context(persistence, &request.production)?;
    let (_, existing) = state
        .find_staff(&request.staff_id)
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("ReinforcementStaff"),
            message: format!("Staff entry '{}' does not exist", request.staff_id),
        })?;

    let mut edited = existing.clone();
    edited.name = request.name.clone();
    edited.phone = request.phone.clone();
    edited.email = request.email.clone();
    edited.role = request.role.clone();

    persistence
        .update_staff(&edited)
        .map_err(translate_persistence_error)?;

    let event = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        Action::new(
            String::from("UpdateStaff"),
            Some(format!("Updated staff '{}'", request.staff_id)),
        ),
        state.to_snapshot(),
        StateSnapshot::new(format!("staff={}", request.staff_id)),
    );
    record_audit_event(persistence, Some(production_id), &request.production, &event);

    Ok(())
}

/// Deletes a staff entry, deleting its record when it empties.
///
/// # Errors
///
/// Returns an error if the record or the entry does not exist.
pub fn delete_staff(
    persistence: &mut Persistence,
    request: &DeleteStaffRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<(), ApiError> {
    let (production_id, metadata, state) = load_context(persistence, &request.production)?;
    let date = parse_date(&request.date).map_err(translate_domain_error)?;
    let department = Department::new(&request.department);

    let transition = apply(
        &metadata,
        &state,
        Command::RemoveReinforcementStaff {
            date,
            department: department.clone(),
            staff_id: request.staff_id.clone(),
        },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    persistence
        .remove_staff(production_id, date, &department, &request.staff_id)
        .map_err(translate_persistence_error)?;
    record_audit_event(
        persistence,
        Some(production_id),
        &request.production,
        &transition.audit_event,
    );

    Ok(())
}

// ============================================================================
// Read-only operations
// ============================================================================

/// Lists every logistics request of a production.
///
/// # Errors
///
/// Returns an error if the production does not exist.
pub fn list_logistics(
    persistence: &mut Persistence,
    production: &str,
) -> Result<ListLogisticsResponse, ApiError> {
    let production_id = persistence
        .get_production_id(production)
        .map_err(translate_persistence_error)?;
    let requests = persistence
        .list_logistics(production_id)
        .map_err(translate_persistence_error)?;

    Ok(ListLogisticsResponse {
        production: production.to_string(),
        requests: requests.iter().map(logistics_info).collect(),
    })
}

/// Flattens a logistics request into its listing shape.
fn logistics_info(request: &LogisticsRequest) -> LogisticsInfo {
    let link = request.link.as_ref();
    LogisticsInfo {
        request_id: request.request_id.unwrap_or_default(),
        group_id: request.group_id.as_ref().map(|g| g.value().to_string()),
        kind: request.kind.as_str().to_string(),
        date: format_date(request.date),
        department: request.department.name().to_string(),
        time_note: request.time_note.clone(),
        location: request.location.clone(),
        description: request.description.clone(),
        vehicle_type: request.vehicle_type.clone(),
        linked_sequence_id: link
            .and_then(|l| l.reference.sequence_id())
            .map(ToString::to_string),
        linked_location: link
            .and_then(|l| l.reference.location_id())
            .map(ToString::to_string),
        link_phase: link.map(|l| l.phase.as_str().to_string()),
        day_offset: link.map(|l| l.day_offset),
        duration: link.map(|l| l.duration),
        auto_update_dates: request.auto_update_dates,
        status: request.status.as_str().to_string(),
    }
}

/// Lists every reinforcement record of a production.
///
/// # Errors
///
/// Returns an error if the production does not exist.
pub fn list_reinforcements(
    persistence: &mut Persistence,
    production: &str,
) -> Result<ListReinforcementsResponse, ApiError> {
    let production_id = persistence
        .get_production_id(production)
        .map_err(translate_persistence_error)?;
    let records = persistence
        .list_reinforcements(production_id)
        .map_err(translate_persistence_error)?;

    Ok(ListReinforcementsResponse {
        production: production.to_string(),
        records: records
            .iter()
            .map(|record| ReinforcementInfo {
                date: format_date(record.date),
                department: record.department.name().to_string(),
                staff: record
                    .staff
                    .iter()
                    .map(|detail| StaffInfo {
                        staff_id: detail.staff_id.clone(),
                        name: detail.name.clone(),
                        phone: detail.phone.clone(),
                        email: detail.email.clone(),
                        role: detail.role.clone(),
                        validation_status: detail.validation_status.as_str().to_string(),
                    })
                    .collect(),
            })
            .collect(),
    })
}

/// Resolves the production week of a date, for dashboard labels.
///
/// # Errors
///
/// Returns an error if the production does not exist or the date is
/// invalid.
pub fn get_week_info(
    persistence: &mut Persistence,
    production: &str,
    raw_date: &str,
) -> Result<WeekInfoResponse, ApiError> {
    let loaded = persistence
        .get_production(production)
        .map_err(translate_persistence_error)?;
    let date = parse_date(raw_date).map_err(translate_domain_error)?;

    let info = week_info(date, loaded.shooting_start_date());

    Ok(WeekInfoResponse {
        week: info.week,
        label: info.label,
        week_start: format_date(info.week_start),
    })
}
