// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{BoardMetadata, BootstrapResult, ScheduleState, TransitionResult};
use callsheet_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use callsheet_domain::{
    Department, DomainError, Production, format_date, validate_department_name,
    validate_production_name, validate_round_trip_group, validate_staff_name,
    validate_transport_leg_date,
};

/// Applies a bootstrap command to the metadata, producing new metadata and
/// an audit event.
///
/// Bootstrap commands (`CreateProduction`, `CreateDepartment`,
/// `SetShootingStart`) operate on global metadata.
///
/// # Arguments
///
/// * `metadata` - The current board metadata (immutable)
/// * `command` - The bootstrap command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(BootstrapResult)` containing the new metadata and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if the command violates domain rules.
pub fn apply_bootstrap(
    metadata: &BoardMetadata,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<BootstrapResult, CoreError> {
    match command {
        Command::CreateProduction { name } => {
            validate_production_name(&name)?;

            let production: Production = Production::new(&name);

            if metadata.has_production(&production) {
                return Err(CoreError::DomainViolation(
                    DomainError::DuplicateProduction(name),
                ));
            }

            let mut new_metadata: BoardMetadata = metadata.clone();
            new_metadata.add_production(production);

            let before: StateSnapshot = StateSnapshot::new(format!(
                "productions_count={}",
                metadata.productions.len()
            ));
            let after: StateSnapshot = StateSnapshot::new(format!(
                "productions_count={}",
                new_metadata.productions.len()
            ));

            let action: Action = Action::new(
                String::from("CreateProduction"),
                Some(format!("Created production '{name}'")),
            );

            Ok(BootstrapResult {
                new_metadata,
                audit_event: AuditEvent::new(actor, cause, action, before, after),
            })
        }
        Command::CreateDepartment { production, name } => {
            if !metadata.has_production(&production) {
                return Err(CoreError::DomainViolation(DomainError::ProductionNotFound(
                    production.name().to_string(),
                )));
            }

            validate_department_name(&name)?;

            let department: Department = Department::new(&name);

            if metadata.has_department(&production, &department) {
                return Err(CoreError::DomainViolation(
                    DomainError::DuplicateDepartment {
                        production: production.name().to_string(),
                        department: department.name().to_string(),
                    },
                ));
            }

            let mut new_metadata: BoardMetadata = metadata.clone();
            new_metadata.add_department(production.clone(), department.clone());

            let before: StateSnapshot = StateSnapshot::new(format!(
                "departments_count={}",
                metadata.departments.len()
            ));
            let after: StateSnapshot = StateSnapshot::new(format!(
                "departments_count={}",
                new_metadata.departments.len()
            ));

            let action: Action = Action::new(
                String::from("CreateDepartment"),
                Some(format!(
                    "Created department '{}' in production '{}'",
                    department.name(),
                    production.name()
                )),
            );

            Ok(BootstrapResult {
                new_metadata,
                audit_event: AuditEvent::new(actor, cause, action, before, after),
            })
        }
        Command::SetShootingStart { production, date } => {
            if !metadata.has_production(&production) {
                return Err(CoreError::DomainViolation(DomainError::ProductionNotFound(
                    production.name().to_string(),
                )));
            }

            let mut new_metadata: BoardMetadata = metadata.clone();
            for existing in &mut new_metadata.productions {
                if *existing == production {
                    existing.set_shooting_start_date(date);
                }
            }

            let detail = date.map_or_else(
                || format!("Cleared shooting start of '{}'", production.name()),
                |d| {
                    format!(
                        "Set shooting start of '{}' to {}",
                        production.name(),
                        format_date(d)
                    )
                },
            );

            let snapshot = StateSnapshot::new(format!("production={}", production.name()));

            Ok(BootstrapResult {
                new_metadata,
                audit_event: AuditEvent::new(
                    actor,
                    cause,
                    Action::new(String::from("SetShootingStart"), Some(detail)),
                    snapshot.clone(),
                    snapshot,
                ),
            })
        }
        _ => {
            // Non-bootstrap commands should use apply() instead
            unreachable!("apply_bootstrap called with non-bootstrap command")
        }
    }
}

/// Applies a command to the current state, producing a new state and audit
/// event.
///
/// This function handles schedule-scoped commands within one production.
///
/// # Arguments
///
/// * `metadata` - The board metadata (for validation)
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The command violates domain rules
/// - The production is unknown
/// - An addressed request, record, or staff entry does not exist
#[allow(clippy::too_many_lines)]
pub fn apply(
    metadata: &BoardMetadata,
    state: &ScheduleState,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    if !metadata.has_production(&state.production) {
        return Err(CoreError::DomainViolation(DomainError::ProductionNotFound(
            state.production.name().to_string(),
        )));
    }

    let before: StateSnapshot = state.to_snapshot();

    match command {
        Command::AddLogisticsGroup { legs } => {
            if legs.is_empty() {
                return Err(CoreError::DomainViolation(DomainError::InvalidGroupSize {
                    count: 0,
                }));
            }

            if legs.len() == 1 {
                // A lone transport leg carries no group, only the Sunday rule
                if let Some(leg) = legs.first() {
                    validate_transport_leg_date(leg.kind, leg.date)?;
                }
            } else {
                validate_round_trip_group(&legs)?;
            }

            let mut new_state: ScheduleState = state.clone();
            let count = legs.len();
            let department = legs
                .first()
                .map(|leg| leg.department.name().to_string())
                .unwrap_or_default();
            new_state.logistics.extend(legs);

            let action: Action = Action::new(
                String::from("AddLogisticsGroup"),
                Some(format!("Added {count} leg(s) for department '{department}'")),
            );

            finish(new_state, actor, cause, action, before)
        }
        Command::UpdateLogisticsRequest { request } => {
            let Some(request_id) = request.request_id else {
                return Err(CoreError::RequestNotFound(0));
            };

            validate_transport_leg_date(request.kind, request.date)?;

            let mut new_state: ScheduleState = state.clone();
            let slot = new_state
                .logistics
                .iter_mut()
                .find(|r| r.request_id == Some(request_id))
                .ok_or(CoreError::RequestNotFound(request_id))?;
            *slot = request;

            let action: Action = Action::new(
                String::from("UpdateLogisticsRequest"),
                Some(format!("Updated request {request_id}")),
            );

            finish(new_state, actor, cause, action, before)
        }
        Command::DeleteLogisticsRequest { request_id } => {
            if state.find_request(request_id).is_none() {
                return Err(CoreError::RequestNotFound(request_id));
            }

            let mut new_state: ScheduleState = state.clone();
            new_state
                .logistics
                .retain(|r| r.request_id != Some(request_id));

            let action: Action = Action::new(
                String::from("DeleteLogisticsRequest"),
                Some(format!("Deleted request {request_id}")),
            );

            finish(new_state, actor, cause, action, before)
        }
        Command::MoveRequest {
            request_id,
            new_date,
            clear_link,
        } => {
            let mut new_state: ScheduleState = state.clone();
            let entry = new_state
                .logistics
                .iter_mut()
                .find(|r| r.request_id == Some(request_id))
                .ok_or(CoreError::RequestNotFound(request_id))?;

            let old_date = entry.date;
            entry.date = new_date;
            if clear_link {
                entry.clear_link();
            }

            let action: Action = Action::new(
                String::from("MoveRequest"),
                Some(format!(
                    "Moved request {request_id} from {} to {}{}",
                    format_date(old_date),
                    format_date(new_date),
                    if clear_link { " (detached)" } else { "" }
                )),
            );

            finish(new_state, actor, cause, action, before)
        }
        Command::AddReinforcementStaff {
            date,
            department,
            detail,
        } => {
            validate_staff_name(&detail.name)?;

            let mut new_state: ScheduleState = state.clone();
            let staff_id = detail.staff_id.clone();

            if let Some(record) = new_state
                .reinforcements
                .iter_mut()
                .find(|r| r.date == date && r.department == department)
            {
                record.staff.push(detail);
            } else {
                let mut record =
                    callsheet_domain::Reinforcement::new(date, department.clone());
                record.staff.push(detail);
                new_state.reinforcements.push(record);
            }

            let action: Action = Action::new(
                String::from("AddReinforcementStaff"),
                Some(format!(
                    "Added staff '{staff_id}' on {} for department '{}'",
                    format_date(date),
                    department.name()
                )),
            );

            finish(new_state, actor, cause, action, before)
        }
        Command::RemoveReinforcementStaff {
            date,
            department,
            staff_id,
        } => {
            let mut new_state: ScheduleState = state.clone();
            let record = new_state
                .reinforcements
                .iter_mut()
                .find(|r| r.date == date && r.department == department)
                .ok_or_else(|| CoreError::ReinforcementNotFound {
                    date,
                    department: department.name().to_string(),
                })?;

            if record.find_staff(&staff_id).is_none() {
                return Err(CoreError::StaffNotFound { staff_id });
            }
            record.staff.retain(|d| d.staff_id != staff_id);

            // Empty records are deleted, not kept around
            new_state
                .reinforcements
                .retain(|r| !(r.date == date && r.department == department && r.is_empty()));

            let action: Action = Action::new(
                String::from("RemoveReinforcementStaff"),
                Some(format!(
                    "Removed staff '{staff_id}' on {} from department '{}'",
                    format_date(date),
                    department.name()
                )),
            );

            finish(new_state, actor, cause, action, before)
        }
        Command::ApproveStaff {
            date,
            department,
            staff_id,
        } => {
            let mut new_state: ScheduleState = state.clone();
            let record = new_state
                .reinforcements
                .iter_mut()
                .find(|r| r.date == date && r.department == department)
                .ok_or_else(|| CoreError::ReinforcementNotFound {
                    date,
                    department: department.name().to_string(),
                })?;

            let detail = record
                .staff
                .iter_mut()
                .find(|d| d.staff_id == staff_id)
                .ok_or_else(|| CoreError::StaffNotFound {
                    staff_id: staff_id.clone(),
                })?;

            let already_approved = detail.validation_status.is_approved();
            if !already_approved {
                detail.validation_status = callsheet_domain::ValidationStatus::Approved;
            }

            let detail_text = if already_approved {
                format!("Staff '{staff_id}' was already approved (no change)")
            } else {
                format!("Approved staff '{staff_id}' on {}", format_date(date))
            };

            let action: Action =
                Action::new(String::from("ApproveStaff"), Some(detail_text));

            finish(new_state, actor, cause, action, before)
        }
        Command::CreateProduction { .. }
        | Command::CreateDepartment { .. }
        | Command::SetShootingStart { .. } => {
            // Bootstrap commands should use apply_bootstrap() instead
            unreachable!("apply called with bootstrap command")
        }
    }
}

/// Builds the transition result for a successful command.
fn finish(
    new_state: ScheduleState,
    actor: Actor,
    cause: Cause,
    action: Action,
    before: StateSnapshot,
) -> Result<TransitionResult, CoreError> {
    let after: StateSnapshot = new_state.to_snapshot();
    Ok(TransitionResult {
        audit_event: AuditEvent::new(actor, cause, action, before, after),
        new_state,
    })
}
