// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Drag-reschedule planning.
//!
//! Rescheduling an entry by drag is a gated workflow, not a single write:
//!
//! 1. A Sunday target is rejected outright; nothing is mutated.
//! 2. A linked entry needs a "detach and move" confirmation. Declining
//!    aborts the whole operation.
//! 3. An entry with group siblings offers a cascade: shift every sibling by
//!    the same day delta. Declining the cascade still moves the dragged
//!    entry alone.
//! 4. Cascaded pickup/dropoff legs that land on a Sunday shift one more day
//!    in the delta's direction. Usage legs keep the exact delta.
//!
//! The planner here is pure: it inspects the schedule state and the
//! confirmation answers and produces the full move set. Applying the moves
//! (best-effort, per entry, no rollback) is the caller's job.

use crate::error::CoreError;
use crate::state::ScheduleState;
use callsheet_domain::{LogisticsRequest, ShiftDirection, avoid_sunday};
use time::{Date, Weekday};

/// A confirmation the reschedule workflow may need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationKind {
    /// The dragged entry is linked to a sequence or location; moving it
    /// detaches it from that reference.
    DetachFromReference,
    /// Other entries share the dragged entry's group; they can be shifted
    /// by the same delta.
    CascadeSiblings {
        /// How many sibling entries would be shifted.
        sibling_count: usize,
    },
}

impl ConfirmationKind {
    /// Builds the user-facing question for this confirmation.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::DetachFromReference => String::from(
                "This entry is linked to a sequence or location. Detach it and move it anyway?",
            ),
            Self::CascadeSiblings { sibling_count } => format!(
                "This entry belongs to a round trip with {sibling_count} other leg(s). \
                 Shift them by the same number of days?"
            ),
        }
    }
}

impl std::fmt::Display for ConfirmationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DetachFromReference => write!(f, "detach from reference"),
            Self::CascadeSiblings { sibling_count } => {
                write!(f, "cascade {sibling_count} sibling(s)")
            }
        }
    }
}

/// The answer to a confirmation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmDecision {
    /// The user confirmed.
    Approved,
    /// The user declined.
    Declined,
    /// No answer is available; the workflow suspends so the caller can ask
    /// and resubmit.
    Unanswered,
}

/// An async-free yes/no interaction abstraction.
///
/// Prompts are chained sequentially within one operation: detach first,
/// cascade second. Implementations answer from an interactive user, from
/// pre-supplied decisions (the HTTP two-phase protocol), or from a script
/// in tests.
pub trait ConfirmPrompt {
    /// Answers a confirmation request.
    fn confirm(&mut self, confirmation: &ConfirmationKind) -> ConfirmDecision;
}

/// The intent behind a drag gesture: move one entry to a new date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescheduleIntent {
    /// The canonical id of the dragged entry.
    pub request_id: i64,
    /// The date the entry was dropped on.
    pub target_date: Date,
}

/// The analyzed reschedule before confirmations are answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReschedulePlan {
    /// The canonical id of the dragged entry.
    pub request_id: i64,
    /// The entry's current date.
    pub source_date: Date,
    /// The date the entry was dropped on.
    pub target_date: Date,
    /// Whole days between source and target (signed).
    pub delta_days: i64,
    /// Whether the dragged entry is linked and needs a detach confirmation.
    pub needs_detach_confirmation: bool,
    /// Canonical ids of the other entries sharing the dragged entry's group.
    pub sibling_ids: Vec<i64>,
}

/// One entry write produced by a resolved reschedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMove {
    /// The canonical id of the entry to write.
    pub request_id: i64,
    /// The entry's new date.
    pub new_date: Date,
    /// Whether to clear every link field on the entry.
    pub clear_link: bool,
}

/// The outcome of driving a reschedule plan through its confirmations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RescheduleResolution {
    /// The user declined to detach; nothing may be written.
    Aborted,
    /// A confirmation has no answer yet; ask and resubmit.
    AwaitingDecision(ConfirmationKind),
    /// The full move set to apply, dragged entry first.
    Apply {
        /// The writes to perform, in order.
        moves: Vec<RequestMove>,
        /// Whether link fields are being cleared.
        unlinked: bool,
        /// Canonical ids of the cascaded siblings (empty if no cascade).
        cascaded: Vec<i64>,
    },
}

/// Analyzes a drag gesture against the current schedule state.
///
/// # Arguments
///
/// * `state` - The current schedule state
/// * `intent` - The drag intent
///
/// # Returns
///
/// The plan describing which confirmations the move needs.
///
/// # Errors
///
/// Returns an error if:
/// - The target date is a Sunday (the drop is rejected outright)
/// - The dragged entry does not exist
pub fn plan_reschedule(
    state: &ScheduleState,
    intent: &RescheduleIntent,
) -> Result<ReschedulePlan, CoreError> {
    if intent.target_date.weekday() == Weekday::Sunday {
        return Err(CoreError::SundayDropTarget {
            date: intent.target_date,
        });
    }

    let entry: &LogisticsRequest = state
        .find_request(intent.request_id)
        .ok_or(CoreError::RequestNotFound(intent.request_id))?;

    let sibling_ids = entry
        .group_id
        .as_ref()
        .map(|group| state.sibling_ids(group, intent.request_id))
        .unwrap_or_default();

    let delta_days = (intent.target_date - entry.date).whole_days();

    Ok(ReschedulePlan {
        request_id: intent.request_id,
        source_date: entry.date,
        target_date: intent.target_date,
        delta_days,
        needs_detach_confirmation: entry.is_linked(),
        sibling_ids,
    })
}

/// Drives a plan through its confirmations and resolves the move set.
///
/// Prompts are asked in workflow order: detach first (declining aborts the
/// entire operation), cascade second (declining only skips the siblings).
///
/// # Arguments
///
/// * `state` - The current schedule state
/// * `plan` - The analyzed reschedule
/// * `prompt` - The confirmation prompt implementation
///
/// # Returns
///
/// The resolution: abort, suspend on an unanswered confirmation, or the
/// full move set.
///
/// # Errors
///
/// Returns an error if a cascaded sibling disappeared from the state
/// between planning and resolution.
pub fn resolve_reschedule(
    state: &ScheduleState,
    plan: &ReschedulePlan,
    prompt: &mut dyn ConfirmPrompt,
) -> Result<RescheduleResolution, CoreError> {
    let mut unlink = false;
    if plan.needs_detach_confirmation {
        match prompt.confirm(&ConfirmationKind::DetachFromReference) {
            ConfirmDecision::Approved => unlink = true,
            ConfirmDecision::Declined => return Ok(RescheduleResolution::Aborted),
            ConfirmDecision::Unanswered => {
                return Ok(RescheduleResolution::AwaitingDecision(
                    ConfirmationKind::DetachFromReference,
                ));
            }
        }
    }

    let mut cascade = false;
    if !plan.sibling_ids.is_empty() {
        let confirmation = ConfirmationKind::CascadeSiblings {
            sibling_count: plan.sibling_ids.len(),
        };
        match prompt.confirm(&confirmation) {
            ConfirmDecision::Approved => cascade = true,
            ConfirmDecision::Declined => cascade = false,
            ConfirmDecision::Unanswered => {
                return Ok(RescheduleResolution::AwaitingDecision(confirmation));
            }
        }
    }

    let mut moves = vec![RequestMove {
        request_id: plan.request_id,
        new_date: plan.target_date,
        clear_link: unlink,
    }];

    let mut cascaded = Vec::new();
    if cascade {
        for sibling_id in &plan.sibling_ids {
            let sibling = state
                .find_request(*sibling_id)
                .ok_or(CoreError::RequestNotFound(*sibling_id))?;

            moves.push(RequestMove {
                request_id: *sibling_id,
                new_date: shifted_sibling_date(sibling, plan.delta_days),
                clear_link: unlink,
            });
            cascaded.push(*sibling_id);
        }
    }

    Ok(RescheduleResolution::Apply {
        moves,
        unlinked: unlink,
        cascaded,
    })
}

/// Shifts a sibling by the cascade delta and re-applies Sunday avoidance.
///
/// The avoidance direction follows the delta: moving the group later pushes
/// a Sunday landing to Monday, moving it earlier pulls it back to Saturday.
/// Only pickup/dropoff legs are shifted off Sundays; usage legs keep the
/// exact delta.
fn shifted_sibling_date(sibling: &LogisticsRequest, delta_days: i64) -> Date {
    let shifted = sibling
        .date
        .saturating_add(time::Duration::days(delta_days));

    if sibling.kind.is_pickup_like() || sibling.kind.is_dropoff_like() {
        let direction = if delta_days < 0 {
            ShiftDirection::Backward
        } else {
            ShiftDirection::Forward
        };
        avoid_sunday(shifted, direction)
    } else {
        shifted
    }
}

/// A scripted prompt answering from pre-supplied decisions.
///
/// Missing answers resolve to `Unanswered`, which suspends the workflow.
/// This is the implementation behind the HTTP two-phase protocol and most
/// tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionPrompt {
    /// The answer to a detach confirmation, if supplied.
    pub detach: Option<bool>,
    /// The answer to a cascade confirmation, if supplied.
    pub cascade: Option<bool>,
}

impl DecisionPrompt {
    /// Creates a prompt from optional pre-supplied decisions.
    #[must_use]
    pub const fn new(detach: Option<bool>, cascade: Option<bool>) -> Self {
        Self { detach, cascade }
    }
}

impl ConfirmPrompt for DecisionPrompt {
    fn confirm(&mut self, confirmation: &ConfirmationKind) -> ConfirmDecision {
        let answer = match confirmation {
            ConfirmationKind::DetachFromReference => self.detach,
            ConfirmationKind::CascadeSiblings { .. } => self.cascade,
        };
        match answer {
            Some(true) => ConfirmDecision::Approved,
            Some(false) => ConfirmDecision::Declined,
            None => ConfirmDecision::Unanswered,
        }
    }
}
