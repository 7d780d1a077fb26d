// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod reschedule;
mod staff;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, apply_bootstrap};
pub use command::Command;
pub use error::CoreError;
pub use reschedule::{
    ConfirmDecision, ConfirmPrompt, ConfirmationKind, DecisionPrompt, RequestMove,
    RescheduleIntent, ReschedulePlan, RescheduleResolution, plan_reschedule, resolve_reschedule,
};
pub use staff::{StaffMove, plan_staff_move};
pub use state::{BoardMetadata, BootstrapResult, ScheduleState, TransitionResult};
