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

mod derive;
mod error;
mod reference;
mod types;
mod validation;
mod week;

#[cfg(test)]
mod tests;

pub use derive::{
    DerivedLeg, RoundTripMode, ShiftDirection, avoid_sunday, derive_phase_days, derive_round_trip,
};
pub use error::DomainError;
pub use reference::{ReferenceRange, resolve_reference};
pub use week::{WeekInfo, week_info};

// Re-export public types
pub use types::{
    ActingContext, Department, GroupId, LinkPhase, LinkRef, LogisticsRequest, Production,
    ProductionDay, Reinforcement, ReinforcementDetail, RequestKind, RequestStatus, ScheduleLink,
    Sequence, ValidationStatus,
};
pub use validation::{
    format_date, parse_date, validate_department_name, validate_duration, validate_production_name,
    validate_round_trip_group, validate_staff_name, validate_transport_leg_date,
};
