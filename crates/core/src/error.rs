// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use callsheet_domain::DomainError;

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The logistics request does not exist.
    RequestNotFound(i64),
    /// The reinforcement record does not exist.
    ReinforcementNotFound {
        /// The calendar day.
        date: time::Date,
        /// The department name.
        department: String,
    },
    /// The staff entry does not exist.
    StaffNotFound {
        /// The id of the missing staff entry.
        staff_id: String,
    },
    /// A drag onto a Sunday target is rejected outright.
    SundayDropTarget {
        /// The rejected target date.
        date: time::Date,
    },
    /// A confirmation the workflow needs has not been answered yet.
    MissingDecision {
        /// The unanswered confirmation, as a display string.
        confirmation: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::RequestNotFound(id) => write!(f, "Logistics request {id} not found"),
            Self::ReinforcementNotFound { date, department } => {
                write!(
                    f,
                    "No reinforcement record for {date} in department '{department}'"
                )
            }
            Self::StaffNotFound { staff_id } => {
                write!(f, "Staff entry '{staff_id}' not found")
            }
            Self::SundayDropTarget { date } => {
                write!(f, "Cannot reschedule onto a Sunday ({date})")
            }
            Self::MissingDecision { confirmation } => {
                write!(f, "Confirmation not answered: {confirmation}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
