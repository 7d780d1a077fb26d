// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Production name is empty or invalid.
    InvalidProductionName(String),
    /// Production does not exist.
    ProductionNotFound(String),
    /// Production already exists.
    DuplicateProduction(String),
    /// Department does not exist in the production.
    DepartmentNotFound {
        /// The production name.
        production: String,
        /// The department name.
        department: String,
    },
    /// Department already exists in the production.
    DuplicateDepartment {
        /// The production name.
        production: String,
        /// The department name.
        department: String,
    },
    /// Department identifier is empty or invalid.
    InvalidDepartment(String),
    /// Group identifier is empty or invalid.
    InvalidGroupId(String),
    /// A person's name is empty or invalid.
    InvalidName(String),
    /// Link duration must be at least one day.
    InvalidDuration {
        /// The invalid duration value.
        given: u32,
    },
    /// Request kind string is not recognized.
    InvalidRequestKind(String),
    /// Link phase string is not recognized.
    InvalidLinkPhase(String),
    /// Request status string is not recognized.
    InvalidRequestStatus(String),
    /// Validation status string is not recognized.
    InvalidValidationStatus(String),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A pickup or dropoff leg may not be scheduled on a Sunday.
    SundayNotAllowed {
        /// The offending date.
        date: time::Date,
    },
    /// A round-trip group must contain two or three legs.
    InvalidGroupSize {
        /// The number of legs in the group.
        count: usize,
    },
    /// A round-trip group may contain at most one usage leg.
    MultipleUsageLegs {
        /// The number of usage legs found.
        count: usize,
    },
    /// Legs of a round-trip group must share a single group identifier.
    MixedGroupIds,
    /// A reference range was constructed with its last day before its first.
    InvertedReferenceRange {
        /// The first date of the range.
        first_date: time::Date,
        /// The last date of the range.
        last_date: time::Date,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProductionName(msg) => write!(f, "Invalid production name: {msg}"),
            Self::ProductionNotFound(name) => write!(f, "Production '{name}' not found"),
            Self::DuplicateProduction(name) => {
                write!(f, "Production '{name}' already exists")
            }
            Self::DepartmentNotFound {
                production,
                department,
            } => {
                write!(
                    f,
                    "Department '{department}' not found in production '{production}'"
                )
            }
            Self::DuplicateDepartment {
                production,
                department,
            } => {
                write!(
                    f,
                    "Department '{department}' already exists in production '{production}'"
                )
            }
            Self::InvalidDepartment(msg) => write!(f, "Invalid department: {msg}"),
            Self::InvalidGroupId(msg) => write!(f, "Invalid group id: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidDuration { given } => {
                write!(f, "Invalid duration: {given}. Must be at least 1 day")
            }
            Self::InvalidRequestKind(msg) => write!(f, "Invalid request kind: {msg}"),
            Self::InvalidLinkPhase(msg) => write!(f, "Invalid link phase: {msg}"),
            Self::InvalidRequestStatus(msg) => write!(f, "Invalid request status: {msg}"),
            Self::InvalidValidationStatus(msg) => {
                write!(f, "Invalid validation status: {msg}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::SundayNotAllowed { date } => {
                write!(f, "Transport legs may not be scheduled on a Sunday ({date})")
            }
            Self::InvalidGroupSize { count } => {
                write!(
                    f,
                    "A round-trip group must contain 2 or 3 legs, but {count} were given"
                )
            }
            Self::MultipleUsageLegs { count } => {
                write!(
                    f,
                    "A round-trip group may contain at most one usage leg, but {count} were given"
                )
            }
            Self::MixedGroupIds => {
                write!(f, "All legs of a round-trip group must share one group id")
            }
            Self::InvertedReferenceRange {
                first_date,
                last_date,
            } => {
                write!(
                    f,
                    "Reference range ends ({last_date}) before it starts ({first_date})"
                )
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
