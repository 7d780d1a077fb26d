// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use callsheet::CoreError;
use callsheet_domain::DomainError;
use callsheet_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The uploaded CSV is malformed.
    InvalidCsvFormat {
        /// A human-readable description of the format problem.
        reason: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::InvalidCsvFormat { reason } => {
                write!(f, "Invalid CSV format: {reason}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(error: DomainError) -> ApiError {
    match &error {
        DomainError::ProductionNotFound(name) => ApiError::ResourceNotFound {
            resource_type: String::from("Production"),
            message: format!("Production '{name}' does not exist"),
        },
        DomainError::DepartmentNotFound {
            production,
            department,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Department"),
            message: format!("Department '{department}' does not exist in '{production}'"),
        },
        DomainError::DateParseError { date_string, .. } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("'{date_string}' is not a valid ISO day"),
        },
        DomainError::SundayNotAllowed { .. } => ApiError::DomainRuleViolation {
            rule: String::from("no-sunday-transport"),
            message: error.to_string(),
        },
        _ => ApiError::DomainRuleViolation {
            rule: String::from("domain-validation"),
            message: error.to_string(),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(error: CoreError) -> ApiError {
    match error {
        CoreError::DomainViolation(domain_error) => translate_domain_error(domain_error),
        CoreError::RequestNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("LogisticsRequest"),
            message: format!("Logistics request {id} does not exist"),
        },
        CoreError::ReinforcementNotFound { date, department } => ApiError::ResourceNotFound {
            resource_type: String::from("Reinforcement"),
            message: format!("No reinforcement record for {date} in department '{department}'"),
        },
        CoreError::StaffNotFound { staff_id } => ApiError::ResourceNotFound {
            resource_type: String::from("ReinforcementStaff"),
            message: format!("Staff entry '{staff_id}' does not exist"),
        },
        CoreError::SundayDropTarget { date } => ApiError::DomainRuleViolation {
            rule: String::from("no-sunday-drop"),
            message: format!("Cannot reschedule onto a Sunday ({date})"),
        },
        CoreError::MissingDecision { confirmation } => ApiError::Internal {
            message: format!("Unanswered confirmation reached application: {confirmation}"),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(error: PersistenceError) -> ApiError {
    match error {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        _ => ApiError::Internal {
            message: error.to_string(),
        },
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}
