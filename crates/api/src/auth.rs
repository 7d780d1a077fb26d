// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types.
//!
//! Real authentication (identity provider, sessions, tokens) is an
//! external collaborator: the surrounding application authenticates its
//! users and hands this layer an actor id, a department, and a role.

use callsheet_audit::Actor;
use callsheet_domain::{ActingContext, Department};

use crate::error::{ApiError, AuthError};

/// Actor roles for authorization.
///
/// Roles determine what actions an authenticated actor may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Production office: may act on any department's records, approve
    /// reinforcement staff, and manage productions/departments.
    Production,
    /// Department operator: submits and edits requests for the department
    /// they act for.
    Department,
}

/// An authenticated actor with an associated role and acting department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
    /// The department this actor acts for.
    pub department: Department,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    /// * `department` - The department this actor acts for
    #[must_use]
    pub const fn new(id: String, role: Role, department: Department) -> Self {
        Self {
            id,
            role,
            department,
        }
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        let actor_type: String = match self.role {
            Role::Production => String::from("production"),
            Role::Department => String::from("department"),
        };
        Actor::new(self.id.clone(), actor_type)
    }

    /// Builds the explicit acting context core operations require.
    #[must_use]
    pub fn acting_context(&self) -> ActingContext {
        ActingContext {
            department: self.department.clone(),
            can_act_any_department: matches!(self.role, Role::Production),
        }
    }
}

/// Stub authentication function.
///
/// This layer does not implement real authentication; the surrounding
/// application does, and supplies the already-verified identity.
///
/// # Arguments
///
/// * `actor_id` - The identifier of the actor to authenticate
/// * `role` - The role to assign to the actor
/// * `department` - The department the actor acts for
///
/// # Returns
///
/// An authenticated actor if successful.
///
/// # Errors
///
/// Returns an error if the actor id is empty.
pub fn authenticate_stub(
    actor_id: String,
    role: Role,
    department: Department,
) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role, department))
}

/// Requires production-office authority for an action.
///
/// # Errors
///
/// Returns an error if the actor is not a production-office operator.
pub fn require_production(actor: &AuthenticatedActor, action: &str) -> Result<(), ApiError> {
    if actor.role == Role::Production {
        Ok(())
    } else {
        Err(ApiError::Unauthorized {
            action: action.to_string(),
            required_role: String::from("Production"),
        })
    }
}
