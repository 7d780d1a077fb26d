// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use callsheet_audit::{AuditEvent, StateSnapshot};
use callsheet_domain::{
    Department, GroupId, LogisticsRequest, Production, Reinforcement, ReinforcementDetail,
};
use time::Date;

/// Board metadata tracking which productions and departments exist.
///
/// This is separate from the scoped `ScheduleState` and represents global
/// system metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardMetadata {
    /// All productions that have been created.
    pub productions: Vec<Production>,
    /// All departments per production.
    pub departments: Vec<(Production, Department)>,
}

impl BoardMetadata {
    /// Creates a new empty board metadata.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            productions: Vec::new(),
            departments: Vec::new(),
        }
    }

    /// Checks if a production exists.
    #[must_use]
    pub fn has_production(&self, production: &Production) -> bool {
        self.productions.contains(production)
    }

    /// Checks if a department exists in a production.
    #[must_use]
    pub fn has_department(&self, production: &Production, department: &Department) -> bool {
        self.departments
            .iter()
            .any(|(p, d)| p == production && d == department)
    }

    /// Adds a production.
    pub(crate) fn add_production(&mut self, production: Production) {
        self.productions.push(production);
    }

    /// Adds a department to a production.
    pub(crate) fn add_department(&mut self, production: Production, department: Department) {
        self.departments.push((production, department));
    }
}

impl Default for BoardMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// The complete schedule state scoped to a single production.
///
/// This is the live read model the UI renders from: every logistics request
/// and reinforcement record of the production, assumed to reflect all
/// successful writes promptly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleState {
    /// The production this state is scoped to.
    pub production: Production,
    /// All logistics request legs for this production.
    pub logistics: Vec<LogisticsRequest>,
    /// All reinforcement records for this production.
    pub reinforcements: Vec<Reinforcement>,
}

impl ScheduleState {
    /// Creates a new empty state for a production.
    ///
    /// # Arguments
    ///
    /// * `production` - The production this state is scoped to
    #[must_use]
    pub const fn new(production: Production) -> Self {
        Self {
            production,
            logistics: Vec::new(),
            reinforcements: Vec::new(),
        }
    }

    /// Finds a logistics request by its canonical id.
    #[must_use]
    pub fn find_request(&self, request_id: i64) -> Option<&LogisticsRequest> {
        self.logistics
            .iter()
            .find(|r| r.request_id == Some(request_id))
    }

    /// Returns the canonical ids of every other persisted entry sharing a
    /// group with the given entry.
    #[must_use]
    pub fn sibling_ids(&self, group_id: &GroupId, exclude_request_id: i64) -> Vec<i64> {
        self.logistics
            .iter()
            .filter(|r| r.group_id.as_ref() == Some(group_id))
            .filter_map(|r| r.request_id)
            .filter(|id| *id != exclude_request_id)
            .collect()
    }

    /// Finds the reinforcement record for a date and department.
    #[must_use]
    pub fn find_reinforcement(&self, date: Date, department: &Department) -> Option<&Reinforcement> {
        self.reinforcements
            .iter()
            .find(|r| r.date == date && r.department == *department)
    }

    /// Finds a staff entry anywhere in the production's reinforcements.
    #[must_use]
    pub fn find_staff(&self, staff_id: &str) -> Option<(&Reinforcement, &ReinforcementDetail)> {
        self.reinforcements.iter().find_map(|record| {
            record
                .find_staff(staff_id)
                .map(|detail| (record, detail))
        })
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "production={},logistics_count={},reinforcements_count={}",
            self.production.name(),
            self.logistics.len(),
            self.reinforcements.len()
        ))
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: ScheduleState,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a bootstrap operation.
///
/// Bootstrap operations modify metadata, not scoped state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapResult {
    /// The new board metadata after the operation.
    pub new_metadata: BoardMetadata,
    /// The audit event recording this operation.
    pub audit_event: AuditEvent,
}
