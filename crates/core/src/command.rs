// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use callsheet_domain::{Department, LogisticsRequest, Production, ReinforcementDetail};
use time::Date;

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new production.
    CreateProduction {
        /// The production's display name.
        name: String,
    },
    /// Create a new department within a production.
    CreateDepartment {
        /// The production this department belongs to.
        production: Production,
        /// The department name.
        name: String,
    },
    /// Set or clear the first day of principal photography.
    SetShootingStart {
        /// The production to update.
        production: Production,
        /// The shooting start date, or `None` to clear it.
        date: Option<Date>,
    },
    /// Add the legs of a transport request (a single leg, or a 2-3 leg
    /// round-trip group sharing one group id).
    AddLogisticsGroup {
        /// The legs to add, in creation order.
        legs: Vec<LogisticsRequest>,
    },
    /// Replace a persisted logistics request with an edited version.
    UpdateLogisticsRequest {
        /// The edited request; its `request_id` selects the record.
        request: LogisticsRequest,
    },
    /// Delete a logistics request.
    DeleteLogisticsRequest {
        /// The canonical id of the request to delete.
        request_id: i64,
    },
    /// Move a logistics request to a new date, optionally detaching it from
    /// its reference. Produced by the drag-reschedule planner.
    MoveRequest {
        /// The canonical id of the request to move.
        request_id: i64,
        /// The new date.
        new_date: Date,
        /// Whether to clear every link field.
        clear_link: bool,
    },
    /// Add a staff entry to the reinforcement record of a date and
    /// department, creating the record if absent.
    AddReinforcementStaff {
        /// The calendar day.
        date: Date,
        /// The owning department.
        department: Department,
        /// The staff entry to add.
        detail: ReinforcementDetail,
    },
    /// Remove a staff entry from the reinforcement record of a date and
    /// department, deleting the record when it empties.
    RemoveReinforcementStaff {
        /// The calendar day.
        date: Date,
        /// The owning department.
        department: Department,
        /// The id of the staff entry to remove.
        staff_id: String,
    },
    /// Approve a pending staff entry. Approving an already-approved entry
    /// is a no-op.
    ApproveStaff {
        /// The calendar day.
        date: Date,
        /// The owning department.
        department: Department,
        /// The id of the staff entry to approve.
        staff_id: String,
    },
}
