// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff moves across dates.
//!
//! Moving a person from one day to another is a remove-then-add pair with a
//! deliberate ordering: the entry is added to the target record BEFORE it is
//! removed from the source record. A failure between the two steps leaves
//! the person duplicated rather than lost; duplication is the safer failure
//! mode than disappearance.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::ScheduleState;
use callsheet_domain::Department;
use time::Date;

/// The two ordered commands of a staff move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffMove {
    /// Step 1: add the entry to the target record (creating it if absent).
    pub add: Command,
    /// Step 2: remove the entry from the source record (deleting it when it
    /// empties). Only run after step 1 succeeded.
    pub remove: Command,
}

/// Plans a staff move across dates.
///
/// # Arguments
///
/// * `state` - The current schedule state
/// * `source_date` - The day the entry currently sits on
/// * `department` - The owning department
/// * `staff_id` - The id of the entry to move
/// * `target_date` - The day to move the entry to
///
/// # Returns
///
/// The ordered add/remove command pair.
///
/// # Errors
///
/// Returns an error if the source record or the staff entry does not exist.
pub fn plan_staff_move(
    state: &ScheduleState,
    source_date: Date,
    department: &Department,
    staff_id: &str,
    target_date: Date,
) -> Result<StaffMove, CoreError> {
    let record = state
        .find_reinforcement(source_date, department)
        .ok_or_else(|| CoreError::ReinforcementNotFound {
            date: source_date,
            department: department.name().to_string(),
        })?;

    let detail = record
        .find_staff(staff_id)
        .ok_or_else(|| CoreError::StaffNotFound {
            staff_id: staff_id.to_string(),
        })?;

    Ok(StaffMove {
        add: Command::AddReinforcementStaff {
            date: target_date,
            department: department.clone(),
            detail: detail.clone(),
        },
        remove: Command::RemoveReinforcementStaff {
            date: source_date,
            department: department.clone(),
            staff_id: staff_id.to_string(),
        },
    })
}
