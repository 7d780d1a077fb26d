// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::staff::plan_staff_move;
use crate::apply;
use callsheet_domain::Department;

use super::helpers::{
    create_test_actor, create_test_cause, create_test_metadata, create_test_state, test_date,
};

#[test]
fn test_staff_move_adds_before_removing() {
    let state = create_test_state();
    let department = Department::new("electric");

    let staff_move = plan_staff_move(&state, test_date(6), &department, "staff-1", test_date(8))
        .expect("Plan should succeed");

    assert!(matches!(
        staff_move.add,
        Command::AddReinforcementStaff { .. }
    ));
    assert!(matches!(
        staff_move.remove,
        Command::RemoveReinforcementStaff { .. }
    ));
}

#[test]
fn test_staff_move_never_loses_the_person() {
    let metadata = create_test_metadata();
    let state = create_test_state();
    let department = Department::new("electric");

    let staff_move = plan_staff_move(&state, test_date(6), &department, "staff-1", test_date(8))
        .expect("Plan should succeed");

    // After the add step alone the person exists twice: the failure mode
    // between the two steps duplicates, never loses
    let after_add = apply(
        &metadata,
        &state,
        staff_move.add,
        create_test_actor(),
        create_test_cause(),
    )
    .expect("Add step should succeed");

    let count_after_add = after_add
        .new_state
        .reinforcements
        .iter()
        .flat_map(|r| &r.staff)
        .filter(|d| d.staff_id == "staff-1")
        .count();
    assert_eq!(count_after_add, 2);

    let after_remove = apply(
        &metadata,
        &after_add.new_state,
        staff_move.remove,
        create_test_actor(),
        create_test_cause(),
    )
    .expect("Remove step should succeed");

    let survivors: Vec<_> = after_remove
        .new_state
        .reinforcements
        .iter()
        .filter(|r| r.find_staff("staff-1").is_some())
        .collect();
    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0].date, test_date(8));
}

#[test]
fn test_staff_move_from_unknown_record_fails() {
    let state = create_test_state();

    let result = plan_staff_move(
        &state,
        test_date(25),
        &Department::new("electric"),
        "staff-1",
        test_date(26),
    );

    assert!(matches!(
        result,
        Err(CoreError::ReinforcementNotFound { .. })
    ));
}

#[test]
fn test_staff_move_of_unknown_person_fails() {
    let state = create_test_state();

    let result = plan_staff_move(
        &state,
        test_date(6),
        &Department::new("electric"),
        "staff-404",
        test_date(8),
    );

    assert!(matches!(result, Err(CoreError::StaffNotFound { .. })));
}
