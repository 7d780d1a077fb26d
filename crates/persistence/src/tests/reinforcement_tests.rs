// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::PersistenceError;
use callsheet_domain::{Department, ReinforcementDetail, ValidationStatus};

use super::helpers::{setup_test_persistence, test_date};

fn detail(staff_id: &str, name: &str) -> ReinforcementDetail {
    ReinforcementDetail::new(
        staff_id.to_string(),
        name.to_string(),
        ValidationStatus::Pending,
    )
}

#[test]
fn test_add_staff_creates_the_record() {
    let (mut persistence, production_id) = setup_test_persistence();
    let department = Department::new("electric");

    persistence
        .add_staff(
            production_id,
            test_date(6),
            &department,
            &detail("staff-1", "Alex Martin"),
        )
        .expect("Add should succeed");

    let record = persistence
        .get_reinforcement(production_id, test_date(6), &department)
        .unwrap()
        .expect("Record should exist");
    assert_eq!(record.staff.len(), 1);
    assert_eq!(record.staff[0].name, "Alex Martin");
}

#[test]
fn test_staff_keeps_insertion_order() {
    let (mut persistence, production_id) = setup_test_persistence();
    let department = Department::new("electric");

    for (id, name) in [("s-1", "First"), ("s-2", "Second"), ("s-3", "Third")] {
        persistence
            .add_staff(production_id, test_date(6), &department, &detail(id, name))
            .unwrap();
    }

    let record = persistence
        .get_reinforcement(production_id, test_date(6), &department)
        .unwrap()
        .unwrap();
    let names: Vec<&str> = record.staff.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
}

#[test]
fn test_remove_last_staff_deletes_the_record() {
    let (mut persistence, production_id) = setup_test_persistence();
    let department = Department::new("electric");

    persistence
        .add_staff(
            production_id,
            test_date(6),
            &department,
            &detail("staff-1", "Alex Martin"),
        )
        .unwrap();

    persistence
        .remove_staff(production_id, test_date(6), &department, "staff-1")
        .expect("Remove should succeed");

    assert!(
        persistence
            .get_reinforcement(production_id, test_date(6), &department)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_remove_unknown_staff_reports_not_found() {
    let (mut persistence, production_id) = setup_test_persistence();
    let department = Department::new("electric");

    persistence
        .add_staff(
            production_id,
            test_date(6),
            &department,
            &detail("staff-1", "Alex Martin"),
        )
        .unwrap();

    let result = persistence.remove_staff(production_id, test_date(6), &department, "staff-404");

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_set_staff_validation() {
    let (mut persistence, production_id) = setup_test_persistence();
    let department = Department::new("electric");

    persistence
        .add_staff(
            production_id,
            test_date(6),
            &department,
            &detail("staff-1", "Alex Martin"),
        )
        .unwrap();

    persistence
        .set_staff_validation("staff-1", ValidationStatus::Approved)
        .expect("Approval should succeed");

    let record = persistence
        .get_reinforcement(production_id, test_date(6), &department)
        .unwrap()
        .unwrap();
    assert!(record.staff[0].validation_status.is_approved());
}

#[test]
fn test_legacy_record_is_normalized_on_first_read() {
    let (mut persistence, production_id) = setup_test_persistence();
    let department = Department::new("electric");

    persistence
        .insert_legacy_reinforcement(
            production_id,
            test_date(6),
            &department,
            &[String::from("Alex Martin"), String::from("Sam Riva")],
        )
        .expect("Legacy insert should succeed");

    // First read performs the normalization
    let record = persistence
        .get_reinforcement(production_id, test_date(6), &department)
        .unwrap()
        .expect("Record should exist");
    assert_eq!(record.staff.len(), 2);
    assert_eq!(record.staff[0].name, "Alex Martin");
    assert_eq!(
        record.staff[0].validation_status,
        ValidationStatus::Pending
    );

    // A second read must not duplicate the synthesized entries
    let again = persistence
        .get_reinforcement(production_id, test_date(6), &department)
        .unwrap()
        .unwrap();
    assert_eq!(again.staff.len(), 2);
}

#[test]
fn test_normalized_record_accepts_further_staff() {
    let (mut persistence, production_id) = setup_test_persistence();
    let department = Department::new("electric");

    persistence
        .insert_legacy_reinforcement(
            production_id,
            test_date(6),
            &department,
            &[String::from("Alex Martin")],
        )
        .unwrap();

    // Normalize via read, then append a modern entry
    let _ = persistence
        .get_reinforcement(production_id, test_date(6), &department)
        .unwrap();
    persistence
        .add_staff(
            production_id,
            test_date(6),
            &department,
            &detail("staff-9", "Lou Perez"),
        )
        .unwrap();

    let record = persistence
        .get_reinforcement(production_id, test_date(6), &department)
        .unwrap()
        .unwrap();
    assert_eq!(record.staff.len(), 2);
    assert_eq!(record.staff[1].name, "Lou Perez");
}
