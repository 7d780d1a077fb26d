// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reinforcement derivation, approval, and staff-move tests.

use crate::error::ApiError;
use crate::handlers::{
    approve_staff, create_reinforcements, delete_staff, list_reinforcements, move_staff,
};
use crate::request_response::{
    ApproveStaffRequest, CreateReinforcementsRequest, DeleteStaffRequest, MoveStaffRequest,
    PersonInput, PhaseSelection, ReferenceSelection,
};

use super::helpers::{
    PRODUCTION, create_grip_actor, create_production_actor, create_test_cause, location_reference,
    sequence_reference, setup_test_persistence,
};
use callsheet_persistence::Persistence;

fn person(name: &str) -> PersonInput {
    PersonInput {
        name: name.to_string(),
        phone: Some(String::from("+33 6 12 34 56 78")),
        email: None,
        role: Some(String::from("electrician")),
    }
}

fn phase(phase: &str, duration: u32) -> PhaseSelection {
    PhaseSelection {
        phase: phase.to_string(),
        duration,
    }
}

fn create(
    persistence: &mut Persistence,
    reference: ReferenceSelection,
    phases: Vec<PhaseSelection>,
    people: Vec<PersonInput>,
    production_actor: bool,
) -> Result<crate::request_response::CreateReinforcementsResponse, ApiError> {
    let actor = if production_actor {
        create_production_actor()
    } else {
        create_grip_actor()
    };
    create_reinforcements(
        persistence,
        &CreateReinforcementsRequest {
            production: String::from(PRODUCTION),
            department: String::from("electric"),
            reference,
            phases,
            people,
        },
        &actor,
        create_test_cause(),
    )
}

#[test]
fn test_shooting_phase_creates_one_entry_on_the_sequence_date() {
    let mut persistence = setup_test_persistence();

    let response = create(
        &mut persistence,
        sequence_reference("seq-9"),
        vec![phase("SHOOTING", 1)],
        vec![person("Alex Martin")],
        false,
    )
    .expect("Creation should succeed");

    assert_eq!(response.created.len(), 1);
    assert_eq!(response.created[0].date, "2024-03-13");
    assert_eq!(response.created[0].phase, "SHOOTING");
}

#[test]
fn test_prelight_days_end_the_day_before_the_location_range() {
    let mut persistence = setup_test_persistence();

    // loc-stage starts Tuesday 2024-03-12: three prelight days are the
    // 9th, 10th (a Sunday - reinforcement days are not shifted), and 11th
    let response = create(
        &mut persistence,
        location_reference("loc-stage"),
        vec![phase("PRELIGHT", 3)],
        vec![person("Alex Martin")],
        false,
    )
    .expect("Creation should succeed");

    let dates: Vec<&str> = response.created.iter().map(|c| c.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-03-09", "2024-03-10", "2024-03-11"]);
}

#[test]
fn test_demontage_days_start_the_day_after_the_location_range() {
    let mut persistence = setup_test_persistence();

    // loc-stage ends Thursday 2024-03-14
    let response = create(
        &mut persistence,
        location_reference("loc-stage"),
        vec![phase("DEMONTAGE", 2)],
        vec![person("Alex Martin")],
        false,
    )
    .expect("Creation should succeed");

    let dates: Vec<&str> = response.created.iter().map(|c| c.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-03-15", "2024-03-16"]);
}

#[test]
fn test_every_person_gets_an_entry_per_derived_day() {
    let mut persistence = setup_test_persistence();

    let response = create(
        &mut persistence,
        location_reference("loc-stage"),
        vec![phase("PRELIGHT", 2), phase("SHOOTING", 1)],
        vec![person("Alex Martin"), person("Sam Riva")],
        false,
    )
    .expect("Creation should succeed");

    // 2 prelight days + 1 shooting day, times 2 people
    assert_eq!(response.created.len(), 6);
}

#[test]
fn test_department_submissions_start_pending() {
    let mut persistence = setup_test_persistence();

    let response = create(
        &mut persistence,
        sequence_reference("seq-9"),
        vec![phase("SHOOTING", 1)],
        vec![person("Alex Martin")],
        false,
    )
    .unwrap();

    assert_eq!(response.created[0].validation_status, "PENDING");
}

#[test]
fn test_production_submissions_are_born_approved() {
    let mut persistence = setup_test_persistence();

    let response = create(
        &mut persistence,
        sequence_reference("seq-9"),
        vec![phase("SHOOTING", 1)],
        vec![person("Alex Martin")],
        true,
    )
    .unwrap();

    assert_eq!(response.created[0].validation_status, "APPROVED");
}

#[test]
fn test_zero_duration_phase_is_rejected() {
    let mut persistence = setup_test_persistence();

    let result = create(
        &mut persistence,
        location_reference("loc-stage"),
        vec![phase("PRELIGHT", 0)],
        vec![person("Alex Martin")],
        false,
    );

    assert!(matches!(result, Err(ApiError::DomainRuleViolation { .. })));
}

#[test]
fn test_approve_transitions_only_the_addressed_entry() {
    let mut persistence = setup_test_persistence();

    let response = create(
        &mut persistence,
        sequence_reference("seq-9"),
        vec![phase("SHOOTING", 1)],
        vec![person("Alex Martin"), person("Sam Riva")],
        false,
    )
    .unwrap();
    let first = &response.created[0];

    approve_staff(
        &mut persistence,
        &ApproveStaffRequest {
            production: String::from(PRODUCTION),
            department: String::from("electric"),
            date: first.date.clone(),
            staff_id: first.staff_id.clone(),
        },
        &create_production_actor(),
        create_test_cause(),
    )
    .expect("Approval should succeed");

    let listing = list_reinforcements(&mut persistence, PRODUCTION).unwrap();
    let record = &listing.records[0];
    let approved = record
        .staff
        .iter()
        .find(|s| s.staff_id == first.staff_id)
        .unwrap();
    let untouched = record
        .staff
        .iter()
        .find(|s| s.staff_id != first.staff_id)
        .unwrap();
    assert_eq!(approved.validation_status, "APPROVED");
    assert_eq!(untouched.validation_status, "PENDING");
}

#[test]
fn test_approve_twice_is_idempotent() {
    let mut persistence = setup_test_persistence();

    let response = create(
        &mut persistence,
        sequence_reference("seq-9"),
        vec![phase("SHOOTING", 1)],
        vec![person("Alex Martin")],
        false,
    )
    .unwrap();
    let request = ApproveStaffRequest {
        production: String::from(PRODUCTION),
        department: String::from("electric"),
        date: response.created[0].date.clone(),
        staff_id: response.created[0].staff_id.clone(),
    };

    let first = approve_staff(
        &mut persistence,
        &request,
        &create_production_actor(),
        create_test_cause(),
    )
    .expect("First approval should succeed");
    let second = approve_staff(
        &mut persistence,
        &request,
        &create_production_actor(),
        create_test_cause(),
    )
    .expect("Second approval should not error");

    assert_eq!(first.validation_status, "APPROVED");
    assert_eq!(second.validation_status, "APPROVED");
}

#[test]
fn test_staff_move_lands_on_the_target_before_leaving_the_source() {
    let mut persistence = setup_test_persistence();

    let response = create(
        &mut persistence,
        sequence_reference("seq-9"),
        vec![phase("SHOOTING", 1)],
        vec![person("Alex Martin")],
        false,
    )
    .unwrap();
    let staff_id = response.created[0].staff_id.clone();

    move_staff(
        &mut persistence,
        &MoveStaffRequest {
            production: String::from(PRODUCTION),
            department: String::from("electric"),
            staff_id: staff_id.clone(),
            source_date: String::from("2024-03-13"),
            target_date: String::from("2024-03-15"),
        },
        &create_grip_actor(),
        create_test_cause(),
    )
    .expect("Move should succeed");

    let listing = list_reinforcements(&mut persistence, PRODUCTION).unwrap();
    // The person exists exactly once, on the target date; the emptied
    // source record is gone
    let holders: Vec<_> = listing
        .records
        .iter()
        .filter(|r| r.staff.iter().any(|s| s.staff_id == staff_id))
        .collect();
    assert_eq!(holders.len(), 1);
    assert_eq!(holders[0].date, "2024-03-15");
    assert_eq!(listing.records.len(), 1);
}

#[test]
fn test_deleting_the_last_entry_deletes_the_record() {
    let mut persistence = setup_test_persistence();

    let response = create(
        &mut persistence,
        sequence_reference("seq-9"),
        vec![phase("SHOOTING", 1)],
        vec![person("Alex Martin")],
        false,
    )
    .unwrap();

    delete_staff(
        &mut persistence,
        &DeleteStaffRequest {
            production: String::from(PRODUCTION),
            department: String::from("electric"),
            date: response.created[0].date.clone(),
            staff_id: response.created[0].staff_id.clone(),
        },
        &create_grip_actor(),
        create_test_cause(),
    )
    .expect("Delete should succeed");

    let listing = list_reinforcements(&mut persistence, PRODUCTION).unwrap();
    assert!(listing.records.is_empty());
}

#[test]
fn test_legacy_records_surface_normalized() {
    let mut persistence = setup_test_persistence();
    let production_id = persistence.get_production_id(PRODUCTION).unwrap();
    persistence
        .insert_legacy_reinforcement(
            production_id,
            time::Date::from_calendar_date(2024, time::Month::March, 13).unwrap(),
            &callsheet_domain::Department::new("electric"),
            &[String::from("Alex Martin"), String::from("Sam Riva")],
        )
        .unwrap();

    let listing = list_reinforcements(&mut persistence, PRODUCTION).unwrap();

    assert_eq!(listing.records.len(), 1);
    assert_eq!(listing.records[0].staff.len(), 2);
    assert!(
        listing.records[0]
            .staff
            .iter()
            .all(|s| s.validation_status == "PENDING")
    );
}
