// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{
    ActingContext, Department, GroupId, LinkPhase, LinkRef, LogisticsRequest, Production,
    Reinforcement, ReinforcementDetail, RequestKind, RequestStatus, ScheduleLink,
    ValidationStatus,
};
use std::str::FromStr;
use time::{Date, Month};

fn test_date() -> Date {
    Date::from_calendar_date(2024, Month::March, 13).expect("Valid test date")
}

#[test]
fn test_production_equality_ignores_canonical_id() {
    let unsaved: Production = Production::new("Night Shift");
    let saved: Production = Production::with_id(7, String::from("Night Shift"), None);

    assert_eq!(unsaved, saved);
}

#[test]
fn test_department_name_is_case_insensitive() {
    let electric: Department = Department::new("Electric");
    let electric_lower: Department = Department::new("electric");

    assert_eq!(electric, electric_lower);
    assert_eq!(electric.name(), "electric");
}

#[test]
fn test_production_office_department() {
    let production: Department = Department::production();

    assert!(production.is_production());
    assert!(!Department::new("grip").is_production());
}

#[test]
fn test_group_id_rejects_empty_value() {
    assert!(GroupId::new("").is_err());
    assert!(GroupId::new("   ").is_err());
    assert!(GroupId::new("grp-1a2b").is_ok());
}

#[test]
fn test_request_kind_round_trips_through_strings() {
    for kind in [
        RequestKind::Pickup,
        RequestKind::Dropoff,
        RequestKind::PickupSet,
        RequestKind::DropoffSet,
        RequestKind::RoundTrip,
        RequestKind::Usage,
    ] {
        assert_eq!(RequestKind::from_str(kind.as_str()).unwrap(), kind);
    }

    assert!(RequestKind::from_str("delivery").is_err());
}

#[test]
fn test_link_phase_round_trips_through_strings() {
    for phase in [LinkPhase::Prelight, LinkPhase::Shooting, LinkPhase::Demontage] {
        assert_eq!(LinkPhase::from_str(phase.as_str()).unwrap(), phase);
    }

    assert!(LinkPhase::from_str("WRAP").is_err());
}

#[test]
fn test_validation_status_transitions_one_way() {
    assert!(ValidationStatus::Pending.can_transition_to(ValidationStatus::Approved));
    assert!(!ValidationStatus::Approved.can_transition_to(ValidationStatus::Pending));
    assert!(!ValidationStatus::Pending.can_transition_to(ValidationStatus::Pending));
    assert!(!ValidationStatus::Approved.can_transition_to(ValidationStatus::Approved));
}

#[test]
fn test_schedule_link_rejects_zero_duration() {
    let result = ScheduleLink::new(
        LinkRef::Location(String::from("loc-1")),
        LinkPhase::Prelight,
        -1,
        0,
    );

    assert!(result.is_err());
}

#[test]
fn test_sequence_link_enables_auto_update() {
    let link = ScheduleLink::new(
        LinkRef::Sequence(String::from("seq-4")),
        LinkPhase::Shooting,
        0,
        1,
    )
    .unwrap();

    let request =
        LogisticsRequest::new(RequestKind::Usage, test_date(), Department::new("grip"))
            .with_link(link);

    assert!(request.auto_update_dates);
}

#[test]
fn test_location_link_does_not_enable_auto_update() {
    // Inherited asymmetry: location-linked entries never auto-follow
    let link = ScheduleLink::new(
        LinkRef::Location(String::from("loc-9")),
        LinkPhase::Shooting,
        0,
        1,
    )
    .unwrap();

    let request =
        LogisticsRequest::new(RequestKind::Usage, test_date(), Department::new("grip"))
            .with_link(link);

    assert!(!request.auto_update_dates);
    assert!(request.is_linked());
}

#[test]
fn test_clear_link_detaches_everything() {
    let link = ScheduleLink::new(
        LinkRef::Sequence(String::from("seq-4")),
        LinkPhase::Shooting,
        0,
        1,
    )
    .unwrap();
    let mut request =
        LogisticsRequest::new(RequestKind::Usage, test_date(), Department::new("grip"))
            .with_link(link);

    request.clear_link();

    assert!(!request.is_linked());
    assert!(!request.auto_update_dates);
}

#[test]
fn test_new_request_starts_pending() {
    let request =
        LogisticsRequest::new(RequestKind::Pickup, test_date(), Department::new("camera"));

    assert_eq!(request.status, RequestStatus::Pending);
    assert!(request.request_id.is_none());
    assert!(request.group_id.is_none());
}

#[test]
fn test_reinforcement_finds_staff_by_id() {
    let mut record = Reinforcement::new(test_date(), Department::new("electric"));
    record.staff.push(ReinforcementDetail::new(
        String::from("staff-1"),
        String::from("Alex Martin"),
        ValidationStatus::Pending,
    ));

    assert!(record.find_staff("staff-1").is_some());
    assert!(record.find_staff("staff-2").is_none());
    assert!(!record.is_empty());
}

#[test]
fn test_production_context_auto_approves() {
    let context: ActingContext = ActingContext::production();

    assert!(context.can_act_any_department);
    assert_eq!(
        context.initial_validation_status(),
        ValidationStatus::Approved
    );
}

#[test]
fn test_department_context_starts_pending() {
    let context: ActingContext = ActingContext::for_department(Department::new("grip"));

    assert!(!context.can_act_any_department);
    assert_eq!(
        context.initial_validation_status(),
        ValidationStatus::Pending
    );
}
