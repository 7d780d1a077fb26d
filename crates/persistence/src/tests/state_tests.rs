// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use callsheet_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use callsheet_domain::{
    Department, Production, ProductionDay, ReinforcementDetail, RequestKind, Sequence,
    ValidationStatus,
};

use super::helpers::{make_leg, setup_test_persistence, test_date};

#[test]
fn test_load_schedule_state_reflects_all_writes() {
    let (mut persistence, production_id) = setup_test_persistence();

    persistence
        .insert_logistics_group(
            production_id,
            &[
                make_leg(RequestKind::Pickup, 12, Some("grp-a")),
                make_leg(RequestKind::Dropoff, 14, Some("grp-a")),
            ],
        )
        .unwrap();
    persistence
        .add_staff(
            production_id,
            test_date(6),
            &Department::new("electric"),
            &ReinforcementDetail::new(
                String::from("staff-1"),
                String::from("Alex Martin"),
                ValidationStatus::Pending,
            ),
        )
        .unwrap();

    let state = persistence
        .load_schedule_state("Night Shift")
        .expect("State should load");

    assert_eq!(state.production, Production::new("Night Shift"));
    assert_eq!(state.logistics.len(), 2);
    assert_eq!(state.reinforcements.len(), 1);
}

#[test]
fn test_board_metadata_scopes_departments() {
    let (mut persistence, _production_id) = setup_test_persistence();
    let other_id = persistence.create_production("Other Film").unwrap();
    persistence.create_department(other_id, "camera").unwrap();

    let metadata = persistence.load_board_metadata().unwrap();

    assert!(metadata.has_production(&Production::new("Night Shift")));
    assert!(metadata.has_production(&Production::new("Other Film")));
    assert!(metadata.has_department(&Production::new("Night Shift"), &Department::new("grip")));
    assert!(!metadata.has_department(&Production::new("Other Film"), &Department::new("grip")));
    assert!(metadata.has_department(&Production::new("Other Film"), &Department::new("camera")));
}

#[test]
fn test_shooting_start_round_trips() {
    let (mut persistence, production_id) = setup_test_persistence();

    persistence
        .set_shooting_start(production_id, Some(test_date(4)))
        .expect("Update should succeed");

    let production = persistence.get_production("Night Shift").unwrap();
    assert_eq!(production.shooting_start_date(), Some(test_date(4)));
}

#[test]
fn test_reference_tables_round_trip() {
    let (mut persistence, production_id) = setup_test_persistence();

    persistence
        .upsert_production_day(
            production_id,
            &ProductionDay {
                date: test_date(12),
                location: Some(String::from("loc-warehouse")),
                linked_location: None,
            },
        )
        .unwrap();
    persistence
        .upsert_sequence(
            production_id,
            &Sequence {
                sequence_id: String::from("seq-9"),
                date: test_date(13),
                decor: Some(String::from("Warehouse")),
            },
        )
        .unwrap();

    let days = persistence.list_production_days(production_id).unwrap();
    let sequences = persistence.list_sequences(production_id).unwrap();

    assert_eq!(days.len(), 1);
    assert_eq!(days[0].location.as_deref(), Some("loc-warehouse"));
    assert_eq!(sequences.len(), 1);
    assert_eq!(sequences[0].date, test_date(13));
}

#[test]
fn test_upsert_production_day_replaces_location() {
    let (mut persistence, production_id) = setup_test_persistence();

    for location in ["loc-a", "loc-b"] {
        persistence
            .upsert_production_day(
                production_id,
                &ProductionDay {
                    date: test_date(12),
                    location: Some(location.to_string()),
                    linked_location: None,
                },
            )
            .unwrap();
    }

    let days = persistence.list_production_days(production_id).unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].location.as_deref(), Some("loc-b"));
}

#[test]
fn test_audit_event_round_trips_through_the_log() {
    let (mut persistence, production_id) = setup_test_persistence();

    let event = AuditEvent::new(
        Actor::new(String::from("prod-office-1"), String::from("production")),
        Cause::new(String::from("req-1"), String::from("Test request")),
        Action::new(
            String::from("CreateRoundTrip"),
            Some(String::from("3 legs")),
        ),
        StateSnapshot::new(String::from("before")),
        StateSnapshot::new(String::from("after")),
    );

    let event_id = persistence
        .persist_audit_event(Some(production_id), "Night Shift", &event)
        .expect("Persist should succeed");
    assert!(event_id > 0);

    let timeline = persistence.get_audit_timeline(production_id).unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].event, event);
}
