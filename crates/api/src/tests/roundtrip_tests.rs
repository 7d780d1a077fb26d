// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Round-trip derivation and creation tests.

use crate::error::ApiError;
use crate::handlers::{
    create_round_trip, delete_request, list_logistics, preview_round_trip, update_request,
};
use crate::request_response::{
    CreateRoundTripRequest, DeleteRequestRequest, ReferenceSelection, RoundTripPreviewRequest,
    UpdateRequestRequest,
};

use super::helpers::{
    PRODUCTION, create_grip_actor, create_test_cause, date_reference, location_reference,
    sequence_reference, setup_test_persistence,
};

fn create_request(reference: ReferenceSelection, full_duration: bool) -> CreateRoundTripRequest {
    CreateRoundTripRequest {
        production: String::from(PRODUCTION),
        department: String::from("grip"),
        reference,
        full_duration,
        time_note: Some(String::from("08:30")),
        location: Some(String::from("Rental house")),
        description: Some(String::from("Dolly track")),
        vehicle_type: Some(String::from("van")),
    }
}

#[test]
fn test_round_trip_brackets_an_explicit_date() {
    let mut persistence = setup_test_persistence();

    // Wednesday 2024-03-13: pickup the 12th, usage the 13th, return the 14th
    let response = create_round_trip(
        &mut persistence,
        &create_request(date_reference("2024-03-13"), false),
        &create_grip_actor(),
        create_test_cause(),
    )
    .expect("Creation should succeed");

    assert_eq!(response.request_ids.len(), 3);
    assert_eq!(response.pickup_date, "2024-03-12");
    assert_eq!(response.usage_date, "2024-03-13");
    assert_eq!(response.dropoff_date, "2024-03-14");
}

#[test]
fn test_explicit_date_round_trip_is_unlinked() {
    let mut persistence = setup_test_persistence();

    create_round_trip(
        &mut persistence,
        &create_request(date_reference("2024-03-13"), false),
        &create_grip_actor(),
        create_test_cause(),
    )
    .unwrap();

    let listing = list_logistics(&mut persistence, PRODUCTION).unwrap();
    assert_eq!(listing.requests.len(), 3);
    assert!(listing.requests.iter().all(|r| r.linked_sequence_id.is_none()));
    assert!(listing.requests.iter().all(|r| !r.auto_update_dates));
}

#[test]
fn test_sequence_round_trip_is_linked_and_auto_updating() {
    let mut persistence = setup_test_persistence();

    let response = create_round_trip(
        &mut persistence,
        &create_request(sequence_reference("seq-9"), false),
        &create_grip_actor(),
        create_test_cause(),
    )
    .expect("Creation should succeed");

    // seq-9 shoots Wednesday 2024-03-13
    assert_eq!(response.usage_date, "2024-03-13");

    let listing = list_logistics(&mut persistence, PRODUCTION).unwrap();
    assert!(
        listing
            .requests
            .iter()
            .all(|r| r.linked_sequence_id.as_deref() == Some("seq-9"))
    );
    assert!(listing.requests.iter().all(|r| r.auto_update_dates));

    let group_ids: Vec<_> = listing
        .requests
        .iter()
        .filter_map(|r| r.group_id.clone())
        .collect();
    assert_eq!(group_ids.len(), 3);
    assert!(group_ids.iter().all(|g| g == &group_ids[0]));
}

#[test]
fn test_location_round_trip_is_linked_but_not_auto_updating() {
    let mut persistence = setup_test_persistence();

    create_round_trip(
        &mut persistence,
        &create_request(location_reference("loc-stage"), false),
        &create_grip_actor(),
        create_test_cause(),
    )
    .unwrap();

    let listing = list_logistics(&mut persistence, PRODUCTION).unwrap();
    assert!(
        listing
            .requests
            .iter()
            .all(|r| r.linked_location.as_deref() == Some("loc-stage"))
    );
    // Inherited asymmetry: location links never auto-follow
    assert!(listing.requests.iter().all(|r| !r.auto_update_dates));
}

#[test]
fn test_descriptive_fields_are_copied_onto_every_leg() {
    let mut persistence = setup_test_persistence();

    create_round_trip(
        &mut persistence,
        &create_request(date_reference("2024-03-13"), false),
        &create_grip_actor(),
        create_test_cause(),
    )
    .unwrap();

    let listing = list_logistics(&mut persistence, PRODUCTION).unwrap();
    assert!(
        listing
            .requests
            .iter()
            .all(|r| r.time_note.as_deref() == Some("08:30"))
    );
    assert!(
        listing
            .requests
            .iter()
            .all(|r| r.vehicle_type.as_deref() == Some("van"))
    );

    // Only the phase suffix differs between descriptions
    let pickup = listing.requests.iter().find(|r| r.kind == "pickup").unwrap();
    let usage = listing.requests.iter().find(|r| r.kind == "usage").unwrap();
    let dropoff = listing.requests.iter().find(|r| r.kind == "dropoff").unwrap();
    assert_eq!(pickup.description.as_deref(), Some("Dolly track (pickup)"));
    assert_eq!(usage.description.as_deref(), Some("Dolly track"));
    assert_eq!(dropoff.description.as_deref(), Some("Dolly track (return)"));
}

#[test]
fn test_preview_shifts_pickup_off_sunday() {
    let mut persistence = setup_test_persistence();

    // Monday 2024-03-11: the raw pickup lands on Sunday the 10th
    let response = preview_round_trip(
        &mut persistence,
        &RoundTripPreviewRequest {
            production: String::from(PRODUCTION),
            reference: date_reference("2024-03-11"),
            full_duration: false,
        },
    )
    .expect("Preview should succeed");

    assert_eq!(response.pickup_date, "2024-03-09");
    assert_eq!(response.usage_date, "2024-03-11");
    assert_eq!(response.dropoff_date, "2024-03-12");
}

#[test]
fn test_preview_shifts_dropoff_off_sunday() {
    let mut persistence = setup_test_persistence();

    // Saturday 2024-03-09: the raw return lands on Sunday the 10th
    let response = preview_round_trip(
        &mut persistence,
        &RoundTripPreviewRequest {
            production: String::from(PRODUCTION),
            reference: date_reference("2024-03-09"),
            full_duration: false,
        },
    )
    .expect("Preview should succeed");

    assert_eq!(response.pickup_date, "2024-03-08");
    assert_eq!(response.dropoff_date, "2024-03-11");
}

#[test]
fn test_full_duration_covers_the_location_range() {
    let mut persistence = setup_test_persistence();

    // loc-stage spans March 12-14; the raw pickup (first - 2) lands on
    // Sunday the 10th and falls back to Saturday the 9th
    let response = preview_round_trip(
        &mut persistence,
        &RoundTripPreviewRequest {
            production: String::from(PRODUCTION),
            reference: location_reference("loc-stage"),
            full_duration: true,
        },
    )
    .expect("Preview should succeed");

    assert!(response.multi_day);
    assert_eq!(response.pickup_date, "2024-03-09");
    assert_eq!(response.usage_date, "2024-03-12");
    assert_eq!(response.dropoff_date, "2024-03-15");
}

#[test]
fn test_unresolvable_reference_is_rejected_before_any_write() {
    let mut persistence = setup_test_persistence();

    let result = create_round_trip(
        &mut persistence,
        &create_request(sequence_reference("seq-404"), false),
        &create_grip_actor(),
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
    let listing = list_logistics(&mut persistence, PRODUCTION).unwrap();
    assert!(listing.requests.is_empty());
}

#[test]
fn test_empty_reference_is_rejected() {
    let mut persistence = setup_test_persistence();

    let result = preview_round_trip(
        &mut persistence,
        &RoundTripPreviewRequest {
            production: String::from(PRODUCTION),
            reference: ReferenceSelection::default(),
            full_duration: false,
        },
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_update_and_delete_request() {
    let mut persistence = setup_test_persistence();

    let response = create_round_trip(
        &mut persistence,
        &create_request(date_reference("2024-03-13"), false),
        &create_grip_actor(),
        create_test_cause(),
    )
    .unwrap();
    let pickup_id = response.request_ids[0];

    update_request(
        &mut persistence,
        &UpdateRequestRequest {
            production: String::from(PRODUCTION),
            request_id: pickup_id,
            date: None,
            time_note: Some(String::from("07:00")),
            location: Some(String::from("Rental house")),
            description: Some(String::from("Dolly track and risers")),
            vehicle_type: Some(String::from("truck")),
        },
        &create_grip_actor(),
        create_test_cause(),
    )
    .expect("Update should succeed");

    delete_request(
        &mut persistence,
        &DeleteRequestRequest {
            production: String::from(PRODUCTION),
            request_id: pickup_id,
        },
        &create_grip_actor(),
        create_test_cause(),
    )
    .expect("Delete should succeed");

    let listing = list_logistics(&mut persistence, PRODUCTION).unwrap();
    assert_eq!(listing.requests.len(), 2);
    assert!(listing.requests.iter().all(|r| r.request_id != pickup_id));
}
