// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use callsheet_audit::Cause;
use callsheet_domain::Department;
use callsheet_persistence::Persistence;

use crate::auth::{AuthenticatedActor, Role};
use crate::handlers::{
    create_department, create_production, set_shooting_start, upsert_production_day,
    upsert_sequence,
};
use crate::request_response::{
    CreateDepartmentRequest, CreateProductionRequest, ReferenceSelection, SetShootingStartRequest,
    UpsertProductionDayRequest, UpsertSequenceRequest,
};

pub const PRODUCTION: &str = "Night Shift";

pub fn create_production_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(
        String::from("prod-office-1"),
        Role::Production,
        Department::production(),
    )
}

pub fn create_grip_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(
        String::from("grip-op-1"),
        Role::Department,
        Department::new("grip"),
    )
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn sequence_reference(sequence_id: &str) -> ReferenceSelection {
    ReferenceSelection {
        sequence_id: Some(sequence_id.to_string()),
        location_id: None,
        date: None,
    }
}

pub fn location_reference(location_id: &str) -> ReferenceSelection {
    ReferenceSelection {
        sequence_id: None,
        location_id: Some(location_id.to_string()),
        date: None,
    }
}

pub fn date_reference(date: &str) -> ReferenceSelection {
    ReferenceSelection {
        sequence_id: None,
        location_id: None,
        date: Some(date.to_string()),
    }
}

/// Seeds an in-memory database with one production, three departments,
/// the shooting start (Monday 2024-03-04), one sequence (`seq-9` on
/// Wednesday 2024-03-13), and a three-day location (`loc-stage`,
/// 2024-03-12 through 2024-03-14).
pub fn setup_test_persistence() -> Persistence {
    let mut persistence = Persistence::new_in_memory().expect("Failed to create database");
    let admin = create_production_actor();

    create_production(
        &mut persistence,
        &CreateProductionRequest {
            name: String::from(PRODUCTION),
        },
        &admin,
        create_test_cause(),
    )
    .expect("Failed to create production");

    for department in ["production", "grip", "electric"] {
        create_department(
            &mut persistence,
            &CreateDepartmentRequest {
                production: String::from(PRODUCTION),
                name: String::from(department),
            },
            &admin,
            create_test_cause(),
        )
        .expect("Failed to create department");
    }

    set_shooting_start(
        &mut persistence,
        &SetShootingStartRequest {
            production: String::from(PRODUCTION),
            shooting_start_date: Some(String::from("2024-03-04")),
        },
        &admin,
        create_test_cause(),
    )
    .expect("Failed to set shooting start");

    upsert_sequence(
        &mut persistence,
        &UpsertSequenceRequest {
            production: String::from(PRODUCTION),
            sequence_id: String::from("seq-9"),
            date: String::from("2024-03-13"),
            decor: Some(String::from("Warehouse")),
        },
        &admin,
    )
    .expect("Failed to create sequence");

    for day in ["2024-03-12", "2024-03-13", "2024-03-14"] {
        upsert_production_day(
            &mut persistence,
            &UpsertProductionDayRequest {
                production: String::from(PRODUCTION),
                date: String::from(day),
                location: Some(String::from("loc-stage")),
                linked_location: None,
            },
            &admin,
        )
        .expect("Failed to create production day");
    }

    persistence
}
