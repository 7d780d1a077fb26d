// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::Persistence;
use callsheet_domain::{Department, GroupId, LogisticsRequest, RequestKind};
use time::{Date, Month};

pub fn test_date(day: u8) -> Date {
    Date::from_calendar_date(2024, Month::March, day).expect("Valid test date")
}

/// Creates an in-memory database seeded with one production and two
/// departments; returns the adapter and the production id.
pub fn setup_test_persistence() -> (Persistence, i64) {
    let mut persistence = Persistence::new_in_memory().expect("Failed to create database");
    let production_id = persistence
        .create_production("Night Shift")
        .expect("Failed to create production");
    persistence
        .create_department(production_id, "grip")
        .expect("Failed to create department");
    persistence
        .create_department(production_id, "electric")
        .expect("Failed to create department");
    (persistence, production_id)
}

pub fn make_leg(kind: RequestKind, day: u8, group: Option<&str>) -> LogisticsRequest {
    let mut request = LogisticsRequest::new(kind, test_date(day), Department::new("grip"));
    request.group_id = group.map(|g| GroupId::new(g).expect("Valid group id"));
    request
}
