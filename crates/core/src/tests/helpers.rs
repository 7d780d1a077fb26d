// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::state::{BoardMetadata, ScheduleState};
use callsheet_audit::{Actor, Cause};
use callsheet_domain::{
    Department, GroupId, LinkPhase, LinkRef, LogisticsRequest, Production, Reinforcement,
    ReinforcementDetail, RequestKind, ScheduleLink, ValidationStatus,
};
use time::{Date, Month};

pub fn test_date(day: u8) -> Date {
    Date::from_calendar_date(2024, Month::March, day).expect("Valid test date")
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("prod-office-1"), String::from("production"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-123"), String::from("Test request"))
}

pub fn create_test_metadata() -> BoardMetadata {
    let mut metadata: BoardMetadata = BoardMetadata::new();
    let production: Production = Production::new("Night Shift");
    metadata.productions.push(production.clone());
    metadata
        .departments
        .push((production.clone(), Department::new("grip")));
    metadata
        .departments
        .push((production.clone(), Department::new("electric")));
    metadata
        .departments
        .push((production, Department::production()));
    metadata
}

fn leg(
    request_id: i64,
    kind: RequestKind,
    day: u8,
    group: &GroupId,
) -> LogisticsRequest {
    let mut request = LogisticsRequest::new(kind, test_date(day), Department::new("grip"));
    request.request_id = Some(request_id);
    request.group_id = Some(group.clone());
    request
}

/// Seeds a state with one round-trip group (ids 1-3), one free-standing
/// usage entry (id 4), and one reinforcement record with two staff entries.
pub fn create_test_state() -> ScheduleState {
    let mut state = ScheduleState::new(Production::new("Night Shift"));
    let group = GroupId::new("grp-1").expect("Valid group id");

    // Tuesday pickup, Wednesday usage (sequence-linked), Thursday dropoff
    state.logistics.push(leg(1, RequestKind::Pickup, 5, &group));
    let usage = leg(2, RequestKind::Usage, 6, &group).with_link(
        ScheduleLink::new(
            LinkRef::Sequence(String::from("seq-9")),
            LinkPhase::Shooting,
            0,
            1,
        )
        .expect("Valid link"),
    );
    state.logistics.push(usage);
    state.logistics.push(leg(3, RequestKind::Dropoff, 7, &group));

    let mut free = LogisticsRequest::new(
        RequestKind::Usage,
        test_date(13),
        Department::new("grip"),
    );
    free.request_id = Some(4);
    state.logistics.push(free);

    let mut record = Reinforcement::new(test_date(6), Department::new("electric"));
    record.reinforcement_id = Some(10);
    record.staff.push(ReinforcementDetail::new(
        String::from("staff-1"),
        String::from("Alex Martin"),
        ValidationStatus::Pending,
    ));
    record.staff.push(ReinforcementDetail::new(
        String::from("staff-2"),
        String::from("Sam Riva"),
        ValidationStatus::Approved,
    ));
    state.reinforcements.push(record);

    state
}
