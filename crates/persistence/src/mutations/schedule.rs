// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutations for logistics requests.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{date_to_column, link_to_columns};
use crate::diesel_schema::logistics_requests;
use crate::error::PersistenceError;
use callsheet_domain::LogisticsRequest;

/// Inserts one logistics request leg and returns its canonical id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_logistics_request(
    conn: &mut SqliteConnection,
    production_id: i64,
    request: &LogisticsRequest,
) -> Result<i64, PersistenceError> {
    let (linked_sequence_id, linked_location, link_phase, day_offset, duration) =
        link_to_columns(request.link.as_ref());

    diesel::insert_into(logistics_requests::table)
        .values((
            logistics_requests::production_id.eq(production_id),
            logistics_requests::group_id.eq(request.group_id.as_ref().map(|g| g.value())),
            logistics_requests::kind.eq(request.kind.as_str()),
            logistics_requests::request_date.eq(date_to_column(request.date)),
            logistics_requests::department.eq(request.department.name()),
            logistics_requests::time_note.eq(request.time_note.as_deref()),
            logistics_requests::location.eq(request.location.as_deref()),
            logistics_requests::description.eq(request.description.as_deref()),
            logistics_requests::vehicle_type.eq(request.vehicle_type.as_deref()),
            logistics_requests::linked_sequence_id.eq(linked_sequence_id),
            logistics_requests::linked_location.eq(linked_location),
            logistics_requests::link_phase.eq(link_phase),
            logistics_requests::day_offset.eq(day_offset),
            logistics_requests::duration.eq(duration),
            logistics_requests::auto_update_dates.eq(i32::from(request.auto_update_dates)),
            logistics_requests::status.eq(request.status.as_str()),
        ))
        .execute(conn)?;

    let request_id = get_last_insert_rowid(conn)?;
    debug!(
        request_id,
        production_id,
        kind = request.kind.as_str(),
        "Inserted logistics request"
    );
    Ok(request_id)
}

/// Inserts the legs of a round-trip group in one transaction.
///
/// All legs land together or not at all; the returned ids are in leg order.
///
/// # Errors
///
/// Returns an error if any insert fails (the transaction rolls back).
pub fn insert_logistics_group(
    conn: &mut SqliteConnection,
    production_id: i64,
    legs: &[LogisticsRequest],
) -> Result<Vec<i64>, PersistenceError> {
    conn.transaction(|conn| {
        legs.iter()
            .map(|leg| insert_logistics_request(conn, production_id, leg))
            .collect()
    })
}

/// Replaces every editable column of a persisted request.
///
/// # Errors
///
/// Returns an error if the request does not exist or the write fails.
pub fn update_logistics_request(
    conn: &mut SqliteConnection,
    request: &LogisticsRequest,
) -> Result<(), PersistenceError> {
    let request_id = request.request_id.ok_or_else(|| {
        PersistenceError::Other(String::from("Cannot update a request without an id"))
    })?;

    let (linked_sequence_id, linked_location, link_phase, day_offset, duration) =
        link_to_columns(request.link.as_ref());

    let updated = diesel::update(
        logistics_requests::table.filter(logistics_requests::request_id.eq(request_id)),
    )
    .set((
        logistics_requests::group_id.eq(request.group_id.as_ref().map(|g| g.value())),
        logistics_requests::kind.eq(request.kind.as_str()),
        logistics_requests::request_date.eq(date_to_column(request.date)),
        logistics_requests::department.eq(request.department.name()),
        logistics_requests::time_note.eq(request.time_note.as_deref()),
        logistics_requests::location.eq(request.location.as_deref()),
        logistics_requests::description.eq(request.description.as_deref()),
        logistics_requests::vehicle_type.eq(request.vehicle_type.as_deref()),
        logistics_requests::linked_sequence_id.eq(linked_sequence_id),
        logistics_requests::linked_location.eq(linked_location),
        logistics_requests::link_phase.eq(link_phase),
        logistics_requests::day_offset.eq(day_offset),
        logistics_requests::duration.eq(duration),
        logistics_requests::auto_update_dates.eq(i32::from(request.auto_update_dates)),
        logistics_requests::status.eq(request.status.as_str()),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Logistics request {request_id} does not exist"
        )));
    }
    Ok(())
}

/// Moves one request to a new date, optionally clearing its link fields.
///
/// This is the per-entry write behind the drag-cascade: callers invoke it
/// once per entry and do not wrap the calls in a transaction.
///
/// # Errors
///
/// Returns an error if the request does not exist or the write fails.
pub fn apply_request_move(
    conn: &mut SqliteConnection,
    request_id: i64,
    new_date: time::Date,
    clear_link: bool,
) -> Result<(), PersistenceError> {
    let updated = if clear_link {
        diesel::update(
            logistics_requests::table.filter(logistics_requests::request_id.eq(request_id)),
        )
        .set((
            logistics_requests::request_date.eq(date_to_column(new_date)),
            logistics_requests::linked_sequence_id.eq(None::<String>),
            logistics_requests::linked_location.eq(None::<String>),
            logistics_requests::link_phase.eq(None::<String>),
            logistics_requests::day_offset.eq(None::<i64>),
            logistics_requests::duration.eq(None::<i32>),
            logistics_requests::auto_update_dates.eq(0),
        ))
        .execute(conn)?
    } else {
        diesel::update(
            logistics_requests::table.filter(logistics_requests::request_id.eq(request_id)),
        )
        .set(logistics_requests::request_date.eq(date_to_column(new_date)))
        .execute(conn)?
    };

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Logistics request {request_id} does not exist"
        )));
    }

    debug!(request_id, clear_link, "Moved logistics request");
    Ok(())
}

/// Deletes a logistics request.
///
/// # Errors
///
/// Returns an error if the request does not exist or the delete fails.
pub fn delete_logistics_request(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<(), PersistenceError> {
    let deleted = diesel::delete(
        logistics_requests::table.filter(logistics_requests::request_id.eq(request_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Logistics request {request_id} does not exist"
        )));
    }

    debug!(request_id, "Deleted logistics request");
    Ok(())
}
