// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Queries for logistics requests.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::LogisticsRequestRow;
use crate::diesel_schema::logistics_requests;
use crate::error::PersistenceError;
use callsheet_domain::LogisticsRequest;

/// Loads one logistics request by its canonical id.
///
/// # Errors
///
/// Returns an error if the request does not exist or cannot be
/// reconstructed.
pub fn get_logistics_request(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<LogisticsRequest, PersistenceError> {
    let row: LogisticsRequestRow = logistics_requests::table
        .filter(logistics_requests::request_id.eq(request_id))
        .first(conn)
        .optional()?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!("Logistics request {request_id} does not exist"))
        })?;

    row.into_domain()
}

/// Lists every logistics request of a production, ordered by date.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_logistics(
    conn: &mut SqliteConnection,
    production_id: i64,
) -> Result<Vec<LogisticsRequest>, PersistenceError> {
    let rows: Vec<LogisticsRequestRow> = logistics_requests::table
        .filter(logistics_requests::production_id.eq(production_id))
        .order((
            logistics_requests::request_date.asc(),
            logistics_requests::request_id.asc(),
        ))
        .load(conn)?;

    rows.into_iter()
        .map(LogisticsRequestRow::into_domain)
        .collect()
}
