// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Queries for reinforcement records.
//!
//! The read path owns legacy normalization: a record still carrying a flat
//! name list is converted into staff entries the first time it is read, so
//! the two shapes never coexist past that point and no other code path has
//! to know the legacy shape existed.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{ReinforcementRow, ReinforcementStaffRow};
use crate::diesel_schema::{reinforcement_staff, reinforcements};
use crate::error::PersistenceError;
use crate::mutations::reinforcements::normalize_legacy_record;
use callsheet_domain::{Department, Reinforcement, parse_date};

/// Loads the staff entries of one record, ordered by position.
fn load_staff(
    conn: &mut SqliteConnection,
    reinforcement_id: i64,
) -> Result<Vec<callsheet_domain::ReinforcementDetail>, PersistenceError> {
    let rows: Vec<ReinforcementStaffRow> = reinforcement_staff::table
        .filter(reinforcement_staff::reinforcement_id.eq(reinforcement_id))
        .order(reinforcement_staff::position.asc())
        .load(conn)?;

    rows.into_iter()
        .map(ReinforcementStaffRow::into_domain)
        .collect()
}

/// Reconstructs one record, normalizing it first if it is legacy-shaped.
fn row_into_domain(
    conn: &mut SqliteConnection,
    row: ReinforcementRow,
) -> Result<Reinforcement, PersistenceError> {
    if let Some(names_json) = &row.legacy_names_json {
        normalize_legacy_record(conn, row.reinforcement_id, names_json)?;
    }

    let staff = load_staff(conn, row.reinforcement_id)?;

    Ok(Reinforcement {
        reinforcement_id: Some(row.reinforcement_id),
        date: parse_date(&row.call_date)?,
        department: Department::new(&row.department),
        staff,
    })
}

/// Lists every reinforcement record of a production, ordered by date.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_reinforcements(
    conn: &mut SqliteConnection,
    production_id: i64,
) -> Result<Vec<Reinforcement>, PersistenceError> {
    let rows: Vec<ReinforcementRow> = reinforcements::table
        .filter(reinforcements::production_id.eq(production_id))
        .order((
            reinforcements::call_date.asc(),
            reinforcements::department.asc(),
        ))
        .load(conn)?;

    rows.into_iter()
        .map(|row| row_into_domain(conn, row))
        .collect()
}

/// Loads the record for `(production, date, department)`, if it exists.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be reconstructed.
pub fn get_reinforcement(
    conn: &mut SqliteConnection,
    production_id: i64,
    date: time::Date,
    department: &Department,
) -> Result<Option<Reinforcement>, PersistenceError> {
    let row: Option<ReinforcementRow> = reinforcements::table
        .filter(reinforcements::production_id.eq(production_id))
        .filter(reinforcements::call_date.eq(callsheet_domain::format_date(date)))
        .filter(reinforcements::department.eq(department.name()))
        .first(conn)
        .optional()?;

    row.map(|row| row_into_domain(conn, row)).transpose()
}
