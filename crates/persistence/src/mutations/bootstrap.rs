// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutations for productions, departments, and the reference tables.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::date_to_column;
use crate::diesel_schema::{departments, production_days, productions, sequences};
use crate::error::PersistenceError;
use callsheet_domain::{ProductionDay, Sequence};

/// Inserts a new production and returns its canonical id.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g., duplicate name).
pub fn insert_production(conn: &mut SqliteConnection, name: &str) -> Result<i64, PersistenceError> {
    diesel::insert_into(productions::table)
        .values(productions::name.eq(name))
        .execute(conn)?;

    let production_id = get_last_insert_rowid(conn)?;
    debug!(production_id, name, "Inserted production");
    Ok(production_id)
}

/// Sets or clears a production's shooting start date.
///
/// # Errors
///
/// Returns an error if the production does not exist.
pub fn update_shooting_start(
    conn: &mut SqliteConnection,
    production_id: i64,
    shooting_start: Option<time::Date>,
) -> Result<(), PersistenceError> {
    let value = shooting_start.map(date_to_column);
    let updated = diesel::update(
        productions::table.filter(productions::production_id.eq(production_id)),
    )
    .set(productions::shooting_start_date.eq(value))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Production {production_id} does not exist"
        )));
    }
    Ok(())
}

/// Inserts a new department and returns its canonical id.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g., duplicate name within the
/// production).
pub fn insert_department(
    conn: &mut SqliteConnection,
    production_id: i64,
    name: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(departments::table)
        .values((
            departments::production_id.eq(production_id),
            departments::name.eq(name),
        ))
        .execute(conn)?;

    let department_id = get_last_insert_rowid(conn)?;
    debug!(department_id, production_id, name, "Inserted department");
    Ok(department_id)
}

/// Upserts a production day by `(production, date)`.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_production_day(
    conn: &mut SqliteConnection,
    production_id: i64,
    day: &ProductionDay,
) -> Result<(), PersistenceError> {
    diesel::insert_into(production_days::table)
        .values((
            production_days::production_id.eq(production_id),
            production_days::day_date.eq(date_to_column(day.date)),
            production_days::location.eq(day.location.as_deref()),
            production_days::linked_location.eq(day.linked_location.as_deref()),
        ))
        .on_conflict((production_days::production_id, production_days::day_date))
        .do_update()
        .set((
            production_days::location.eq(day.location.as_deref()),
            production_days::linked_location.eq(day.linked_location.as_deref()),
        ))
        .execute(conn)?;
    Ok(())
}

/// Upserts a sequence by `(production, sequence_id)`.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_sequence(
    conn: &mut SqliteConnection,
    production_id: i64,
    sequence: &Sequence,
) -> Result<(), PersistenceError> {
    diesel::insert_into(sequences::table)
        .values((
            sequences::production_id.eq(production_id),
            sequences::sequence_id.eq(&sequence.sequence_id),
            sequences::seq_date.eq(date_to_column(sequence.date)),
            sequences::decor.eq(sequence.decor.as_deref()),
        ))
        .on_conflict((sequences::production_id, sequences::sequence_id))
        .do_update()
        .set((
            sequences::seq_date.eq(date_to_column(sequence.date)),
            sequences::decor.eq(sequence.decor.as_deref()),
        ))
        .execute(conn)?;
    Ok(())
}
