// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Queries for the read-only reference tables (day table and sequences).

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{ProductionDayRow, SequenceRow};
use crate::diesel_schema::{production_days, sequences};
use crate::error::PersistenceError;
use callsheet_domain::{ProductionDay, Sequence};

/// Lists the production days of a production, ordered by date.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_production_days(
    conn: &mut SqliteConnection,
    production_id: i64,
) -> Result<Vec<ProductionDay>, PersistenceError> {
    let rows: Vec<ProductionDayRow> = production_days::table
        .filter(production_days::production_id.eq(production_id))
        .order(production_days::day_date.asc())
        .load(conn)?;

    rows.into_iter().map(ProductionDayRow::into_domain).collect()
}

/// Lists the sequences of a production, ordered by date.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_sequences(
    conn: &mut SqliteConnection,
    production_id: i64,
) -> Result<Vec<Sequence>, PersistenceError> {
    let rows: Vec<SequenceRow> = sequences::table
        .filter(sequences::production_id.eq(production_id))
        .order(sequences::seq_date.asc())
        .load(conn)?;

    rows.into_iter().map(SequenceRow::into_domain).collect()
}
