// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Queries for productions and departments.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::diesel_schema::{departments, productions};
use crate::error::PersistenceError;
use callsheet_domain::{Department, Production, parse_date};

/// Looks up the canonical `production_id` from the production name.
///
/// # Errors
///
/// Returns an error if the production does not exist.
pub fn lookup_production_id(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<i64, PersistenceError> {
    let result = productions::table
        .select(productions::production_id)
        .filter(productions::name.eq(name))
        .first::<i64>(conn);

    match result {
        Ok(id) => Ok(id),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::NotFound(format!(
            "Production '{name}' does not exist"
        ))),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Reconstructs a production from its stored row.
fn production_from_row(
    production_id: i64,
    name: String,
    shooting_start_date: Option<String>,
) -> Result<Production, PersistenceError> {
    let shooting_start = match shooting_start_date {
        Some(raw) => Some(parse_date(&raw)?),
        None => None,
    };
    Ok(Production::with_id(production_id, name, shooting_start))
}

/// Loads a production by name.
///
/// # Errors
///
/// Returns an error if the production does not exist.
pub fn get_production(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Production, PersistenceError> {
    let row: (i64, String, Option<String>) = productions::table
        .select((
            productions::production_id,
            productions::name,
            productions::shooting_start_date,
        ))
        .filter(productions::name.eq(name))
        .first(conn)
        .optional()?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!("Production '{name}' does not exist"))
        })?;

    production_from_row(row.0, row.1, row.2)
}

/// Lists every production.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_productions(conn: &mut SqliteConnection) -> Result<Vec<Production>, PersistenceError> {
    let rows: Vec<(i64, String, Option<String>)> = productions::table
        .select((
            productions::production_id,
            productions::name,
            productions::shooting_start_date,
        ))
        .order(productions::name.asc())
        .load(conn)?;

    rows.into_iter()
        .map(|(id, name, start)| production_from_row(id, name, start))
        .collect()
}

/// Lists the departments of a production.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_departments(
    conn: &mut SqliteConnection,
    production_id: i64,
) -> Result<Vec<Department>, PersistenceError> {
    let rows: Vec<(i64, String)> = departments::table
        .select((departments::department_id, departments::name))
        .filter(departments::production_id.eq(production_id))
        .order(departments::name.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(id, name)| Department::with_id(id, &name))
        .collect())
}
