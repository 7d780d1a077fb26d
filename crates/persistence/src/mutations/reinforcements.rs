// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutations for reinforcement records and their staff entries.
//!
//! A reinforcement record exists iff it has staff: adding the first entry
//! creates the record, removing the last one deletes it. Legacy records
//! that still carry a flat name list are normalized here, once, when the
//! read path encounters them.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{date_to_column, link_to_columns};
use crate::diesel_schema::{reinforcement_staff, reinforcements};
use crate::error::PersistenceError;
use callsheet_domain::{Department, ReinforcementDetail, ValidationStatus};

/// Looks up the record id for `(production, date, department)`, creating
/// the record if absent.
///
/// # Errors
///
/// Returns an error if the lookup or insert fails.
pub fn ensure_record(
    conn: &mut SqliteConnection,
    production_id: i64,
    date: time::Date,
    department: &Department,
) -> Result<i64, PersistenceError> {
    let existing: Option<i64> = reinforcements::table
        .select(reinforcements::reinforcement_id)
        .filter(reinforcements::production_id.eq(production_id))
        .filter(reinforcements::call_date.eq(date_to_column(date)))
        .filter(reinforcements::department.eq(department.name()))
        .first(conn)
        .optional()?;

    if let Some(reinforcement_id) = existing {
        return Ok(reinforcement_id);
    }

    diesel::insert_into(reinforcements::table)
        .values((
            reinforcements::production_id.eq(production_id),
            reinforcements::call_date.eq(date_to_column(date)),
            reinforcements::department.eq(department.name()),
        ))
        .execute(conn)?;

    let reinforcement_id = get_last_insert_rowid(conn)?;
    debug!(
        reinforcement_id,
        production_id,
        department = department.name(),
        "Created reinforcement record"
    );
    Ok(reinforcement_id)
}

/// Inserts one staff entry at the given position.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g., duplicate staff id).
pub fn insert_staff(
    conn: &mut SqliteConnection,
    reinforcement_id: i64,
    position: i32,
    detail: &ReinforcementDetail,
) -> Result<(), PersistenceError> {
    let (linked_sequence_id, linked_location, link_phase, day_offset, duration) =
        link_to_columns(detail.link.as_ref());

    diesel::insert_into(reinforcement_staff::table)
        .values((
            reinforcement_staff::staff_id.eq(&detail.staff_id),
            reinforcement_staff::reinforcement_id.eq(reinforcement_id),
            reinforcement_staff::position.eq(position),
            reinforcement_staff::name.eq(&detail.name),
            reinforcement_staff::phone.eq(detail.phone.as_deref()),
            reinforcement_staff::email.eq(detail.email.as_deref()),
            reinforcement_staff::role.eq(detail.role.as_deref()),
            reinforcement_staff::linked_sequence_id.eq(linked_sequence_id),
            reinforcement_staff::linked_location.eq(linked_location),
            reinforcement_staff::link_phase.eq(link_phase),
            reinforcement_staff::day_offset.eq(day_offset),
            reinforcement_staff::duration.eq(duration),
            reinforcement_staff::validation_status.eq(detail.validation_status.as_str()),
        ))
        .execute(conn)?;
    Ok(())
}

/// Adds a staff entry to the record of a date and department, creating the
/// record if absent.
///
/// Runs in one transaction: the record and the entry land together.
///
/// # Errors
///
/// Returns an error if any write fails (the transaction rolls back).
pub fn add_staff(
    conn: &mut SqliteConnection,
    production_id: i64,
    date: time::Date,
    department: &Department,
    detail: &ReinforcementDetail,
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        let reinforcement_id = ensure_record(conn, production_id, date, department)?;

        let next_position: i32 = reinforcement_staff::table
            .select(diesel::dsl::max(reinforcement_staff::position))
            .filter(reinforcement_staff::reinforcement_id.eq(reinforcement_id))
            .first::<Option<i32>>(conn)?
            .map_or(0, |max| max + 1);

        insert_staff(conn, reinforcement_id, next_position, detail)?;

        debug!(
            reinforcement_id,
            staff_id = detail.staff_id.as_str(),
            "Added reinforcement staff"
        );
        Ok(reinforcement_id)
    })
}

/// Removes a staff entry from the record of a date and department,
/// deleting the record when it empties.
///
/// # Errors
///
/// Returns an error if the record or the entry does not exist.
pub fn remove_staff(
    conn: &mut SqliteConnection,
    production_id: i64,
    date: time::Date,
    department: &Department,
    staff_id: &str,
) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        let reinforcement_id: i64 = reinforcements::table
            .select(reinforcements::reinforcement_id)
            .filter(reinforcements::production_id.eq(production_id))
            .filter(reinforcements::call_date.eq(date_to_column(date)))
            .filter(reinforcements::department.eq(department.name()))
            .first(conn)
            .optional()?
            .ok_or_else(|| {
                PersistenceError::NotFound(format!(
                    "No reinforcement record for {date} in department '{}'",
                    department.name()
                ))
            })?;

        let deleted = diesel::delete(
            reinforcement_staff::table
                .filter(reinforcement_staff::reinforcement_id.eq(reinforcement_id))
                .filter(reinforcement_staff::staff_id.eq(staff_id)),
        )
        .execute(conn)?;

        if deleted == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Staff entry '{staff_id}' does not exist"
            )));
        }

        let remaining: i64 = reinforcement_staff::table
            .filter(reinforcement_staff::reinforcement_id.eq(reinforcement_id))
            .count()
            .get_result(conn)?;

        if remaining == 0 {
            diesel::delete(
                reinforcements::table
                    .filter(reinforcements::reinforcement_id.eq(reinforcement_id)),
            )
            .execute(conn)?;
            debug!(reinforcement_id, "Deleted emptied reinforcement record");
        }

        Ok(())
    })
}

/// Replaces the editable fields of a staff entry.
///
/// # Errors
///
/// Returns an error if the entry does not exist or the write fails.
pub fn update_staff(
    conn: &mut SqliteConnection,
    detail: &ReinforcementDetail,
) -> Result<(), PersistenceError> {
    let (linked_sequence_id, linked_location, link_phase, day_offset, duration) =
        link_to_columns(detail.link.as_ref());

    let updated = diesel::update(
        reinforcement_staff::table
            .filter(reinforcement_staff::staff_id.eq(&detail.staff_id)),
    )
    .set((
        reinforcement_staff::name.eq(&detail.name),
        reinforcement_staff::phone.eq(detail.phone.as_deref()),
        reinforcement_staff::email.eq(detail.email.as_deref()),
        reinforcement_staff::role.eq(detail.role.as_deref()),
        reinforcement_staff::linked_sequence_id.eq(linked_sequence_id),
        reinforcement_staff::linked_location.eq(linked_location),
        reinforcement_staff::link_phase.eq(link_phase),
        reinforcement_staff::day_offset.eq(day_offset),
        reinforcement_staff::duration.eq(duration),
        reinforcement_staff::validation_status.eq(detail.validation_status.as_str()),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Staff entry '{}' does not exist",
            detail.staff_id
        )));
    }
    Ok(())
}

/// Sets the validation status of a staff entry.
///
/// # Errors
///
/// Returns an error if the entry does not exist or the write fails.
pub fn set_staff_validation(
    conn: &mut SqliteConnection,
    staff_id: &str,
    status: ValidationStatus,
) -> Result<(), PersistenceError> {
    let updated = diesel::update(
        reinforcement_staff::table.filter(reinforcement_staff::staff_id.eq(staff_id)),
    )
    .set(reinforcement_staff::validation_status.eq(status.as_str()))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Staff entry '{staff_id}' does not exist"
        )));
    }
    Ok(())
}

/// Inserts a legacy-shaped record carrying a flat name list.
///
/// This is the import seam for data migrated from the previous system;
/// the read path normalizes such records into staff entries on first
/// contact.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_legacy_record(
    conn: &mut SqliteConnection,
    production_id: i64,
    date: time::Date,
    department: &Department,
    names: &[String],
) -> Result<i64, PersistenceError> {
    let names_json = serde_json::to_string(names)?;

    diesel::insert_into(reinforcements::table)
        .values((
            reinforcements::production_id.eq(production_id),
            reinforcements::call_date.eq(date_to_column(date)),
            reinforcements::department.eq(department.name()),
            reinforcements::legacy_names_json.eq(names_json),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Normalizes one legacy record: synthesizes a pending staff entry per
/// name and clears the flat list, in one transaction.
///
/// After normalization the flat list and the staff entries never coexist.
///
/// # Errors
///
/// Returns an error if the stored list cannot be parsed or a write fails.
pub fn normalize_legacy_record(
    conn: &mut SqliteConnection,
    reinforcement_id: i64,
    names_json: &str,
) -> Result<(), PersistenceError> {
    let names: Vec<String> = serde_json::from_str(names_json)?;

    conn.transaction(|conn| {
        for (index, name) in names.iter().enumerate() {
            let position = i32::try_from(index).unwrap_or(i32::MAX);
            let detail = ReinforcementDetail::new(
                format!("legacy-{reinforcement_id}-{index}"),
                name.clone(),
                ValidationStatus::Pending,
            );
            insert_staff(conn, reinforcement_id, position, &detail)?;
        }

        diesel::update(
            reinforcements::table.filter(reinforcements::reinforcement_id.eq(reinforcement_id)),
        )
        .set(reinforcements::legacy_names_json.eq(None::<String>))
        .execute(conn)?;

        info!(
            reinforcement_id,
            count = names.len(),
            "Normalized legacy reinforcement record"
        );
        Ok(())
    })
}
