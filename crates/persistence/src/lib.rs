// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Callsheet scheduling backend.
//!
//! This crate provides database persistence for the canonical schedule
//! (productions, departments, logistics requests, reinforcements), the
//! read-only reference tables (day table, sequences), and the audit log.
//! It is built on Diesel over `SQLite` with embedded migrations.
//!
//! ## Backend
//!
//! `SQLite` is the only backend: it powers development, unit and
//! integration tests (fast, deterministic, in-memory), and deployments
//! (file-based with WAL). No external infrastructure is required.
//!
//! ## Write semantics
//!
//! - Round-trip group creation and staff record bookkeeping run inside a
//!   connection transaction.
//! - Drag-cascade moves are written one entry at a time with NO enclosing
//!   transaction: a failing sibling leaves the earlier writes in place and
//!   the caller reports partial application. This mirrors the observed
//!   best-effort contract of the system being replaced.
//! - There is no version column; concurrent writers are last-write-wins.
//!
//! ## Testing Philosophy
//!
//! - Standard tests (`cargo test`) run against in-memory `SQLite`
//! - Each in-memory database gets a unique name from an atomic counter,
//!   eliminating time-based collisions

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use callsheet::{BoardMetadata, ScheduleState};
use callsheet_audit::AuditEvent;
use callsheet_domain::{
    Department, LogisticsRequest, Production, ProductionDay, Reinforcement, ReinforcementDetail,
    Sequence, ValidationStatus,
};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use queries::audit::AuditTimelineEntry;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential
/// ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the canonical schedule and the audit log.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ---- Productions and departments ----

    /// Inserts a new production and returns its canonical id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (e.g., duplicate name).
    pub fn create_production(&mut self, name: &str) -> Result<i64, PersistenceError> {
        mutations::bootstrap::insert_production(&mut self.conn, name)
    }

    /// Sets or clears a production's shooting start date.
    ///
    /// # Errors
    ///
    /// Returns an error if the production does not exist.
    pub fn set_shooting_start(
        &mut self,
        production_id: i64,
        shooting_start: Option<time::Date>,
    ) -> Result<(), PersistenceError> {
        mutations::bootstrap::update_shooting_start(&mut self.conn, production_id, shooting_start)
    }

    /// Inserts a new department and returns its canonical id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (e.g., duplicate name).
    pub fn create_department(
        &mut self,
        production_id: i64,
        name: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::bootstrap::insert_department(&mut self.conn, production_id, name)
    }

    /// Looks up the canonical `production_id` from the production name.
    ///
    /// # Errors
    ///
    /// Returns an error if the production does not exist.
    pub fn get_production_id(&mut self, name: &str) -> Result<i64, PersistenceError> {
        queries::bootstrap::lookup_production_id(&mut self.conn, name)
    }

    /// Loads a production by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the production does not exist.
    pub fn get_production(&mut self, name: &str) -> Result<Production, PersistenceError> {
        queries::bootstrap::get_production(&mut self.conn, name)
    }

    /// Lists every production.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_productions(&mut self) -> Result<Vec<Production>, PersistenceError> {
        queries::bootstrap::list_productions(&mut self.conn)
    }

    /// Lists the departments of a production.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_departments(
        &mut self,
        production_id: i64,
    ) -> Result<Vec<Department>, PersistenceError> {
        queries::bootstrap::list_departments(&mut self.conn, production_id)
    }

    /// Loads the global board metadata (productions and departments).
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn load_board_metadata(&mut self) -> Result<BoardMetadata, PersistenceError> {
        queries::state::load_board_metadata(&mut self.conn)
    }

    // ---- Reference tables ----

    /// Upserts a production day by `(production, date)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_production_day(
        &mut self,
        production_id: i64,
        day: &ProductionDay,
    ) -> Result<(), PersistenceError> {
        mutations::bootstrap::upsert_production_day(&mut self.conn, production_id, day)
    }

    /// Upserts a sequence by `(production, sequence_id)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_sequence(
        &mut self,
        production_id: i64,
        sequence: &Sequence,
    ) -> Result<(), PersistenceError> {
        mutations::bootstrap::upsert_sequence(&mut self.conn, production_id, sequence)
    }

    /// Lists the production days of a production, ordered by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_production_days(
        &mut self,
        production_id: i64,
    ) -> Result<Vec<ProductionDay>, PersistenceError> {
        queries::reference::list_production_days(&mut self.conn, production_id)
    }

    /// Lists the sequences of a production, ordered by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_sequences(
        &mut self,
        production_id: i64,
    ) -> Result<Vec<Sequence>, PersistenceError> {
        queries::reference::list_sequences(&mut self.conn, production_id)
    }

    // ---- Logistics requests ----

    /// Inserts the legs of a round-trip group in one transaction and
    /// returns their canonical ids in leg order.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails (the transaction rolls back).
    pub fn insert_logistics_group(
        &mut self,
        production_id: i64,
        legs: &[LogisticsRequest],
    ) -> Result<Vec<i64>, PersistenceError> {
        mutations::schedule::insert_logistics_group(&mut self.conn, production_id, legs)
    }

    /// Replaces every editable column of a persisted request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not exist or the write fails.
    pub fn update_logistics_request(
        &mut self,
        request: &LogisticsRequest,
    ) -> Result<(), PersistenceError> {
        mutations::schedule::update_logistics_request(&mut self.conn, request)
    }

    /// Moves one request to a new date, optionally clearing its link
    /// fields. One write per entry; cascades are not transactional.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not exist or the write fails.
    pub fn apply_request_move(
        &mut self,
        request_id: i64,
        new_date: time::Date,
        clear_link: bool,
    ) -> Result<(), PersistenceError> {
        mutations::schedule::apply_request_move(&mut self.conn, request_id, new_date, clear_link)
    }

    /// Deletes a logistics request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not exist.
    pub fn delete_logistics_request(&mut self, request_id: i64) -> Result<(), PersistenceError> {
        mutations::schedule::delete_logistics_request(&mut self.conn, request_id)
    }

    /// Loads one logistics request by its canonical id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not exist.
    pub fn get_logistics_request(
        &mut self,
        request_id: i64,
    ) -> Result<LogisticsRequest, PersistenceError> {
        queries::schedule::get_logistics_request(&mut self.conn, request_id)
    }

    /// Lists every logistics request of a production, ordered by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_logistics(
        &mut self,
        production_id: i64,
    ) -> Result<Vec<LogisticsRequest>, PersistenceError> {
        queries::schedule::list_logistics(&mut self.conn, production_id)
    }

    // ---- Reinforcements ----

    /// Adds a staff entry to the record of a date and department, creating
    /// the record if absent. Returns the record's canonical id.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails.
    pub fn add_staff(
        &mut self,
        production_id: i64,
        date: time::Date,
        department: &Department,
        detail: &ReinforcementDetail,
    ) -> Result<i64, PersistenceError> {
        mutations::reinforcements::add_staff(&mut self.conn, production_id, date, department, detail)
    }

    /// Removes a staff entry, deleting its record when it empties.
    ///
    /// # Errors
    ///
    /// Returns an error if the record or the entry does not exist.
    pub fn remove_staff(
        &mut self,
        production_id: i64,
        date: time::Date,
        department: &Department,
        staff_id: &str,
    ) -> Result<(), PersistenceError> {
        mutations::reinforcements::remove_staff(
            &mut self.conn,
            production_id,
            date,
            department,
            staff_id,
        )
    }

    /// Replaces the editable fields of a staff entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist.
    pub fn update_staff(&mut self, detail: &ReinforcementDetail) -> Result<(), PersistenceError> {
        mutations::reinforcements::update_staff(&mut self.conn, detail)
    }

    /// Sets the validation status of a staff entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist.
    pub fn set_staff_validation(
        &mut self,
        staff_id: &str,
        status: ValidationStatus,
    ) -> Result<(), PersistenceError> {
        mutations::reinforcements::set_staff_validation(&mut self.conn, staff_id, status)
    }

    /// Inserts a legacy-shaped record carrying a flat name list (the import
    /// seam for data migrated from the previous system).
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_legacy_reinforcement(
        &mut self,
        production_id: i64,
        date: time::Date,
        department: &Department,
        names: &[String],
    ) -> Result<i64, PersistenceError> {
        mutations::reinforcements::insert_legacy_record(
            &mut self.conn,
            production_id,
            date,
            department,
            names,
        )
    }

    /// Lists every reinforcement record of a production, normalizing any
    /// legacy-shaped record on the way.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reinforcements(
        &mut self,
        production_id: i64,
    ) -> Result<Vec<Reinforcement>, PersistenceError> {
        queries::reinforcements::list_reinforcements(&mut self.conn, production_id)
    }

    /// Loads the record for `(production, date, department)`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reinforcement(
        &mut self,
        production_id: i64,
        date: time::Date,
        department: &Department,
    ) -> Result<Option<Reinforcement>, PersistenceError> {
        queries::reinforcements::get_reinforcement(&mut self.conn, production_id, date, department)
    }

    // ---- State and audit ----

    /// Loads the complete schedule state of a production.
    ///
    /// # Errors
    ///
    /// Returns an error if the production does not exist.
    pub fn load_schedule_state(
        &mut self,
        production_name: &str,
    ) -> Result<ScheduleState, PersistenceError> {
        queries::state::load_schedule_state(&mut self.conn, production_name)
    }

    /// Persists one audit event and returns its event id.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails.
    pub fn persist_audit_event(
        &mut self,
        production_id: Option<i64>,
        production_name: &str,
        event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        mutations::audit::persist_audit_event(&mut self.conn, production_id, production_name, event)
    }

    /// Loads the audit timeline of a production, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_audit_timeline(
        &mut self,
        production_id: i64,
    ) -> Result<Vec<AuditTimelineEntry>, PersistenceError> {
        queries::audit::get_audit_timeline(&mut self.conn, production_id)
    }
}
