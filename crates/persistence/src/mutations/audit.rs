// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutations for the audit log.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use callsheet_audit::AuditEvent;

/// Persists one audit event and returns its event id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `production_id` - The canonical production id, when the event is
///   scoped to one (bootstrap events are global)
/// * `production_name` - The production name, for human-readable timelines
/// * `event` - The audit event to persist
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    production_id: Option<i64>,
    production_name: &str,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let actor_json = serde_json::to_string(&ActorData {
        id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
    })?;
    let cause_json = serde_json::to_string(&CauseData {
        id: event.cause.id.clone(),
        description: event.cause.description.clone(),
    })?;
    let action_json = serde_json::to_string(&ActionData {
        name: event.action.name.clone(),
        details: event.action.details.clone(),
    })?;
    let before_json = serde_json::to_string(&StateSnapshotData {
        data: event.before.data.clone(),
    })?;
    let after_json = serde_json::to_string(&StateSnapshotData {
        data: event.after.data.clone(),
    })?;

    diesel::insert_into(audit_events::table)
        .values((
            audit_events::production_id.eq(production_id),
            audit_events::production_name.eq(production_name),
            audit_events::actor_json.eq(actor_json),
            audit_events::cause_json.eq(cause_json),
            audit_events::action_json.eq(action_json),
            audit_events::before_snapshot_json.eq(before_json),
            audit_events::after_snapshot_json.eq(after_json),
        ))
        .execute(conn)?;

    let event_id = get_last_insert_rowid(conn)?;
    debug!(
        event_id,
        action = event.action.name.as_str(),
        "Persisted audit event"
    );
    Ok(event_id)
}
