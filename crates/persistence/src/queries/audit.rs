// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Queries for the audit log.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use callsheet_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};

/// One row of the audit timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditTimelineEntry {
    /// The event's canonical id.
    pub event_id: i64,
    /// When the event was recorded (database timestamp).
    pub created_at: Option<String>,
    /// The reconstructed audit event.
    pub event: AuditEvent,
}

/// Reconstructs an audit event from its serialized columns.
fn event_from_row(
    actor_json: &str,
    cause_json: &str,
    action_json: &str,
    before_json: &str,
    after_json: &str,
) -> Result<AuditEvent, PersistenceError> {
    let actor: ActorData = serde_json::from_str(actor_json)?;
    let cause: CauseData = serde_json::from_str(cause_json)?;
    let action: ActionData = serde_json::from_str(action_json)?;
    let before: StateSnapshotData = serde_json::from_str(before_json)?;
    let after: StateSnapshotData = serde_json::from_str(after_json)?;

    Ok(AuditEvent::new(
        Actor::new(actor.id, actor.actor_type),
        Cause::new(cause.id, cause.description),
        Action::new(action.name, action.details),
        StateSnapshot::new(before.data),
        StateSnapshot::new(after.data),
    ))
}

/// Loads the audit timeline of a production, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored event cannot be
/// deserialized.
pub fn get_audit_timeline(
    conn: &mut SqliteConnection,
    production_id: i64,
) -> Result<Vec<AuditTimelineEntry>, PersistenceError> {
    type Row = (i64, String, String, String, String, String, Option<String>);

    let rows: Vec<Row> = audit_events::table
        .select((
            audit_events::event_id,
            audit_events::actor_json,
            audit_events::cause_json,
            audit_events::action_json,
            audit_events::before_snapshot_json,
            audit_events::after_snapshot_json,
            audit_events::created_at,
        ))
        .filter(audit_events::production_id.eq(production_id))
        .order(audit_events::event_id.asc())
        .load(conn)?;

    rows.into_iter()
        .map(|(event_id, actor, cause, action, before, after, created_at)| {
            Ok(AuditTimelineEntry {
                event_id,
                created_at,
                event: event_from_row(&actor, &cause, &action, &before, &after)?,
            })
        })
        .collect()
}
