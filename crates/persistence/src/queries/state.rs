// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reconstruction of the scoped schedule state.

use diesel::SqliteConnection;

use crate::error::PersistenceError;
use crate::queries::bootstrap::{get_production, list_departments, list_productions};
use crate::queries::reinforcements::list_reinforcements;
use crate::queries::schedule::list_logistics;
use callsheet::{BoardMetadata, ScheduleState};

/// Loads the complete schedule state of a production.
///
/// This is the live read model the UI renders from; it reflects every
/// successful write.
///
/// # Errors
///
/// Returns an error if the production does not exist or a row cannot be
/// reconstructed.
pub fn load_schedule_state(
    conn: &mut SqliteConnection,
    production_name: &str,
) -> Result<ScheduleState, PersistenceError> {
    let production = get_production(conn, production_name)?;
    let production_id = production.production_id().ok_or_else(|| {
        PersistenceError::ReconstructionError(String::from(
            "Loaded production is missing its canonical id",
        ))
    })?;

    let mut state = ScheduleState::new(production);
    state.logistics = list_logistics(conn, production_id)?;
    state.reinforcements = list_reinforcements(conn, production_id)?;
    Ok(state)
}

/// Loads the global board metadata (productions and their departments).
///
/// # Errors
///
/// Returns an error if a query fails or a row cannot be reconstructed.
pub fn load_board_metadata(conn: &mut SqliteConnection) -> Result<BoardMetadata, PersistenceError> {
    let mut metadata = BoardMetadata::new();

    for production in list_productions(conn)? {
        let production_id = production.production_id().ok_or_else(|| {
            PersistenceError::ReconstructionError(String::from(
                "Loaded production is missing its canonical id",
            ))
        })?;
        for department in list_departments(conn, production_id)? {
            metadata
                .departments
                .push((production.clone(), department));
        }
        metadata.productions.push(production);
    }

    Ok(metadata)
}
