// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PersistenceError;
use callsheet_domain::{
    Department, GroupId, LinkPhase, LinkRef, LogisticsRequest, ProductionDay, ReinforcementDetail,
    RequestKind, RequestStatus, ScheduleLink, Sequence, ValidationStatus, format_date, parse_date,
};

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// Row struct for the `logistics_requests` table.
///
/// Field order matches the Diesel schema column order.
#[derive(Debug, Clone, Queryable)]
pub struct LogisticsRequestRow {
    pub request_id: i64,
    pub production_id: i64,
    pub group_id: Option<String>,
    pub kind: String,
    pub request_date: String,
    pub department: String,
    pub time_note: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub vehicle_type: Option<String>,
    pub linked_sequence_id: Option<String>,
    pub linked_location: Option<String>,
    pub link_phase: Option<String>,
    pub day_offset: Option<i64>,
    pub duration: Option<i32>,
    pub auto_update_dates: i32,
    pub status: String,
}

impl LogisticsRequestRow {
    /// Reconstructs the domain entity from a stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored column cannot be parsed back into its
    /// domain type.
    pub fn into_domain(self) -> Result<LogisticsRequest, PersistenceError> {
        let group_id = match self.group_id {
            Some(value) => Some(GroupId::new(&value)?),
            None => None,
        };

        let link = link_from_columns(
            self.linked_sequence_id,
            self.linked_location,
            self.link_phase,
            self.day_offset,
            self.duration,
        )?;

        Ok(LogisticsRequest {
            request_id: Some(self.request_id),
            group_id,
            kind: RequestKind::from_str(&self.kind)?,
            date: parse_date(&self.request_date)?,
            department: Department::new(&self.department),
            time_note: self.time_note,
            location: self.location,
            description: self.description,
            vehicle_type: self.vehicle_type,
            link,
            auto_update_dates: self.auto_update_dates != 0,
            status: RequestStatus::from_str(&self.status)?,
        })
    }
}

/// Row struct for the `reinforcements` table.
#[derive(Debug, Clone, Queryable)]
pub struct ReinforcementRow {
    pub reinforcement_id: i64,
    pub production_id: i64,
    pub call_date: String,
    pub department: String,
    pub legacy_names_json: Option<String>,
}

/// Row struct for the `reinforcement_staff` table.
#[derive(Debug, Clone, Queryable)]
pub struct ReinforcementStaffRow {
    pub staff_id: String,
    pub reinforcement_id: i64,
    pub position: i32,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub linked_sequence_id: Option<String>,
    pub linked_location: Option<String>,
    pub link_phase: Option<String>,
    pub day_offset: Option<i64>,
    pub duration: Option<i32>,
    pub validation_status: String,
}

impl ReinforcementStaffRow {
    /// Reconstructs the domain entity from a stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored column cannot be parsed back into its
    /// domain type.
    pub fn into_domain(self) -> Result<ReinforcementDetail, PersistenceError> {
        let link = link_from_columns(
            self.linked_sequence_id,
            self.linked_location,
            self.link_phase,
            self.day_offset,
            self.duration,
        )?;

        Ok(ReinforcementDetail {
            staff_id: self.staff_id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            role: self.role,
            link,
            validation_status: ValidationStatus::from_str(&self.validation_status)?,
        })
    }
}

/// Row struct for the `production_days` table.
#[derive(Debug, Clone, Queryable)]
pub struct ProductionDayRow {
    pub production_day_id: i64,
    pub production_id: i64,
    pub day_date: String,
    pub location: Option<String>,
    pub linked_location: Option<String>,
}

impl ProductionDayRow {
    /// Reconstructs the domain entity from a stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored date cannot be parsed.
    pub fn into_domain(self) -> Result<ProductionDay, PersistenceError> {
        Ok(ProductionDay {
            date: parse_date(&self.day_date)?,
            location: self.location,
            linked_location: self.linked_location,
        })
    }
}

/// Row struct for the `sequences` table.
#[derive(Debug, Clone, Queryable)]
pub struct SequenceRow {
    pub production_id: i64,
    pub sequence_id: String,
    pub seq_date: String,
    pub decor: Option<String>,
}

impl SequenceRow {
    /// Reconstructs the domain entity from a stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored date cannot be parsed.
    pub fn into_domain(self) -> Result<Sequence, PersistenceError> {
        Ok(Sequence {
            sequence_id: self.sequence_id,
            date: parse_date(&self.seq_date)?,
            decor: self.decor,
        })
    }
}

/// The flat column tuple a `ScheduleLink` is stored as.
pub type LinkColumns = (
    Option<String>,
    Option<String>,
    Option<String>,
    Option<i64>,
    Option<i32>,
);

/// Flattens an optional link into its storage columns.
#[must_use]
pub fn link_to_columns(link: Option<&ScheduleLink>) -> LinkColumns {
    link.map_or((None, None, None, None, None), |l| {
        (
            l.reference.sequence_id().map(ToString::to_string),
            l.reference.location_id().map(ToString::to_string),
            Some(l.phase.as_str().to_string()),
            Some(l.day_offset),
            l.duration.to_i32(),
        )
    })
}

/// Rebuilds an optional link from its storage columns.
///
/// A row with neither a linked sequence nor a linked location is unlinked;
/// the phase/offset/duration columns are ignored in that case.
///
/// # Errors
///
/// Returns an error if a linked row carries an unknown phase or a
/// non-positive duration.
pub fn link_from_columns(
    linked_sequence_id: Option<String>,
    linked_location: Option<String>,
    link_phase: Option<String>,
    day_offset: Option<i64>,
    duration: Option<i32>,
) -> Result<Option<ScheduleLink>, PersistenceError> {
    let reference = match (linked_sequence_id, linked_location) {
        (Some(sequence_id), _) => LinkRef::Sequence(sequence_id),
        (None, Some(location_id)) => LinkRef::Location(location_id),
        (None, None) => return Ok(None),
    };

    let phase = match link_phase {
        Some(value) => LinkPhase::from_str(&value)?,
        None => {
            return Err(PersistenceError::ReconstructionError(String::from(
                "Linked row is missing its link phase",
            )));
        }
    };

    let duration = duration
        .and_then(|d| d.to_u32())
        .unwrap_or(1)
        .max(1);

    let link = ScheduleLink::new(reference, phase, day_offset.unwrap_or(0), duration)?;
    Ok(Some(link))
}

/// Formats a domain date for storage.
#[must_use]
pub fn date_to_column(date: time::Date) -> String {
    format_date(date)
}
