// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed request and response structs for the API boundary.
//!
//! Dates cross this boundary as ISO day strings (`YYYY-MM-DD`) and are
//! parsed into domain dates inside the handlers.

use serde::{Deserialize, Serialize};

/// Request to create a production.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductionRequest {
    /// The production's display name.
    pub name: String,
}

/// Response for a created production.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductionResponse {
    /// The canonical production id.
    pub production_id: i64,
    /// The production's display name.
    pub name: String,
}

/// Request to set or clear a production's shooting start date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetShootingStartRequest {
    /// The production name.
    pub production: String,
    /// The shooting start date (ISO day), or `None` to clear it.
    pub shooting_start_date: Option<String>,
}

/// Response for a shooting-start update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetShootingStartResponse {
    /// The production name.
    pub production: String,
    /// The stored shooting start date, if any.
    pub shooting_start_date: Option<String>,
}

/// Request to create a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepartmentRequest {
    /// The production name.
    pub production: String,
    /// The department name.
    pub name: String,
}

/// Response for a created department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepartmentResponse {
    /// The canonical department id.
    pub department_id: i64,
    /// The department name (normalized).
    pub name: String,
}

/// Request to upsert one production day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertProductionDayRequest {
    /// The production name.
    pub production: String,
    /// The calendar day (ISO day).
    pub date: String,
    /// The location shot on this day, if any.
    pub location: Option<String>,
    /// A secondary linked location, if any.
    pub linked_location: Option<String>,
}

/// Request to upsert one sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertSequenceRequest {
    /// The production name.
    pub production: String,
    /// The sequence identifier.
    pub sequence_id: String,
    /// The day the sequence shoots (ISO day).
    pub date: String,
    /// The set/decor name, if any.
    pub decor: Option<String>,
}

/// The reference a transport or reinforcement request anchors to.
///
/// Exactly one of the fields should be set; they are checked in order:
/// sequence, then location, then explicit date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceSelection {
    /// Anchor to a shooting sequence.
    pub sequence_id: Option<String>,
    /// Anchor to a shooting location.
    pub location_id: Option<String>,
    /// No anchor: an explicit, manually-chosen date (ISO day).
    pub date: Option<String>,
}

/// Request to preview the derived dates of a transport round trip.
///
/// The preview backs the creation form: selecting a sequence or location
/// immediately re-derives pickup/usage/return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundTripPreviewRequest {
    /// The production name.
    pub production: String,
    /// The reference the request anchors to.
    pub reference: ReferenceSelection,
    /// Cover the location's whole range instead of its first day.
    #[serde(default)]
    pub full_duration: bool,
}

/// Response with the derived round-trip dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundTripPreviewResponse {
    /// The derived pickup date (ISO day).
    pub pickup_date: String,
    /// The derived usage date (ISO day).
    pub usage_date: String,
    /// The derived return date (ISO day).
    pub dropoff_date: String,
    /// Whether the resolved reference spans more than one day.
    pub multi_day: bool,
}

/// Request to create a transport round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoundTripRequest {
    /// The production name.
    pub production: String,
    /// The owning department.
    pub department: String,
    /// The reference the request anchors to.
    pub reference: ReferenceSelection,
    /// Cover the location's whole range instead of its first day.
    #[serde(default)]
    pub full_duration: bool,
    /// Free-text time indication, copied onto every leg.
    pub time_note: Option<String>,
    /// Free-text pickup/delivery location, copied onto every leg.
    pub location: Option<String>,
    /// Free-text description of the material.
    pub description: Option<String>,
    /// Free-text vehicle type, copied onto every leg.
    pub vehicle_type: Option<String>,
}

/// Response for a created round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoundTripResponse {
    /// The canonical ids of the created legs, in pickup/usage/return order.
    pub request_ids: Vec<i64>,
    /// The group id shared by the legs.
    pub group_id: String,
    /// The derived pickup date (ISO day).
    pub pickup_date: String,
    /// The derived usage date (ISO day).
    pub usage_date: String,
    /// The derived return date (ISO day).
    pub dropoff_date: String,
}

/// Request to edit the descriptive fields of a logistics request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequestRequest {
    /// The production name.
    pub production: String,
    /// The canonical id of the request to edit.
    pub request_id: i64,
    /// The new date (ISO day), if changing.
    pub date: Option<String>,
    /// Free-text time indication.
    pub time_note: Option<String>,
    /// Free-text pickup/delivery location.
    pub location: Option<String>,
    /// Free-text description of the material.
    pub description: Option<String>,
    /// Free-text vehicle type.
    pub vehicle_type: Option<String>,
}

/// Response for an edited logistics request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequestResponse {
    /// The canonical id of the edited request.
    pub request_id: i64,
}

/// Request to delete a logistics request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequestRequest {
    /// The production name.
    pub production: String,
    /// The canonical id of the request to delete.
    pub request_id: i64,
}

/// Response for a deleted logistics request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequestResponse {
    /// The canonical id of the deleted request.
    pub request_id: i64,
}

/// Request to reschedule an entry by drag.
///
/// The decision fields implement the two-phase confirmation protocol: a
/// response with `confirmation_required` set names the pending question,
/// and the client resubmits the same request with the decision filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleRequest {
    /// The production name.
    pub production: String,
    /// The canonical id of the dragged entry.
    pub request_id: i64,
    /// The date the entry was dropped on (ISO day).
    pub target_date: String,
    /// Answer to the "detach and move" confirmation, once asked.
    pub detach_confirmed: Option<bool>,
    /// Answer to the "cascade siblings" confirmation, once asked.
    pub cascade_confirmed: Option<bool>,
}

/// Response for a drag reschedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleResponse {
    /// Whether the dragged entry was moved.
    pub moved: bool,
    /// Canonical ids of the siblings that were cascade-shifted.
    pub cascaded: Vec<i64>,
    /// Whether link fields were cleared.
    pub unlinked: bool,
    /// The pending confirmation, when the workflow suspended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_required: Option<String>,
    /// A user-facing message (the confirmation question, or why nothing
    /// moved).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One phase a reinforcement request covers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseSelection {
    /// The phase (`PRELIGHT`, `SHOOTING`, or `DEMONTAGE`).
    pub phase: String,
    /// The number of days the phase covers (ignored for `SHOOTING`).
    #[serde(default = "default_duration")]
    pub duration: u32,
}

const fn default_duration() -> u32 {
    1
}

/// One person on a reinforcement request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonInput {
    /// The person's name.
    pub name: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// The role the person is hired for.
    pub role: Option<String>,
}

/// Request to create reinforcement staff entries across phases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReinforcementsRequest {
    /// The production name.
    pub production: String,
    /// The owning department.
    pub department: String,
    /// The reference the entries anchor to.
    pub reference: ReferenceSelection,
    /// The phases to staff.
    pub phases: Vec<PhaseSelection>,
    /// The people to add on every derived day.
    pub people: Vec<PersonInput>,
}

/// One created staff entry with its date assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedStaffInfo {
    /// The application-generated staff entry id.
    pub staff_id: String,
    /// The person's name.
    pub name: String,
    /// The assigned day (ISO day).
    pub date: String,
    /// The phase the day belongs to.
    pub phase: String,
    /// The entry's initial approval status.
    pub validation_status: String,
}

/// Response for created reinforcement entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReinforcementsResponse {
    /// Every created entry with its date assignment.
    pub created: Vec<CreatedStaffInfo>,
}

/// Request to move a staff entry to another date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveStaffRequest {
    /// The production name.
    pub production: String,
    /// The owning department.
    pub department: String,
    /// The id of the staff entry to move.
    pub staff_id: String,
    /// The day the entry currently sits on (ISO day).
    pub source_date: String,
    /// The day to move the entry to (ISO day).
    pub target_date: String,
}

/// Response for a staff move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveStaffResponse {
    /// The id of the moved staff entry.
    pub staff_id: String,
    /// The day the entry now sits on (ISO day).
    pub date: String,
}

/// Request to approve a staff entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveStaffRequest {
    /// The production name.
    pub production: String,
    /// The owning department.
    pub department: String,
    /// The calendar day of the record (ISO day).
    pub date: String,
    /// The id of the staff entry to approve.
    pub staff_id: String,
}

/// Response for a staff approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveStaffResponse {
    /// The id of the approved staff entry.
    pub staff_id: String,
    /// The entry's approval status after the call.
    pub validation_status: String,
}

/// Request to edit a staff entry's descriptive fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStaffRequest {
    /// The production name.
    pub production: String,
    /// The id of the staff entry to edit.
    pub staff_id: String,
    /// The person's name.
    pub name: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// The role the person is hired for.
    pub role: Option<String>,
}

/// Request to delete a staff entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteStaffRequest {
    /// The production name.
    pub production: String,
    /// The owning department.
    pub department: String,
    /// The calendar day of the record (ISO day).
    pub date: String,
    /// The id of the staff entry to delete.
    pub staff_id: String,
}

/// One logistics request in a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticsInfo {
    /// The canonical request id.
    pub request_id: i64,
    /// The sibling-group key, if the request belongs to a round trip.
    pub group_id: Option<String>,
    /// The leg kind.
    pub kind: String,
    /// The calendar day (ISO day).
    pub date: String,
    /// The owning department.
    pub department: String,
    /// Free-text time indication.
    pub time_note: Option<String>,
    /// Free-text pickup/delivery location.
    pub location: Option<String>,
    /// Free-text description of the material.
    pub description: Option<String>,
    /// Free-text vehicle type.
    pub vehicle_type: Option<String>,
    /// The linked sequence id, if anchored to a sequence.
    pub linked_sequence_id: Option<String>,
    /// The linked location id, if anchored to a location.
    pub linked_location: Option<String>,
    /// The link phase, if anchored.
    pub link_phase: Option<String>,
    /// Signed day distance from the phase anchor, if anchored.
    pub day_offset: Option<i64>,
    /// Number of days covered, if anchored.
    pub duration: Option<u32>,
    /// Whether the entry auto-follows its sequence.
    pub auto_update_dates: bool,
    /// The workflow status.
    pub status: String,
}

/// Response for a logistics listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListLogisticsResponse {
    /// The production name.
    pub production: String,
    /// Every request of the production, ordered by date.
    pub requests: Vec<LogisticsInfo>,
}

/// One staff entry in a reinforcement listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffInfo {
    /// The staff entry id.
    pub staff_id: String,
    /// The person's name.
    pub name: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// The role the person is hired for.
    pub role: Option<String>,
    /// The entry's approval status.
    pub validation_status: String,
}

/// One reinforcement record in a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReinforcementInfo {
    /// The calendar day (ISO day).
    pub date: String,
    /// The owning department.
    pub department: String,
    /// The ordered staff entries.
    pub staff: Vec<StaffInfo>,
}

/// Response for a reinforcement listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListReinforcementsResponse {
    /// The production name.
    pub production: String,
    /// Every record of the production, ordered by date.
    pub records: Vec<ReinforcementInfo>,
}

/// Response with the production week of a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekInfoResponse {
    /// The week index (may be ≤ 0 before the shooting start).
    pub week: i64,
    /// The display label (e.g. "Week 3").
    pub label: String,
    /// The Monday the week starts on (ISO day).
    pub week_start: String,
}
