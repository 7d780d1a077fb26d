// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod day_table_csv;
mod error;
mod handlers;
mod ids;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, Role, authenticate_stub, require_production};
pub use day_table_csv::{
    CsvImportResult, CsvPreviewResult, CsvRowResult, CsvRowStatus, DayTableCsvError,
    import_day_table_csv, preview_day_table_csv,
};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    approve_staff, create_department, create_production, create_reinforcements, create_round_trip,
    delete_request, delete_staff, get_week_info, list_logistics, list_reinforcements, move_staff,
    preview_round_trip, reschedule_by_drag, set_shooting_start, update_request, update_staff,
    upsert_production_day, upsert_sequence,
};
pub use ids::{generate_group_id, generate_staff_id};
pub use request_response::{
    ApproveStaffRequest, ApproveStaffResponse, CreateDepartmentRequest, CreateDepartmentResponse,
    CreateProductionRequest, CreateProductionResponse, CreateReinforcementsRequest,
    CreateReinforcementsResponse, CreateRoundTripRequest, CreateRoundTripResponse,
    CreatedStaffInfo, DeleteRequestRequest, DeleteRequestResponse, DeleteStaffRequest,
    ListLogisticsResponse, ListReinforcementsResponse, LogisticsInfo, MoveStaffRequest,
    MoveStaffResponse, PersonInput, PhaseSelection, ReferenceSelection, ReinforcementInfo,
    RescheduleRequest, RescheduleResponse, RoundTripPreviewRequest, RoundTripPreviewResponse,
    SetShootingStartRequest, SetShootingStartResponse, StaffInfo, UpdateRequestRequest,
    UpdateRequestResponse, UpdateStaffRequest, UpsertProductionDayRequest, UpsertSequenceRequest,
    WeekInfoResponse,
};
