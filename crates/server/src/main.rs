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

mod live;

use axum::{
    Json, Router,
    extract::{Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use callsheet_api::{
    ApiError, ApproveStaffRequest, AuthenticatedActor, CreateDepartmentRequest,
    CreateProductionRequest, CreateReinforcementsRequest, CreateRoundTripRequest,
    DeleteRequestRequest, DeleteStaffRequest, ListLogisticsResponse, ListReinforcementsResponse,
    MoveStaffRequest, RescheduleRequest, RescheduleResponse, Role, RoundTripPreviewRequest,
    SetShootingStartRequest, UpdateRequestRequest, UpdateStaffRequest, UpsertProductionDayRequest,
    UpsertSequenceRequest, WeekInfoResponse, approve_staff, authenticate_stub, create_department,
    create_production, create_reinforcements, create_round_trip, delete_request, delete_staff,
    get_week_info, import_day_table_csv, list_logistics, list_reinforcements, move_staff,
    preview_round_trip, reschedule_by_drag, set_shooting_start, update_request, update_staff,
    upsert_production_day, upsert_sequence,
};
use callsheet_audit::Cause;
use callsheet_domain::Department;
use callsheet_persistence::{Persistence, PersistenceError};
use live::{LiveEvent, LiveEventBroadcaster, live_events_handler};

/// Callsheet Server - HTTP server for the Callsheet scheduling backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory
    /// database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for the canonical schedule and audit log.
    persistence: Arc<Mutex<Persistence>>,
    /// The live event broadcaster for connected UIs.
    broadcaster: Arc<LiveEventBroadcaster>,
}

impl axum::extract::FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        state.broadcaster.clone()
    }
}

/// Actor identity and cause fields carried by every mutating request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorInfo {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor ("production" or "department").
    actor_role: String,
    /// The department the actor acts for (required for department actors).
    actor_department: Option<String>,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } | ApiError::InvalidCsvFormat { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

/// Resolves the request's actor fields into an authenticated actor and a
/// cause.
fn resolve_actor(info: &ActorInfo) -> Result<(AuthenticatedActor, Cause), HttpError> {
    let role = match info.actor_role.as_str() {
        "production" => Role::Production,
        "department" => Role::Department,
        other => {
            return Err(HttpError {
                status: StatusCode::BAD_REQUEST,
                message: format!("Unknown actor role: {other}"),
            });
        }
    };

    let department = match role {
        Role::Production => Department::production(),
        Role::Department => {
            let name = info.actor_department.as_deref().ok_or_else(|| HttpError {
                status: StatusCode::BAD_REQUEST,
                message: String::from("actor_department is required for department actors"),
            })?;
            Department::new(name)
        }
    };

    let actor = authenticate_stub(info.actor_id.clone(), role, department).map_err(|e| {
        HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: e.to_string(),
        }
    })?;
    let cause = Cause::new(info.cause_id.clone(), info.cause_description.clone());
    Ok((actor, cause))
}

// ============================================================================
// Request envelopes
// ============================================================================

#[derive(Debug, Deserialize)]
struct CreateProductionApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    #[serde(flatten)]
    request: CreateProductionRequest,
}

#[derive(Debug, Deserialize)]
struct SetShootingStartApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    #[serde(flatten)]
    request: SetShootingStartRequest,
}

#[derive(Debug, Deserialize)]
struct CreateDepartmentApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    #[serde(flatten)]
    request: CreateDepartmentRequest,
}

#[derive(Debug, Deserialize)]
struct UpsertProductionDayApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    #[serde(flatten)]
    request: UpsertProductionDayRequest,
}

#[derive(Debug, Deserialize)]
struct ImportDayTableCsvApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    /// The production name.
    production: String,
    /// The raw CSV content, header row included.
    csv_content: String,
}

#[derive(Debug, Deserialize)]
struct UpsertSequenceApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    #[serde(flatten)]
    request: UpsertSequenceRequest,
}

#[derive(Debug, Deserialize)]
struct CreateRoundTripApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    #[serde(flatten)]
    request: CreateRoundTripRequest,
}

#[derive(Debug, Deserialize)]
struct UpdateRequestApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    #[serde(flatten)]
    request: UpdateRequestRequest,
}

#[derive(Debug, Deserialize)]
struct DeleteRequestApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    #[serde(flatten)]
    request: DeleteRequestRequest,
}

#[derive(Debug, Deserialize)]
struct RescheduleApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    #[serde(flatten)]
    request: RescheduleRequest,
}

#[derive(Debug, Deserialize)]
struct CreateReinforcementsApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    #[serde(flatten)]
    request: CreateReinforcementsRequest,
}

#[derive(Debug, Deserialize)]
struct MoveStaffApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    #[serde(flatten)]
    request: MoveStaffRequest,
}

#[derive(Debug, Deserialize)]
struct ApproveStaffApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    #[serde(flatten)]
    request: ApproveStaffRequest,
}

#[derive(Debug, Deserialize)]
struct UpdateStaffApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    #[serde(flatten)]
    request: UpdateStaffRequest,
}

#[derive(Debug, Deserialize)]
struct DeleteStaffApiRequest {
    #[serde(flatten)]
    actor: ActorInfo,
    #[serde(flatten)]
    request: DeleteStaffRequest,
}

/// Query parameters for production-scoped listings.
#[derive(Debug, Deserialize)]
struct ProductionQuery {
    /// The production name.
    production: String,
}

/// Query parameters for the week endpoint.
#[derive(Debug, Deserialize)]
struct WeekQuery {
    /// The production name.
    production: String,
    /// The date to resolve (ISO day).
    date: String,
}

/// Generic success response for operations without a payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OkResponse {
    /// Success indicator.
    success: bool,
}

/// Result of a day-table CSV import, flattened for JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CsvImportApiResponse {
    /// Number of rows upserted into the day table.
    imported_count: usize,
    /// Number of rows skipped for validation errors.
    skipped_count: usize,
}

// ============================================================================
// Handlers
// ============================================================================

async fn handle_create_production(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<CreateProductionApiRequest>,
) -> Result<Json<callsheet_api::CreateProductionResponse>, HttpError> {
    let (actor, cause) = resolve_actor(&body.actor)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = create_production(&mut persistence, &body.request, &actor, cause)?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::ProductionCreated {
        production: response.name.clone(),
    });
    Ok(Json(response))
}

async fn handle_set_shooting_start(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<SetShootingStartApiRequest>,
) -> Result<Json<callsheet_api::SetShootingStartResponse>, HttpError> {
    let (actor, cause) = resolve_actor(&body.actor)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = set_shooting_start(&mut persistence, &body.request, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_create_department(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<CreateDepartmentApiRequest>,
) -> Result<Json<callsheet_api::CreateDepartmentResponse>, HttpError> {
    let (actor, cause) = resolve_actor(&body.actor)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = create_department(&mut persistence, &body.request, &actor, cause)?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::DepartmentCreated {
        production: body.request.production.clone(),
        department: response.name.clone(),
    });
    Ok(Json(response))
}

async fn handle_upsert_production_day(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<UpsertProductionDayApiRequest>,
) -> Result<Json<OkResponse>, HttpError> {
    let (actor, _cause) = resolve_actor(&body.actor)?;

    let mut persistence = app_state.persistence.lock().await;
    upsert_production_day(&mut persistence, &body.request, &actor)?;
    drop(persistence);

    app_state
        .broadcaster
        .broadcast(&LiveEvent::ReferenceTablesUpdated {
            production: body.request.production.clone(),
        });
    Ok(Json(OkResponse { success: true }))
}

async fn handle_import_day_table_csv(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<ImportDayTableCsvApiRequest>,
) -> Result<Json<CsvImportApiResponse>, HttpError> {
    let (actor, _cause) = resolve_actor(&body.actor)?;

    let mut persistence = app_state.persistence.lock().await;
    let result = import_day_table_csv(&mut persistence, &body.production, &body.csv_content, &actor)?;
    drop(persistence);

    app_state
        .broadcaster
        .broadcast(&LiveEvent::ReferenceTablesUpdated {
            production: body.production.clone(),
        });
    Ok(Json(CsvImportApiResponse {
        imported_count: result.imported_count,
        skipped_count: result.skipped_count,
    }))
}

async fn handle_upsert_sequence(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<UpsertSequenceApiRequest>,
) -> Result<Json<OkResponse>, HttpError> {
    let (actor, _cause) = resolve_actor(&body.actor)?;

    let mut persistence = app_state.persistence.lock().await;
    upsert_sequence(&mut persistence, &body.request, &actor)?;
    drop(persistence);

    app_state
        .broadcaster
        .broadcast(&LiveEvent::ReferenceTablesUpdated {
            production: body.request.production.clone(),
        });
    Ok(Json(OkResponse { success: true }))
}

async fn handle_preview_round_trip(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<RoundTripPreviewRequest>,
) -> Result<Json<callsheet_api::RoundTripPreviewResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = preview_round_trip(&mut persistence, &body)?;
    Ok(Json(response))
}

async fn handle_create_round_trip(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<CreateRoundTripApiRequest>,
) -> Result<Json<callsheet_api::CreateRoundTripResponse>, HttpError> {
    let (actor, cause) = resolve_actor(&body.actor)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = create_round_trip(&mut persistence, &body.request, &actor, cause)?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::RoundTripCreated {
        production: body.request.production.clone(),
        department: body.request.department.clone(),
        request_ids: response.request_ids.clone(),
    });
    Ok(Json(response))
}

async fn handle_update_request(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<UpdateRequestApiRequest>,
) -> Result<Json<callsheet_api::UpdateRequestResponse>, HttpError> {
    let (actor, cause) = resolve_actor(&body.actor)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = update_request(&mut persistence, &body.request, &actor, cause)?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::RequestUpdated {
        production: body.request.production.clone(),
        request_id: response.request_id,
    });
    Ok(Json(response))
}

async fn handle_delete_request(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<DeleteRequestApiRequest>,
) -> Result<Json<callsheet_api::DeleteRequestResponse>, HttpError> {
    let (actor, cause) = resolve_actor(&body.actor)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = delete_request(&mut persistence, &body.request, &actor, cause)?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::RequestDeleted {
        production: body.request.production.clone(),
        request_id: response.request_id,
    });
    Ok(Json(response))
}

async fn handle_reschedule(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<RescheduleApiRequest>,
) -> Result<(StatusCode, Json<RescheduleResponse>), HttpError> {
    let (actor, cause) = resolve_actor(&body.actor)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = reschedule_by_drag(&mut persistence, &body.request, &actor, cause)?;
    drop(persistence);

    // An unanswered confirmation suspends the workflow: the client re-sends
    // the same request with the decision filled in
    if response.confirmation_required.is_some() {
        return Ok((StatusCode::CONFLICT, Json(response)));
    }

    if response.moved {
        app_state
            .broadcaster
            .broadcast(&LiveEvent::RequestRescheduled {
                production: body.request.production.clone(),
                request_id: body.request.request_id,
                cascaded: response.cascaded.clone(),
                unlinked: response.unlinked,
            });
    }
    Ok((StatusCode::OK, Json(response)))
}

async fn handle_create_reinforcements(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<CreateReinforcementsApiRequest>,
) -> Result<Json<callsheet_api::CreateReinforcementsResponse>, HttpError> {
    let (actor, cause) = resolve_actor(&body.actor)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = create_reinforcements(&mut persistence, &body.request, &actor, cause)?;
    drop(persistence);

    app_state
        .broadcaster
        .broadcast(&LiveEvent::ReinforcementsCreated {
            production: body.request.production.clone(),
            department: body.request.department.clone(),
            count: response.created.len(),
        });
    Ok(Json(response))
}

async fn handle_move_staff(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<MoveStaffApiRequest>,
) -> Result<Json<callsheet_api::MoveStaffResponse>, HttpError> {
    let (actor, cause) = resolve_actor(&body.actor)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = move_staff(&mut persistence, &body.request, &actor, cause)?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::StaffMoved {
        production: body.request.production.clone(),
        staff_id: response.staff_id.clone(),
        date: response.date.clone(),
    });
    Ok(Json(response))
}

async fn handle_approve_staff(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<ApproveStaffApiRequest>,
) -> Result<Json<callsheet_api::ApproveStaffResponse>, HttpError> {
    let (actor, cause) = resolve_actor(&body.actor)?;

    let mut persistence = app_state.persistence.lock().await;
    let response = approve_staff(&mut persistence, &body.request, &actor, cause)?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::StaffApproved {
        production: body.request.production.clone(),
        staff_id: response.staff_id.clone(),
    });
    Ok(Json(response))
}

async fn handle_update_staff(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<UpdateStaffApiRequest>,
) -> Result<Json<OkResponse>, HttpError> {
    let (actor, cause) = resolve_actor(&body.actor)?;

    let mut persistence = app_state.persistence.lock().await;
    update_staff(&mut persistence, &body.request, &actor, cause)?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::StaffChanged {
        production: body.request.production.clone(),
        staff_id: body.request.staff_id.clone(),
    });
    Ok(Json(OkResponse { success: true }))
}

async fn handle_delete_staff(
    AxumState(app_state): AxumState<AppState>,
    Json(body): Json<DeleteStaffApiRequest>,
) -> Result<Json<OkResponse>, HttpError> {
    let (actor, cause) = resolve_actor(&body.actor)?;

    let mut persistence = app_state.persistence.lock().await;
    delete_staff(&mut persistence, &body.request, &actor, cause)?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::StaffChanged {
        production: body.request.production.clone(),
        staff_id: body.request.staff_id.clone(),
    });
    Ok(Json(OkResponse { success: true }))
}

async fn handle_list_logistics(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ProductionQuery>,
) -> Result<Json<ListLogisticsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = list_logistics(&mut persistence, &query.production)?;
    Ok(Json(response))
}

async fn handle_list_reinforcements(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ProductionQuery>,
) -> Result<Json<ListReinforcementsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = list_reinforcements(&mut persistence, &query.production)?;
    Ok(Json(response))
}

async fn handle_get_week(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<WeekInfoResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = get_week_info(&mut persistence, &query.production, &query.date)?;
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/productions", post(handle_create_production))
        .route("/productions/shooting_start", post(handle_set_shooting_start))
        .route("/departments", post(handle_create_department))
        .route("/day_table", post(handle_upsert_production_day))
        .route("/day_table/import_csv", post(handle_import_day_table_csv))
        .route("/sequences", post(handle_upsert_sequence))
        .route("/logistics", get(handle_list_logistics))
        .route("/logistics/preview", post(handle_preview_round_trip))
        .route("/logistics/round_trip", post(handle_create_round_trip))
        .route("/logistics/update", post(handle_update_request))
        .route("/logistics/delete", post(handle_delete_request))
        .route("/logistics/reschedule", post(handle_reschedule))
        .route(
            "/reinforcements",
            get(handle_list_reinforcements).post(handle_create_reinforcements),
        )
        .route("/reinforcements/move", post(handle_move_staff))
        .route("/reinforcements/approve", post(handle_approve_staff))
        .route("/reinforcements/update", post(handle_update_staff))
        .route("/reinforcements/delete", post(handle_delete_staff))
        .route("/weeks", get(handle_get_week))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Callsheet Server");

    // Initialize persistence (in-memory or file-based based on CLI
    // argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        broadcaster: Arc::new(LiveEventBroadcaster::new()),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            broadcaster: Arc::new(LiveEventBroadcaster::new()),
        }
    }

    fn production_actor_fields() -> serde_json::Value {
        serde_json::json!({
            "actor_id": "prod-office-1",
            "actor_role": "production",
            "actor_department": null,
            "cause_id": "test-cause",
            "cause_description": "Test request"
        })
    }

    fn grip_actor_fields() -> serde_json::Value {
        serde_json::json!({
            "actor_id": "grip-op-1",
            "actor_role": "department",
            "actor_department": "grip",
            "cause_id": "test-cause",
            "cause_description": "Test request"
        })
    }

    fn merge(base: serde_json::Value, extra: serde_json::Value) -> serde_json::Value {
        let mut merged = base;
        if let (Some(target), Some(source)) = (merged.as_object_mut(), extra.as_object()) {
            for (key, value) in source {
                target.insert(key.clone(), value.clone());
            }
        }
        merged
    }

    async fn post_json(
        app: &Router,
        path: &str,
        body: &serde_json::Value,
    ) -> (HttpStatusCode, serde_json::Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("Failed to build request"),
            )
            .await
            .expect("Request should complete");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Body should collect");
        let json: serde_json::Value =
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    /// Seeds a production with departments and a sequence over HTTP.
    async fn seed(app: &Router) {
        let (status, _) = post_json(
            app,
            "/productions",
            &merge(
                production_actor_fields(),
                serde_json::json!({"name": "Night Shift"}),
            ),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        for department in ["grip", "electric"] {
            let (status, _) = post_json(
                app,
                "/departments",
                &merge(
                    production_actor_fields(),
                    serde_json::json!({"production": "Night Shift", "name": department}),
                ),
            )
            .await;
            assert_eq!(status, HttpStatusCode::OK);
        }

        let (status, _) = post_json(
            app,
            "/sequences",
            &merge(
                production_actor_fields(),
                serde_json::json!({
                    "production": "Night Shift",
                    "sequence_id": "seq-9",
                    "date": "2024-03-13",
                    "decor": "Warehouse"
                }),
            ),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_production_as_department_is_forbidden() {
        let app: Router = build_router(create_test_app_state());

        let (status, _) = post_json(
            &app,
            "/productions",
            &merge(
                grip_actor_fields(),
                serde_json::json!({"name": "Night Shift"}),
            ),
        )
        .await;

        assert_eq!(status, HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_round_trip_creation_over_http() {
        let app: Router = build_router(create_test_app_state());
        seed(&app).await;

        let (status, body) = post_json(
            &app,
            "/logistics/round_trip",
            &merge(
                grip_actor_fields(),
                serde_json::json!({
                    "production": "Night Shift",
                    "department": "grip",
                    "reference": {"sequence_id": "seq-9"},
                    "description": "Lighting package"
                }),
            ),
        )
        .await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["usage_date"], "2024-03-13");
        assert_eq!(body["request_ids"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_sunday_drop_is_unprocessable() {
        let app: Router = build_router(create_test_app_state());
        seed(&app).await;

        let (_, created) = post_json(
            &app,
            "/logistics/round_trip",
            &merge(
                grip_actor_fields(),
                serde_json::json!({
                    "production": "Night Shift",
                    "department": "grip",
                    "reference": {"date": "2024-03-13"}
                }),
            ),
        )
        .await;
        let request_id = created["request_ids"][0].clone();

        // 2024-03-10 is a Sunday
        let (status, _) = post_json(
            &app,
            "/logistics/reschedule",
            &merge(
                grip_actor_fields(),
                serde_json::json!({
                    "production": "Night Shift",
                    "request_id": request_id,
                    "target_date": "2024-03-10"
                }),
            ),
        )
        .await;

        assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_two_phase_confirmation_over_http() {
        let app: Router = build_router(create_test_app_state());
        seed(&app).await;

        let (_, created) = post_json(
            &app,
            "/logistics/round_trip",
            &merge(
                grip_actor_fields(),
                serde_json::json!({
                    "production": "Night Shift",
                    "department": "grip",
                    "reference": {"sequence_id": "seq-9"}
                }),
            ),
        )
        .await;
        let usage_id = created["request_ids"][1].clone();

        // First attempt: the linked entry needs a detach decision
        let (status, body) = post_json(
            &app,
            "/logistics/reschedule",
            &merge(
                grip_actor_fields(),
                serde_json::json!({
                    "production": "Night Shift",
                    "request_id": usage_id,
                    "target_date": "2024-03-19"
                }),
            ),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CONFLICT);
        assert_eq!(body["confirmation_required"], "detach_from_reference");

        // Resubmit with both decisions answered
        let (status, body) = post_json(
            &app,
            "/logistics/reschedule",
            &merge(
                grip_actor_fields(),
                serde_json::json!({
                    "production": "Night Shift",
                    "request_id": usage_id,
                    "target_date": "2024-03-19",
                    "detach_confirmed": true,
                    "cascade_confirmed": true
                }),
            ),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["moved"], true);
        assert_eq!(body["unlinked"], true);
        assert_eq!(body["cascaded"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_reinforcement_flow_over_http() {
        let app: Router = build_router(create_test_app_state());
        seed(&app).await;

        let (status, body) = post_json(
            &app,
            "/reinforcements",
            &merge(
                grip_actor_fields(),
                serde_json::json!({
                    "production": "Night Shift",
                    "department": "electric",
                    "reference": {"sequence_id": "seq-9"},
                    "phases": [{"phase": "SHOOTING", "duration": 1}],
                    "people": [{"name": "Alex Martin"}]
                }),
            ),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let staff_id = body["created"][0]["staff_id"].clone();
        assert_eq!(body["created"][0]["validation_status"], "PENDING");

        let (status, body) = post_json(
            &app,
            "/reinforcements/approve",
            &merge(
                production_actor_fields(),
                serde_json::json!({
                    "production": "Night Shift",
                    "department": "electric",
                    "date": "2024-03-13",
                    "staff_id": staff_id
                }),
            ),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["validation_status"], "APPROVED");
    }
}
