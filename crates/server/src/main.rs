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
mod seed;
mod session;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, FromRef, Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use civic_pulse::Notification;
use civic_pulse_api::{
    ApiError, ApiResult, AssignOfficerRequest, ComplaintResponse, DeleteComplaintRequest,
    EvidenceUpload, ListComplaintsQuery, OfficerComplaintResponse, OfficerFeedbackResponse,
    OfficerUpdateRequest, ReplyRequest, SubmitComplaintRequest, UpdatePriorityRequest,
    UpdateStageRequest, UpdateStatusRequest, admin_officer_availability, assign_officer,
    assigned_complaints, citizen_complaint, citizen_complaints, citizen_deleted_complaints,
    dispatch, get_complaint, list_complaints, officer_complaint, officer_feedback,
    officer_feedbacks, officer_update_complaint, officer_workload, prepare_evidence_upload,
    record_evidence, reply_to_complaint, soft_delete_complaint, submit_complaint,
    translate_storage_error, update_priority, update_stage, update_status,
};
use civic_pulse_domain::{EvidenceFile, MAX_EVIDENCE_BYTES, OfficerAvailability, OfficerWorkload};
use civic_pulse_persistence::{LocalEvidenceStorage, Persistence, StoredEvidence};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::live::{LiveNotifier, live_events_handler};
use crate::session::SessionActor;

/// Request bodies above this size are rejected by the transport before the
/// evidence rules see them. It sits well above the evidence limit so that
/// oversized files are reported as such.
const UPLOAD_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Civic Pulse Server - HTTP server for the grievance lifecycle backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Directory where officer evidence files are stored
    #[arg(short, long, default_value = "uploads/officer")]
    upload_dir: PathBuf,

    /// JSON fixture with officers, citizens, admins and complaints.
    /// If not provided, the server starts empty.
    #[arg(short, long)]
    seed: Option<PathBuf>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The complaint repository.
    persistence: Arc<Mutex<Persistence>>,
    /// Where officer evidence is written.
    storage: Arc<LocalEvidenceStorage>,
    /// Live notification fan-out.
    notifier: Arc<LiveNotifier>,
}

impl FromRef<AppState> for Arc<LiveNotifier> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.notifier)
    }
}

/// Query parameters for evidence uploads.
#[derive(Debug, Deserialize)]
struct EvidenceQuery {
    /// The client-side file name.
    file_name: Option<String>,
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
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } | ApiError::AccessDenied { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DomainRuleViolation { rule, .. } => match rule.as_str() {
                "complaint_not_deleted" | "officer_available" | "unique_id" => {
                    StatusCode::CONFLICT
                }
                _ => StatusCode::UNPROCESSABLE_ENTITY,
            },
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Publishes committed notifications. Must be called without the
/// repository lock held.
fn publish(app_state: &AppState, notifications: &[Notification]) {
    let delivered: usize = dispatch(app_state.notifier.as_ref(), notifications);
    debug!(
        produced = notifications.len(),
        delivered, "Dispatched notifications"
    );
}

/// Unwraps a mutating result, publishing its notifications.
fn respond<T>(app_state: &AppState, result: ApiResult<T>) -> Json<T> {
    publish(app_state, &result.notifications);
    Json(result.response)
}

// ============================================================================
// Admin endpoints
// ============================================================================

/// Handler for GET `/api/admin/complaints`.
async fn handle_list_complaints(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Query(query): Query<ListComplaintsQuery>,
) -> Result<Json<Vec<ComplaintResponse>>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let complaints: Vec<ComplaintResponse> = list_complaints(&persistence, query, &actor)?;
    Ok(Json(complaints))
}

/// Handler for GET `/api/admin/complaints/{id}`.
async fn handle_get_complaint(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(complaint_id): Path<i64>,
) -> Result<Json<ComplaintResponse>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let complaint: ComplaintResponse = get_complaint(&persistence, complaint_id, &actor)?;
    Ok(Json(complaint))
}

/// Handler for PUT `/api/admin/complaints/{id}/assign`.
async fn handle_assign_officer(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(complaint_id): Path<i64>,
    Json(req): Json<AssignOfficerRequest>,
) -> Result<Json<ComplaintResponse>, HttpError> {
    info!(
        complaint_id,
        officer_id = req.officer_id,
        admin_id = actor.id,
        "Handling assign_officer request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ComplaintResponse> =
        assign_officer(&mut persistence, complaint_id, req, &actor)?;
    drop(persistence);
    Ok(respond(&app_state, result))
}

/// Handler for PUT `/api/admin/complaints/{id}/status`.
async fn handle_update_status(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(complaint_id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ComplaintResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ComplaintResponse> =
        update_status(&mut persistence, complaint_id, req, &actor)?;
    drop(persistence);
    Ok(respond(&app_state, result))
}

/// Handler for PUT `/api/admin/complaints/{id}/stage`.
async fn handle_update_stage(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(complaint_id): Path<i64>,
    Json(req): Json<UpdateStageRequest>,
) -> Result<Json<ComplaintResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ComplaintResponse> =
        update_stage(&mut persistence, complaint_id, req, &actor)?;
    drop(persistence);
    Ok(respond(&app_state, result))
}

/// Handler for PUT `/api/admin/complaints/{id}/priority`.
async fn handle_update_priority(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(complaint_id): Path<i64>,
    Json(req): Json<UpdatePriorityRequest>,
) -> Result<Json<ComplaintResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ComplaintResponse> =
        update_priority(&mut persistence, complaint_id, req, &actor)?;
    drop(persistence);
    Ok(respond(&app_state, result))
}

/// Handler for DELETE `/api/admin/complaints/{id}?reason=...`.
async fn handle_soft_delete_complaint(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(complaint_id): Path<i64>,
    Query(req): Query<DeleteComplaintRequest>,
) -> Result<Json<ComplaintResponse>, HttpError> {
    info!(complaint_id, admin_id = actor.id, "Handling soft delete request");
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ComplaintResponse> =
        soft_delete_complaint(&mut persistence, complaint_id, req, &actor)?;
    drop(persistence);
    Ok(respond(&app_state, result))
}

/// Handler for GET `/api/admin/officers/availability`.
async fn handle_officer_availability(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
) -> Result<Json<Vec<OfficerAvailability>>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let rows: Vec<OfficerAvailability> = admin_officer_availability(&persistence, &actor)?;
    Ok(Json(rows))
}

/// Handler for GET `/api/officers/workload`.
async fn handle_officer_workload(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
) -> Result<Json<Vec<OfficerWorkload>>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let rows: Vec<OfficerWorkload> = officer_workload(&persistence, &actor)?;
    Ok(Json(rows))
}

// ============================================================================
// Officer endpoints
// ============================================================================

/// Handler for GET `/api/officer/complaints`.
async fn handle_assigned_complaints(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
) -> Result<Json<Vec<OfficerComplaintResponse>>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let complaints: Vec<OfficerComplaintResponse> = assigned_complaints(&persistence, &actor)?;
    Ok(Json(complaints))
}

/// Handler for GET `/api/officer/complaints/{id}`.
async fn handle_officer_complaint(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(complaint_id): Path<i64>,
) -> Result<Json<OfficerComplaintResponse>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let complaint: OfficerComplaintResponse =
        officer_complaint(&persistence, complaint_id, &actor)?;
    Ok(Json(complaint))
}

/// Handler for PUT `/api/officer/complaints/{id}`.
async fn handle_officer_update_complaint(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(complaint_id): Path<i64>,
    Json(req): Json<OfficerUpdateRequest>,
) -> Result<Json<OfficerComplaintResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<OfficerComplaintResponse> =
        officer_update_complaint(&mut persistence, complaint_id, req, &actor)?;
    drop(persistence);
    Ok(respond(&app_state, result))
}

/// Handler for POST `/api/officer/complaints/{id}/evidence?file_name=...`.
///
/// The request body is the raw file; its media type comes from the
/// `Content-Type` header. The file is written on the blocking pool with the
/// repository unlocked, then recorded under a fresh lock.
async fn handle_upload_evidence(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(complaint_id): Path<i64>,
    Query(query): Query<EvidenceQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<OfficerComplaintResponse>, HttpError> {
    let content_type: String = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    info!(
        complaint_id,
        officer_id = actor.id,
        content_type = %content_type,
        bytes = body.len(),
        "Handling evidence upload"
    );

    let upload: EvidenceUpload = EvidenceUpload {
        file_name: query.file_name.unwrap_or_default(),
        content_type,
        bytes: body.to_vec(),
    };

    let persistence = app_state.persistence.lock().await;
    let file: EvidenceFile = prepare_evidence_upload(&persistence, complaint_id, upload, &actor)?;
    drop(persistence);

    let storage: Arc<LocalEvidenceStorage> = Arc::clone(&app_state.storage);
    let stored: StoredEvidence = tokio::task::spawn_blocking(move || storage.store(&file))
        .await
        .map_err(|e| HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Evidence upload task failed: {e}"),
        })?
        .map_err(|e| translate_storage_error(&e))?;

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<OfficerComplaintResponse> = record_evidence(
        &mut persistence,
        app_state.storage.as_ref(),
        complaint_id,
        &stored,
        &actor,
    )?;
    drop(persistence);
    Ok(respond(&app_state, result))
}

/// Handler for GET `/api/officer/complaints/{id}/feedback`.
async fn handle_officer_feedback(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(complaint_id): Path<i64>,
) -> Result<Json<OfficerFeedbackResponse>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let feedback: OfficerFeedbackResponse = officer_feedback(&persistence, complaint_id, &actor)?;
    Ok(Json(feedback))
}

/// Handler for GET `/api/officer/feedbacks`.
async fn handle_officer_feedbacks(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
) -> Result<Json<Vec<OfficerFeedbackResponse>>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let feedbacks: Vec<OfficerFeedbackResponse> = officer_feedbacks(&persistence, &actor)?;
    Ok(Json(feedbacks))
}

/// Handler for GET `/uploads/officer/{file_name}`.
async fn handle_get_evidence(
    AxumState(app_state): AxumState<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response, HttpError> {
    let not_found = || HttpError {
        status: StatusCode::NOT_FOUND,
        message: format!("Evidence file '{file_name}' not found"),
    };
    if file_name.contains("..") || file_name.contains(['/', '\\']) {
        return Err(not_found());
    }

    let bytes: Vec<u8> = tokio::fs::read(app_state.storage.root().join(&file_name))
        .await
        .map_err(|_| not_found())?;
    let content_type: &str = if file_name.to_ascii_lowercase().ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    };
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

// ============================================================================
// Citizen endpoints
// ============================================================================

/// Handler for POST `/api/citizen/complaints`.
async fn handle_submit_complaint(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<SubmitComplaintRequest>,
) -> Result<(StatusCode, Json<ComplaintResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ComplaintResponse> = submit_complaint(&mut persistence, req, &actor)?;
    drop(persistence);
    Ok((StatusCode::CREATED, respond(&app_state, result)))
}

/// Handler for GET `/api/citizen/complaints`.
async fn handle_citizen_complaints(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
) -> Result<Json<Vec<ComplaintResponse>>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let complaints: Vec<ComplaintResponse> = citizen_complaints(&persistence, &actor)?;
    Ok(Json(complaints))
}

/// Handler for GET `/api/citizen/complaints/deleted`.
async fn handle_citizen_deleted_complaints(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
) -> Result<Json<Vec<ComplaintResponse>>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let complaints: Vec<ComplaintResponse> = citizen_deleted_complaints(&persistence, &actor)?;
    Ok(Json(complaints))
}

/// Handler for GET `/api/citizen/complaints/{id}`.
async fn handle_citizen_complaint(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(complaint_id): Path<i64>,
) -> Result<Json<ComplaintResponse>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let complaint: ComplaintResponse = citizen_complaint(&persistence, complaint_id, &actor)?;
    Ok(Json(complaint))
}

/// Handler for POST `/api/citizen/complaints/{id}/reply`.
async fn handle_reply_to_complaint(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(complaint_id): Path<i64>,
    Json(req): Json<ReplyRequest>,
) -> Result<Json<ComplaintResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ComplaintResponse> =
        reply_to_complaint(&mut persistence, complaint_id, req, &actor)?;
    drop(persistence);
    Ok(respond(&app_state, result))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/admin/complaints", get(handle_list_complaints))
        .route(
            "/api/admin/complaints/{id}",
            get(handle_get_complaint).delete(handle_soft_delete_complaint),
        )
        .route("/api/admin/complaints/{id}/assign", put(handle_assign_officer))
        .route("/api/admin/complaints/{id}/status", put(handle_update_status))
        .route("/api/admin/complaints/{id}/stage", put(handle_update_stage))
        .route(
            "/api/admin/complaints/{id}/priority",
            put(handle_update_priority),
        )
        .route(
            "/api/admin/officers/availability",
            get(handle_officer_availability),
        )
        .route("/api/officers/workload", get(handle_officer_workload))
        .route("/api/officer/complaints", get(handle_assigned_complaints))
        .route(
            "/api/officer/complaints/{id}",
            get(handle_officer_complaint).put(handle_officer_update_complaint),
        )
        .route(
            "/api/officer/complaints/{id}/evidence",
            post(handle_upload_evidence).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/api/officer/complaints/{id}/feedback",
            get(handle_officer_feedback),
        )
        .route("/api/officer/feedbacks", get(handle_officer_feedbacks))
        .route("/uploads/officer/{file_name}", get(handle_get_evidence))
        .route(
            "/api/citizen/complaints",
            get(handle_citizen_complaints).post(handle_submit_complaint),
        )
        .route(
            "/api/citizen/complaints/deleted",
            get(handle_citizen_deleted_complaints),
        )
        .route(
            "/api/citizen/complaints/{id}",
            get(handle_citizen_complaint),
        )
        .route(
            "/api/citizen/complaints/{id}/reply",
            post(handle_reply_to_complaint),
        )
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

    info!("Initializing Civic Pulse Server");

    let persistence: Persistence = if let Some(seed_path) = &args.seed {
        info!("Loading seed data from: {}", seed_path.display());
        seed::load_seed(seed_path)?
    } else {
        info!("Starting with an empty repository");
        Persistence::new_in_memory()
    };

    info!(
        "Storing evidence under: {} (limit {} bytes)",
        args.upload_dir.display(),
        MAX_EVIDENCE_BYTES
    );
    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        storage: Arc::new(LocalEvidenceStorage::new(args.upload_dir)),
        notifier: Arc::new(LiveNotifier::new()),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
