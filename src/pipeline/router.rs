use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{JobId, MoveDirection, StageDraft, StageId, StageUpdate};
use super::repository::PipelineError;
use super::service::{PipelineService, PipelineServiceError};

/// Router builder exposing the stage management and status endpoints.
pub fn stage_router(service: Arc<PipelineService>) -> Router {
    Router::new()
        .route(
            "/api/v1/jobs/:job_id/stages",
            get(list_stages_handler).post(create_stage_handler),
        )
        .route("/api/v1/jobs/:job_id/stages/import", post(import_stages_handler))
        .route("/api/v1/jobs/:job_id/statuses", get(allowed_statuses_handler))
        .route("/api/v1/jobs/:job_id/status/resolve", post(resolve_status_handler))
        .route(
            "/api/v1/stages/:stage_id",
            put(update_stage_handler).delete(deactivate_stage_handler),
        )
        .route("/api/v1/stages/:stage_id/purge", delete(purge_stage_handler))
        .route("/api/v1/stages/:stage_id/move", post(move_stage_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct CreateStageRequest {
    name: String,
    order: u32,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateStageRequest {
    name: String,
    order: u32,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default = "default_active")]
    is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct MoveStageRequest {
    direction: MoveDirection,
}

#[derive(Debug, Deserialize)]
struct ResolveStatusRequest {
    status: String,
}

#[derive(Debug, Deserialize)]
struct ImportStagesRequest {
    csv: String,
}

async fn list_stages_handler(
    State(service): State<Arc<PipelineService>>,
    Path(job_id): Path<String>,
) -> Response {
    let stages = service.list_stages(&JobId(job_id));
    (StatusCode::OK, axum::Json(stages)).into_response()
}

async fn create_stage_handler(
    State(service): State<Arc<PipelineService>>,
    Path(job_id): Path<String>,
    axum::Json(payload): axum::Json<CreateStageRequest>,
) -> Response {
    let draft = StageDraft {
        name: payload.name,
        order: payload.order,
        color: payload.color,
        description: payload.description,
    };
    match service.create_stage(&JobId(job_id), draft) {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn update_stage_handler(
    State(service): State<Arc<PipelineService>>,
    Path(stage_id): Path<String>,
    axum::Json(payload): axum::Json<UpdateStageRequest>,
) -> Response {
    let change = StageUpdate {
        id: StageId(stage_id),
        name: payload.name,
        order: payload.order,
        color: payload.color,
        description: payload.description,
        is_active: payload.is_active,
    };
    match service.update_stage(change) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn deactivate_stage_handler(
    State(service): State<Arc<PipelineService>>,
    Path(stage_id): Path<String>,
) -> Response {
    match service.deactivate_stage(&StageId(stage_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn purge_stage_handler(
    State(service): State<Arc<PipelineService>>,
    Path(stage_id): Path<String>,
) -> Response {
    match service.purge_stage(&StageId(stage_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

async fn move_stage_handler(
    State(service): State<Arc<PipelineService>>,
    Path(stage_id): Path<String>,
    axum::Json(payload): axum::Json<MoveStageRequest>,
) -> Response {
    match service.move_stage(&StageId(stage_id), payload.direction) {
        Ok(stages) => (StatusCode::OK, axum::Json(stages)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn allowed_statuses_handler(
    State(service): State<Arc<PipelineService>>,
    Path(job_id): Path<String>,
) -> Response {
    let statuses = service.allowed_statuses(&JobId(job_id));
    (StatusCode::OK, axum::Json(json!({ "statuses": statuses }))).into_response()
}

async fn resolve_status_handler(
    State(service): State<Arc<PipelineService>>,
    Path(job_id): Path<String>,
    axum::Json(payload): axum::Json<ResolveStatusRequest>,
) -> Response {
    let resolution = service.resolve_status(&JobId(job_id), &payload.status);
    (StatusCode::OK, axum::Json(resolution)).into_response()
}

async fn import_stages_handler(
    State(service): State<Arc<PipelineService>>,
    Path(job_id): Path<String>,
    axum::Json(payload): axum::Json<ImportStagesRequest>,
) -> Response {
    let reader = Cursor::new(payload.csv.into_bytes());
    match service.import_stages(&JobId(job_id), reader) {
        Ok(stages) => (StatusCode::CREATED, axum::Json(stages)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: PipelineServiceError) -> Response {
    let status = match &error {
        PipelineServiceError::Pipeline(PipelineError::Validation { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        PipelineServiceError::Pipeline(PipelineError::StageNotFound(_)) => StatusCode::NOT_FOUND,
        PipelineServiceError::Template(_) => StatusCode::BAD_REQUEST,
    };
    let body = axum::Json(json!({ "error": error.to_string() }));
    (status, body).into_response()
}
