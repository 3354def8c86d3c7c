use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::pipeline::domain::{JobId, Stage, StageDraft, StageId};
use crate::pipeline::repository::StageRepository;
use crate::pipeline::router::stage_router;
use crate::pipeline::service::PipelineService;

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn later_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 2, 15, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn job() -> JobId {
    JobId("job1".to_string())
}

pub(super) fn other_job() -> JobId {
    JobId("job2".to_string())
}

pub(super) fn draft(name: &str, order: u32) -> StageDraft {
    StageDraft {
        name: name.to_string(),
        order,
        color: None,
        description: None,
    }
}

pub(super) fn colored_draft(name: &str, order: u32, color: &str) -> StageDraft {
    StageDraft {
        color: Some(color.to_string()),
        ..draft(name, order)
    }
}

/// Repository holding `Applied(1)`, `Interview(2)`, `Offer(3)` for [`job`].
pub(super) fn seeded_repository() -> (StageRepository, Vec<StageId>) {
    let mut repository = StageRepository::new();
    let mut ids = Vec::new();
    for (name, order) in [("Applied", 1), ("Interview", 2), ("Offer", 3)] {
        let stage = repository
            .create(&job(), draft(name, order), fixed_now())
            .expect("seed stage");
        ids.push(stage.id);
    }
    (repository, ids)
}

pub(super) fn orders_of(repository: &StageRepository, job_id: &JobId) -> Vec<(String, u32)> {
    repository
        .list_by_job(job_id)
        .into_iter()
        .map(|stage: &Stage| (stage.name.clone(), stage.order))
        .collect()
}

pub(super) fn build_service() -> Arc<PipelineService> {
    Arc::new(PipelineService::new(StageRepository::new()))
}

pub(super) fn stage_router_with_service(service: Arc<PipelineService>) -> axum::Router {
    stage_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn json_request(
    method: &str,
    uri: &str,
    payload: &Value,
) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(payload).expect("serialize payload"),
        ))
        .expect("build request")
}

pub(super) fn empty_request(method: &str, uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .expect("build request")
}
