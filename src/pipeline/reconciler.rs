//! Reconciles free-text application statuses against a job's configured
//! stages.
//!
//! The reconciler holds no state of its own; every call reads the repository
//! snapshot it is handed. Unknown status strings never raise: they are
//! user/external-system supplied and degrade to fallback display instead of
//! breaking rendering.

use super::domain::{DefaultStatus, JobId};
use super::palette;
use super::repository::StageRepository;

/// Names of the job's active stages, ascending by order. An empty result
/// means the job has no managed pipeline.
pub fn allowed_statuses(repository: &StageRepository, job_id: &JobId) -> Vec<String> {
    repository
        .list_by_job(job_id)
        .into_iter()
        .filter(|stage| stage.is_active)
        .map(|stage| stage.name.clone())
        .collect()
}

/// A transition is valid iff the target case-sensitively equals the name of
/// one of the job's active stages. Ordering plays no part in validity.
pub fn is_valid_transition(repository: &StageRepository, job_id: &JobId, target: &str) -> bool {
    repository
        .list_by_job(job_id)
        .iter()
        .any(|stage| stage.is_active && stage.name == target)
}

/// Display color for a status: the matching active stage's color when the
/// status is managed, the default-vocabulary color when it is one of the
/// fixed fallback statuses, neutral gray otherwise.
pub fn color_for(repository: &StageRepository, job_id: &JobId, status: &str) -> String {
    if let Some(stage) = repository
        .list_by_job(job_id)
        .into_iter()
        .find(|stage| stage.is_active && stage.name == status)
    {
        return stage.display_color().to_string();
    }

    match DefaultStatus::from_label(status) {
        Some(default) => default.color().to_string(),
        None => palette::NEUTRAL_GRAY.to_string(),
    }
}
