use std::io::Read;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{JobId, MoveDirection, Stage, StageDraft, StageId, StageUpdate};
use super::reconciler;
use super::repository::{PipelineError, StageRepository};
use super::template::{self, TemplateError};

/// Service facade over the stage repository for the HTTP and CLI boundaries.
///
/// The service is the single writer: it owns the repository behind a mutex,
/// stamps creation/modification times, and renders stages as views with the
/// display color resolved. Concurrent sessions are last-write-wins; there is
/// no cross-request coordination beyond the lock.
pub struct PipelineService {
    repository: Mutex<StageRepository>,
}

/// Serialized stage with the display color already resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageView {
    pub id: StageId,
    pub job_id: JobId,
    pub name: String,
    pub order: u32,
    pub color: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
}

impl StageView {
    fn from_stage(stage: &Stage) -> Self {
        Self {
            id: stage.id.clone(),
            job_id: stage.job_id.clone(),
            name: stage.name.clone(),
            order: stage.order,
            color: stage.display_color().to_string(),
            is_active: stage.is_active,
            description: stage.description.clone(),
            created_date: stage.created_date,
            modified_date: stage.modified_date,
        }
    }
}

/// Outcome of reconciling a status string against a job's pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusResolution {
    pub status: String,
    pub valid: bool,
    pub color: String,
}

/// Error raised by the pipeline service.
#[derive(Debug, thiserror::Error)]
pub enum PipelineServiceError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl PipelineService {
    pub fn new(repository: StageRepository) -> Self {
        Self {
            repository: Mutex::new(repository),
        }
    }

    pub fn list_stages(&self, job_id: &JobId) -> Vec<StageView> {
        let repository = self.repo();
        repository
            .list_by_job(job_id)
            .into_iter()
            .map(StageView::from_stage)
            .collect()
    }

    pub fn create_stage(
        &self,
        job_id: &JobId,
        draft: StageDraft,
    ) -> Result<StageView, PipelineServiceError> {
        let mut repository = self.repo();
        let stage = repository.create(job_id, draft, Utc::now())?;
        Ok(StageView::from_stage(&stage))
    }

    pub fn update_stage(&self, change: StageUpdate) -> Result<StageView, PipelineServiceError> {
        let mut repository = self.repo();
        let stage = repository.update(change, Utc::now())?;
        Ok(StageView::from_stage(&stage))
    }

    pub fn deactivate_stage(&self, id: &StageId) -> Result<StageView, PipelineServiceError> {
        let mut repository = self.repo();
        let stage = repository.deactivate(id, Utc::now())?;
        Ok(StageView::from_stage(&stage))
    }

    pub fn purge_stage(&self, id: &StageId) -> Result<(), PipelineServiceError> {
        let mut repository = self.repo();
        repository.purge(id)?;
        Ok(())
    }

    /// Move a stage and return the job's pipeline in its new order.
    pub fn move_stage(
        &self,
        id: &StageId,
        direction: MoveDirection,
    ) -> Result<Vec<StageView>, PipelineServiceError> {
        let mut repository = self.repo();
        repository.move_stage(id, direction)?;
        let job_id = repository
            .fetch(id)
            .map(|stage| stage.job_id.clone())
            .ok_or_else(|| PipelineError::StageNotFound(id.clone()))?;
        Ok(repository
            .list_by_job(&job_id)
            .into_iter()
            .map(StageView::from_stage)
            .collect())
    }

    pub fn allowed_statuses(&self, job_id: &JobId) -> Vec<String> {
        let repository = self.repo();
        reconciler::allowed_statuses(&repository, job_id)
    }

    pub fn resolve_status(&self, job_id: &JobId, status: &str) -> StatusResolution {
        let repository = self.repo();
        StatusResolution {
            status: status.to_string(),
            valid: reconciler::is_valid_transition(&repository, job_id, status),
            color: reconciler::color_for(&repository, job_id, status),
        }
    }

    /// Append the stages of a CSV template to a job, in template order.
    pub fn import_stages<R: Read>(
        &self,
        job_id: &JobId,
        reader: R,
    ) -> Result<Vec<StageView>, PipelineServiceError> {
        let drafts = template::parse_stage_templates(reader)?;
        let mut repository = self.repo();
        let now = Utc::now();
        let mut views = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let stage = repository.create(job_id, draft, now)?;
            views.push(StageView::from_stage(&stage));
        }
        Ok(views)
    }

    // Repository operations leave the map consistent even on early return, so
    // a poisoned lock is recovered rather than propagated.
    fn repo(&self) -> MutexGuard<'_, StageRepository> {
        self.repository
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
