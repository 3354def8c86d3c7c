use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::domain::{JobId, MoveDirection, Stage, StageDraft, StageId, StageUpdate};
use super::ordering;

/// Error enumeration for stage repository operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("{field} must not be empty")]
    Validation { field: &'static str },
    #[error("stage {0} not found")]
    StageNotFound(StageId),
}

#[derive(Debug, Clone)]
struct StoredStage {
    stage: Stage,
    seq: u64,
}

/// In-memory canonical collection of stages, keyed by id.
///
/// Each instance is fully isolated: ids and insertion sequence numbers are
/// minted per repository, so tests can build throwaway repositories without
/// shared state. The repository is a transient mirror of whatever persistence
/// sits behind the caller, not a system of record.
#[derive(Debug, Default)]
pub struct StageRepository {
    stages: HashMap<StageId, StoredStage>,
    next_seq: u64,
    next_id: u64,
}

impl StageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stages for a job, active and inactive, in pipeline order.
    pub fn list_by_job(&self, job_id: &JobId) -> Vec<&Stage> {
        let mut entries: Vec<(&Stage, u64)> = self
            .stages
            .values()
            .filter(|stored| stored.stage.job_id == *job_id)
            .map(|stored| (&stored.stage, stored.seq))
            .collect();
        ordering::sort_by_rank(&mut entries);
        entries.into_iter().map(|(stage, _)| stage).collect()
    }

    pub fn fetch(&self, id: &StageId) -> Option<&Stage> {
        self.stages.get(id).map(|stored| &stored.stage)
    }

    /// Create a stage for `job_id`. New stages start active; a missing color
    /// means the display color is derived from the name on read.
    pub fn create(
        &mut self,
        job_id: &JobId,
        draft: StageDraft,
        now: DateTime<Utc>,
    ) -> Result<Stage, PipelineError> {
        if job_id.0.trim().is_empty() {
            return Err(PipelineError::Validation { field: "job_id" });
        }
        let name = validated_name(&draft.name)?;

        let id = self.mint_id();
        let stage = Stage {
            id: id.clone(),
            job_id: job_id.clone(),
            name,
            order: draft.order,
            color: normalized_color(draft.color),
            is_active: true,
            description: draft.description,
            created_date: now,
            modified_date: now,
        };

        let seq = self.next_seq;
        self.next_seq += 1;
        self.stages.insert(
            id,
            StoredStage {
                stage: stage.clone(),
                seq,
            },
        );
        Ok(stage)
    }

    /// Replace the mutable fields of an existing stage. The owning job never
    /// changes; [`StageUpdate`] cannot express a reassignment.
    pub fn update(
        &mut self,
        change: StageUpdate,
        now: DateTime<Utc>,
    ) -> Result<Stage, PipelineError> {
        let name = validated_name(&change.name)?;
        let stored = self
            .stages
            .get_mut(&change.id)
            .ok_or_else(|| PipelineError::StageNotFound(change.id.clone()))?;

        let stage = &mut stored.stage;
        stage.name = name;
        stage.order = change.order;
        stage.color = normalized_color(change.color);
        stage.description = change.description;
        stage.is_active = change.is_active;
        stage.modified_date = now;
        Ok(stage.clone())
    }

    /// Soft delete: the stage drops out of the reconciler's vocabulary but the
    /// record is retained so historical application statuses stay explainable.
    pub fn deactivate(
        &mut self,
        id: &StageId,
        now: DateTime<Utc>,
    ) -> Result<Stage, PipelineError> {
        let stored = self
            .stages
            .get_mut(id)
            .ok_or_else(|| PipelineError::StageNotFound(id.clone()))?;
        stored.stage.is_active = false;
        stored.stage.modified_date = now;
        Ok(stored.stage.clone())
    }

    /// Hard removal from the canonical collection. Applications recorded with
    /// the removed stage's name keep their status string and fall back to the
    /// default vocabulary for display.
    pub fn purge(&mut self, id: &StageId) -> Result<(), PipelineError> {
        self.stages
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| PipelineError::StageNotFound(id.clone()))
    }

    /// Swap `order` values with the adjacent same-job stage in the requested
    /// direction. A stage already at the boundary is a no-op, not an error.
    pub fn move_stage(
        &mut self,
        id: &StageId,
        direction: MoveDirection,
    ) -> Result<(), PipelineError> {
        let job_id = self
            .stages
            .get(id)
            .map(|stored| stored.stage.job_id.clone())
            .ok_or_else(|| PipelineError::StageNotFound(id.clone()))?;

        let mut entries: Vec<(&Stage, u64)> = self
            .stages
            .values()
            .filter(|stored| stored.stage.job_id == job_id)
            .map(|stored| (&stored.stage, stored.seq))
            .collect();
        ordering::sort_by_rank(&mut entries);

        let Some(index) = entries.iter().position(|(stage, _)| stage.id == *id) else {
            return Err(PipelineError::StageNotFound(id.clone()));
        };
        let Some(partner) = ordering::swap_partner(entries.len(), index, direction) else {
            return Ok(());
        };

        let current_id = entries[index].0.id.clone();
        let partner_id = entries[partner].0.id.clone();
        let current_order = entries[index].0.order;
        let partner_order = entries[partner].0.order;
        drop(entries);

        if let Some(stored) = self.stages.get_mut(&current_id) {
            stored.stage.order = partner_order;
        }
        if let Some(stored) = self.stages.get_mut(&partner_id) {
            stored.stage.order = current_order;
        }
        Ok(())
    }

    fn mint_id(&mut self) -> StageId {
        let id = self.next_id;
        self.next_id += 1;
        StageId(format!("stage-{id:06}"))
    }
}

fn validated_name(raw: &str) -> Result<String, PipelineError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PipelineError::Validation { field: "name" });
    }
    Ok(trimmed.to_string())
}

fn normalized_color(color: Option<String>) -> Option<String> {
    color.filter(|value| !value.trim().is_empty())
}
