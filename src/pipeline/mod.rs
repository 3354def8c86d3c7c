//! Recruitment pipeline domain core.
//!
//! Stages are configured per job, ordered by the [`ordering`] policy, and
//! colored by the deterministic [`palette`] assigner when no explicit color is
//! set. The [`reconciler`] turns a job's active stages into the status
//! vocabulary for its applications and degrades gracefully for status strings
//! it cannot match. [`repository`] owns the canonical in-memory collection;
//! [`service`] and [`router`] expose it to HTTP and CLI callers.

pub mod domain;
pub(crate) mod ordering;
pub mod palette;
pub mod reconciler;
pub mod repository;
pub mod router;
pub mod service;
pub mod template;

#[cfg(test)]
mod tests;

pub use domain::{DefaultStatus, JobId, MoveDirection, Stage, StageDraft, StageId, StageUpdate};
pub use repository::{PipelineError, StageRepository};
pub use router::stage_router;
pub use service::{PipelineService, PipelineServiceError, StageView, StatusResolution};
pub use template::{parse_stage_templates, TemplateError};
