//! Recruitment pipeline stage management and candidate status reconciliation.
//!
//! The [`pipeline`] module holds the in-memory domain core: stage definitions
//! scoped to a job, the ordering policy that keeps them in pipeline order, and
//! the reconciler that turns a job's active stages into the status vocabulary
//! for its applications. [`config`], [`telemetry`], and [`error`] carry the
//! service scaffolding around it.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod telemetry;
