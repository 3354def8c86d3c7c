use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::palette;

/// Identifier wrapper for pipeline stages, stable across updates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StageId(pub String);

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the job that owns a set of stages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A configured recruitment stage belonging to exactly one job.
///
/// `color` holds only an explicitly chosen color; when absent the display
/// color is derived from the stage name, see [`Stage::display_color`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: StageId,
    pub job_id: JobId,
    pub name: String,
    pub order: u32,
    pub color: Option<String>,
    pub is_active: bool,
    pub description: Option<String>,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
}

impl Stage {
    /// Explicit color when one was set, otherwise the palette color derived
    /// deterministically from the stage name.
    pub fn display_color(&self) -> &str {
        match &self.color {
            Some(color) => color,
            None => palette::color_for(&self.name),
        }
    }
}

/// Caller-supplied fields for a new stage; id, active flag, and timestamps
/// are assigned at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDraft {
    pub name: String,
    pub order: u32,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Full-replace update for an existing stage. The owning job is deliberately
/// absent: a stage cannot be reassigned to a different job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageUpdate {
    pub id: StageId,
    pub name: String,
    pub order: u32,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
}

/// Direction for a swap-based reorder within a job's pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Fixed fallback vocabulary used when an application's status string does not
/// match any active stage of its job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultStatus {
    New,
    Reviewed,
    AiScreening,
    Interviewing,
    Offered,
    Hired,
    Rejected,
}

impl DefaultStatus {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::New,
            Self::Reviewed,
            Self::AiScreening,
            Self::Interviewing,
            Self::Offered,
            Self::Hired,
            Self::Rejected,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Reviewed => "Reviewed",
            Self::AiScreening => "AI Screening",
            Self::Interviewing => "Interviewing",
            Self::Offered => "Offered",
            Self::Hired => "Hired",
            Self::Rejected => "Rejected",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::New => palette::BLUE,
            Self::Reviewed => palette::PURPLE,
            Self::AiScreening => palette::INDIGO,
            Self::Interviewing => palette::YELLOW,
            Self::Offered => palette::GREEN,
            Self::Hired => palette::TEAL,
            Self::Rejected => palette::RED,
        }
    }

    /// Case-sensitive lookup by display label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered().into_iter().find(|status| status.label() == label)
    }
}
