//! Goal model. Progress is derived from attached projects, never stored.

use super::area::AreaId;
use super::project::{validate_date_range, ProjectId};
use super::validation::ValidationError;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

pub type GoalId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    New,
    Active,
    Paused,
    Achieved,
    Archive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
    pub description: Option<String>,
    pub area: AreaId,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub status: GoalStatus,
    /// Many-to-many attachment; a project may back several goals.
    #[serde(default)]
    pub project_ids: BTreeSet<ProjectId>,
}

impl Goal {
    /// Checks title and date range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        super::normalize_title(&self.title)?;
        validate_date_range(self.start_date, self.end_date)
    }
}

/// Input for creating a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalDraft {
    pub title: String,
    pub description: Option<String>,
    pub area: AreaId,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub status: GoalStatus,
    pub project_ids: BTreeSet<ProjectId>,
}

impl GoalDraft {
    /// New goal draft in `new` status with nothing attached.
    pub fn new(title: impl Into<String>, area: AreaId) -> Self {
        Self {
            title: title.into(),
            description: None,
            area,
            start_date: None,
            end_date: None,
            status: GoalStatus::New,
            project_ids: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub area: Option<AreaId>,
    pub start_date: Option<Option<Timestamp>>,
    pub end_date: Option<Option<Timestamp>>,
    pub status: Option<GoalStatus>,
    pub project_ids: Option<BTreeSet<ProjectId>>,
}
