//! Project and step model.
//!
//! # Invariants
//! - `area` is authoritative; tasks inherit it through `Task::project`.
//! - Step `order` values are unique within one project and define display
//!   order. Steps carry no area of their own.
//! - `end_date` is not earlier than `start_date` when both are set.

use super::area::AreaId;
use super::progress::Progress;
use super::validation::ValidationError;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

pub type ProjectId = Uuid;
pub type StepId = Uuid;

/// Project lifecycle column. Declaration order is the board order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Lead,
    Active,
    Finished,
    Archive,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [Self::Lead, Self::Active, Self::Finished, Self::Archive];

    pub fn label(self) -> &'static str {
        match self {
            Self::Lead => "Lead",
            Self::Active => "Active",
            Self::Finished => "Finished",
            Self::Archive => "Archive",
        }
    }
}

/// Ordered sub-unit of a project that tasks may be pinned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub title: String,
    pub order: i64,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub area: AreaId,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Project {
    pub fn step(&self, id: StepId) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn has_step(&self, id: StepId) -> bool {
        self.step(id).is_some()
    }

    /// Steps sorted by `order`.
    pub fn ordered_steps(&self) -> Vec<&Step> {
        let mut steps = self.steps.iter().collect::<Vec<_>>();
        steps.sort_by_key(|step| step.order);
        steps
    }

    /// Order value for a step appended at the end.
    pub fn next_step_order(&self) -> i64 {
        self.steps.iter().map(|step| step.order).max().unwrap_or(0) + 1
    }

    /// Completed steps over all steps.
    pub fn step_progress(&self) -> Progress {
        let done = self.steps.iter().filter(|step| step.completed).count();
        Progress::new(done, self.steps.len())
    }

    /// Checks title, date range and step id and order uniqueness.
    pub fn validate(&self) -> Result<(), ValidationError> {
        super::normalize_title(&self.title)?;
        validate_date_range(self.start_date, self.end_date)?;
        let mut ids = HashSet::new();
        let mut orders = HashSet::new();
        for step in &self.steps {
            if !ids.insert(step.id) {
                return Err(ValidationError::DuplicateStepId(step.id));
            }
            if !orders.insert(step.order) {
                return Err(ValidationError::DuplicateStepOrder(step.order));
            }
        }
        Ok(())
    }
}

/// Input for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: Option<String>,
    pub area: AreaId,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub status: ProjectStatus,
}

impl ProjectDraft {
    /// New project draft in `lead` status with no dates.
    pub fn new(title: impl Into<String>, area: AreaId) -> Self {
        Self {
            title: title.into(),
            description: None,
            area,
            start_date: None,
            end_date: None,
            status: ProjectStatus::Lead,
        }
    }
}

/// Partial update for a project. Steps change through step operations only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub area: Option<AreaId>,
    pub start_date: Option<Option<Timestamp>>,
    pub end_date: Option<Option<Timestamp>>,
    pub status: Option<ProjectStatus>,
}

pub(crate) fn validate_date_range(
    start: Option<Timestamp>,
    end: Option<Timestamp>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(ValidationError::ReversedDateRange),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{Project, ProjectStatus, Step};
    use crate::model::validation::ValidationError;
    use uuid::Uuid;

    fn step(order: i64, completed: bool) -> Step {
        Step {
            id: Uuid::now_v7(),
            title: format!("step {order}"),
            order,
            completed,
        }
    }

    fn project(steps: Vec<Step>) -> Project {
        Project {
            id: Uuid::now_v7(),
            title: "Website Redesign".to_string(),
            description: None,
            area: Uuid::now_v7(),
            start_date: None,
            end_date: None,
            status: ProjectStatus::Active,
            steps,
        }
    }

    #[test]
    fn ordered_steps_and_next_order_follow_order_field() {
        let p = project(vec![step(3, false), step(1, true), step(2, false)]);
        let orders = p.ordered_steps().iter().map(|s| s.order).collect::<Vec<_>>();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(p.next_step_order(), 4);
        assert_eq!(p.step_progress().done, 1);
        assert_eq!(p.step_progress().total, 3);
        assert_eq!(project(Vec::new()).next_step_order(), 1);
    }

    #[test]
    fn validate_rejects_duplicate_step_order() {
        let p = project(vec![step(1, false), step(1, false)]);
        assert_eq!(p.validate(), Err(ValidationError::DuplicateStepOrder(1)));
    }

    #[test]
    fn validate_rejects_duplicate_step_id() {
        let first = step(1, false);
        let mut copy = step(2, false);
        copy.id = first.id;
        let p = project(vec![first.clone(), copy]);
        assert_eq!(p.validate(), Err(ValidationError::DuplicateStepId(first.id)));
    }
}
