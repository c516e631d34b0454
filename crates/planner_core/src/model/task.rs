//! Task model and its completion tri-state.
//!
//! # Responsibility
//! - Define the canonical task record used by every view.
//! - Encode completion as one of open/completed/cancelled so both timestamps
//!   can never be set at once.
//!
//! # Invariants
//! - `created` is stamped once at construction and never changes.
//! - Tasks carry no area field; the area is derived from `project`.
//! - `time_interval` is only meaningful while `due_date` is set.
//! - `step`, when set, belongs to `project` (enforced by the planner).
//!
//! # Wire shape
//! Tasks serialize through `TaskRecord`, which exposes the two nullable
//! timestamps `completed` and `cancelled`.

use super::area::AreaId;
use super::project::{ProjectId, StepId};
use super::validation::{InvalidState, ValidationError};
use crate::time::{DueDateTime, TimeInterval, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TaskId = Uuid;

/// Declaration order is ascending urgency.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    Urgent,
}

/// Coarse urgency bucket used by the Kanban board.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Timeframe {
    #[default]
    Now,
    Next,
    Later,
    Someday,
}

impl Timeframe {
    /// Fixed Kanban column order.
    pub const ALL: [Timeframe; 4] = [Self::Now, Self::Next, Self::Later, Self::Someday];

    pub fn label(self) -> &'static str {
        match self {
            Self::Now => "NOW",
            Self::Next => "NEXT",
            Self::Later => "LATER",
            Self::Someday => "SOMEDAY",
        }
    }
}

/// Done-ness of a task. "Done" means completed or cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Completion {
    #[default]
    Open,
    Completed(Timestamp),
    Cancelled(Timestamp),
}

impl Completion {
    /// Builds completion from the two wire timestamps.
    pub fn from_parts(
        completed: Option<Timestamp>,
        cancelled: Option<Timestamp>,
    ) -> Result<Self, InvalidState> {
        match (completed, cancelled) {
            (Some(_), Some(_)) => Err(InvalidState::CompletedAndCancelled),
            (Some(at), None) => Ok(Self::Completed(at)),
            (None, Some(at)) => Ok(Self::Cancelled(at)),
            (None, None) => Ok(Self::Open),
        }
    }

    pub fn completed(self) -> Option<Timestamp> {
        match self {
            Self::Completed(at) => Some(at),
            _ => None,
        }
    }

    pub fn cancelled(self) -> Option<Timestamp> {
        match self {
            Self::Cancelled(at) => Some(at),
            _ => None,
        }
    }

    /// Completion or cancellation time, whichever applies.
    pub fn done_at(self) -> Option<Timestamp> {
        match self {
            Self::Open => None,
            Self::Completed(at) | Self::Cancelled(at) => Some(at),
        }
    }

    pub fn is_done(self) -> bool {
        self != Self::Open
    }

    /// Checkbox cycle: cancelled -> open, open -> completed, completed -> open.
    ///
    /// Never lands on `Cancelled`; cancelling is a separate operation.
    pub fn toggled(self, now: Timestamp) -> Self {
        match self {
            Self::Open => Self::Completed(now),
            Self::Completed(_) | Self::Cancelled(_) => Self::Open,
        }
    }

    /// Applies a partial update of the two timestamps.
    ///
    /// Setting one timestamp clears the other; setting both is rejected.
    pub(crate) fn patched(
        self,
        completed: Option<Option<Timestamp>>,
        cancelled: Option<Option<Timestamp>>,
    ) -> Result<Self, InvalidState> {
        match (completed, cancelled) {
            (Some(Some(_)), Some(Some(_))) => Err(InvalidState::CompletedAndCancelled),
            (Some(Some(at)), _) => Ok(Self::Completed(at)),
            (_, Some(Some(at))) => Ok(Self::Cancelled(at)),
            (Some(None), Some(None)) => Ok(Self::Open),
            (Some(None), None) if matches!(self, Self::Completed(_)) => Ok(Self::Open),
            (None, Some(None)) if matches!(self, Self::Cancelled(_)) => Ok(Self::Open),
            _ => Ok(self),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub completion: Completion,
    pub due_date: Option<Timestamp>,
    pub time_interval: Option<TimeInterval>,
    pub project: Option<ProjectId>,
    pub step: Option<StepId>,
    created: Timestamp,
    pub timeframe: Timeframe,
}

impl Task {
    /// Creates an open, undated, unassigned task with a fresh id.
    pub fn new(title: impl Into<String>, created: Timestamp) -> Self {
        Self::with_id(super::new_entity_id(), title, created)
    }

    pub fn with_id(id: TaskId, title: impl Into<String>, created: Timestamp) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            priority: Priority::default(),
            completion: Completion::Open,
            due_date: None,
            time_interval: None,
            project: None,
            step: None,
            created,
            timeframe: Timeframe::default(),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn created(&self) -> Timestamp {
        self.created
    }

    pub fn completed(&self) -> Option<Timestamp> {
        self.completion.completed()
    }

    pub fn cancelled(&self) -> Option<Timestamp> {
        self.completion.cancelled()
    }

    pub fn is_done(&self) -> bool {
        self.completion.is_done()
    }

    pub fn due(&self) -> Option<DueDateTime> {
        self.due_date.map(|due| DueDateTime::stored(due, self.time_interval))
    }

    /// Sets or clears the due date together with its interval annotation.
    pub fn set_due(&mut self, due: Option<DueDateTime>) {
        self.due_date = due.map(|value| value.due());
        self.time_interval = due.and_then(|value| value.interval());
    }

    /// Re-reads `due_date` and `time_interval` through the due encoding,
    /// rejecting an interval that does not start at the due time.
    pub(crate) fn check_due(&mut self) -> Result<(), ValidationError> {
        let due = self
            .due_date
            .map(|due| DueDateTime::checked(due, self.time_interval))
            .transpose()?;
        self.set_due(due);
        Ok(())
    }
}

/// Serialized task shape: one record per task, ISO-8601 timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: Option<Timestamp>,
    #[serde(default)]
    pub cancelled: Option<Timestamp>,
    #[serde(default)]
    pub due_date: Option<Timestamp>,
    #[serde(default)]
    pub time_interval: Option<TimeInterval>,
    #[serde(default)]
    pub project: Option<ProjectId>,
    #[serde(default)]
    pub step: Option<StepId>,
    pub created: Timestamp,
    #[serde(default)]
    pub timeframe: Timeframe,
    /// Stored by older records; only accepted on import when it matches the
    /// project-derived area. Never written.
    #[serde(default, skip_serializing)]
    pub area: Option<AreaId>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = InvalidState;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        if record.area.is_some() {
            return Err(InvalidState::AreaIsDerived);
        }
        let completion = Completion::from_parts(record.completed, record.cancelled)?;
        Ok(Self {
            id: record.id,
            title: record.title,
            description: record.description,
            priority: record.priority,
            completion,
            due_date: record.due_date,
            time_interval: record.due_date.and(record.time_interval),
            project: record.project,
            step: record.step,
            created: record.created,
            timeframe: record.timeframe,
        })
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            priority: task.priority,
            completed: task.completion.completed(),
            cancelled: task.completion.cancelled(),
            due_date: task.due_date,
            time_interval: task.time_interval,
            project: task.project,
            step: task.step,
            created: task.created,
            timeframe: task.timeframe,
            area: None,
        }
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due: Option<DueDateTime>,
    pub project: Option<ProjectId>,
    pub step: Option<StepId>,
    pub timeframe: Timeframe,
}

impl TaskDraft {
    /// Medium priority, `NOW` timeframe, nothing assigned.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update for a task. `None` leaves a field untouched;
/// `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub timeframe: Option<Timeframe>,
    pub due: Option<Option<DueDateTime>>,
    pub project: Option<Option<ProjectId>>,
    pub step: Option<Option<StepId>>,
    pub completed: Option<Option<Timestamp>>,
    pub cancelled: Option<Option<Timestamp>>,
}
