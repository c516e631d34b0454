//! Store-level error taxonomy.

use crate::model::area::AreaId;
use crate::model::project::{ProjectId, StepId};
use crate::model::validation::{InvalidState, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Entity families held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Area,
    Project,
    Step,
    Goal,
    Task,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Area => "area",
            Self::Project => "project",
            Self::Step => "step",
            Self::Goal => "goal",
            Self::Task => "task",
        };
        f.write_str(name)
    }
}

/// A mutation would leave a dangling or inconsistent reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// Referenced area does not exist.
    MissingArea(AreaId),
    /// Referenced project does not exist.
    MissingProject(ProjectId),
    /// Step does not belong to the task's project.
    StepNotInProject { step: StepId, project: ProjectId },
    /// Step was set on a task without a project.
    StepWithoutProject(StepId),
    /// Area cannot be removed while projects or goals still use it.
    AreaInUse(AreaId),
}

impl Display for ReferenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingArea(id) => write!(f, "referenced area does not exist: {id}"),
            Self::MissingProject(id) => write!(f, "referenced project does not exist: {id}"),
            Self::StepNotInProject { step, project } => {
                write!(f, "step {step} does not belong to project {project}")
            }
            Self::StepWithoutProject(step) => {
                write!(f, "step {step} cannot be set on a task without a project")
            }
            Self::AreaInUse(id) => write!(f, "area is still used by projects or goals: {id}"),
        }
    }
}

/// Error returned by every store and planner mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Mutation references an id absent from the store.
    NotFound(EntityKind, Uuid),
    /// Insert would duplicate an existing id.
    DuplicateId(EntityKind, Uuid),
    InvalidReference(ReferenceError),
    InvalidState(InvalidState),
    Validation(ValidationError),
}

impl StoreError {
    /// Stable short code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(..) => "not_found",
            Self::DuplicateId(..) => "duplicate_id",
            Self::InvalidReference(_) => "invalid_reference",
            Self::InvalidState(_) => "invalid_state",
            Self::Validation(_) => "validation",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(kind, id) => write!(f, "{kind} not found: {id}"),
            Self::DuplicateId(kind, id) => write!(f, "{kind} already exists: {id}"),
            Self::InvalidReference(err) => write!(f, "{err}"),
            Self::InvalidState(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidState(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::NotFound(..) | Self::DuplicateId(..) | Self::InvalidReference(_) => None,
        }
    }
}

impl From<ReferenceError> for StoreError {
    fn from(value: ReferenceError) -> Self {
        Self::InvalidReference(value)
    }
}

impl From<InvalidState> for StoreError {
    fn from(value: InvalidState) -> Self {
        Self::InvalidState(value)
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
