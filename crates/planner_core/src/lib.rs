//! Core domain logic for the planner.
//! This crate is the single source of truth for task, project and area
//! invariants and for every derived view.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod time;
pub mod view;

pub use config::{load_config, ConfigError, LoggingConfig, PlannerConfig};
pub use logging::{default_log_level, init_logging, init_logging_to, logging_status, LogTarget};
pub use model::area::{Area, AreaId, AreaPatch};
pub use model::goal::{Goal, GoalDraft, GoalId, GoalPatch, GoalStatus};
pub use model::progress::Progress;
pub use model::project::{Project, ProjectDraft, ProjectId, ProjectPatch, ProjectStatus, Step, StepId};
pub use model::task::{
    Completion, Priority, Task, TaskDraft, TaskId, TaskPatch, TaskRecord, Timeframe,
};
pub use model::validation::{InvalidState, ValidationError};
pub use service::planner::Planner;
pub use service::snapshot::Snapshot;
pub use store::{EntityKind, ReferenceError, StoreError, StoreResult};
pub use time::{Clock, DueDateTime, ManualClock, SystemClock, TimeInterval, Timestamp};
pub use view::{
    AreaKey, GoalListParams, ListSort, ProjectListParams, SortBy, TaskGroup, ViewContext,
    ViewParams,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
