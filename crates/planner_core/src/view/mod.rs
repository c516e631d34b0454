//! Derivation engine: pure functions that turn the task/project collections
//! into every view.
//!
//! # Responsibility
//! - Filter, sort and group the source collections per view.
//! - Resolve each task's area through its project.
//!
//! # Invariants
//! - Functions never mutate input and never fail; a dangling project
//!   reference derives no area.
//! - Nothing is cached; every call recomputes from the full collection.
//! - All sorts are stable.

pub mod areas;
pub mod board;
pub mod completed;
pub mod filter;
pub mod goals;
pub mod inbox;
pub mod kanban;
pub mod projects;
pub mod sort;
pub mod today;
pub mod upcoming;

use crate::model::area::{Area, AreaId};
use crate::model::goal::{Goal, GoalStatus};
use crate::model::project::{Project, ProjectId, ProjectStatus};
use crate::model::task::Task;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Read-only snapshot of the collections plus the query time.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub areas: &'a [Area],
    pub projects: &'a [Project],
    pub goals: &'a [Goal],
    pub tasks: &'a [Task],
    pub now: Timestamp,
}

impl<'a> ViewContext<'a> {
    pub fn area(&self, id: AreaId) -> Option<&'a Area> {
        self.areas.iter().find(|area| area.id == id)
    }

    pub fn project(&self, id: ProjectId) -> Option<&'a Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Derived area: the area of the task's project, if it resolves.
    pub fn area_of(&self, task: &Task) -> Option<AreaId> {
        task.project
            .and_then(|id| self.project(id))
            .map(|project| project.area)
    }
}

/// Secondary sort key applied after the done-last partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    None,
    Priority,
    Date,
}

/// Caller-owned filter/sort state passed to task views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewParams {
    pub sort_by: SortBy,
    pub show_completed: bool,
    /// Empty means no area restriction.
    pub selected_areas: BTreeSet<AreaId>,
}

/// Grouping key for area-based views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AreaKey {
    Area(AreaId),
    NoArea,
}

impl From<Option<AreaId>> for AreaKey {
    fn from(value: Option<AreaId>) -> Self {
        match value {
            Some(id) => Self::Area(id),
            None => Self::NoArea,
        }
    }
}

/// One ordered bucket of a grouped view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskGroup<'a, K> {
    pub key: K,
    pub tasks: Vec<&'a Task>,
}

/// Sort options shared by the project and goal lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListSort {
    #[default]
    None,
    Status,
    Date,
    Area,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectListParams {
    pub selected_areas: BTreeSet<AreaId>,
    pub selected_statuses: BTreeSet<ProjectStatus>,
    pub sort_by: ListSort,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalListParams {
    pub selected_areas: BTreeSet<AreaId>,
    pub selected_statuses: BTreeSet<GoalStatus>,
    pub sort_by: ListSort,
}

/// Groups tasks by key, keeping groups in first-appearance order and tasks
/// in input order.
pub(crate) fn group_by<'a, K, I, F>(tasks: I, key_of: F) -> Vec<TaskGroup<'a, K>>
where
    K: PartialEq,
    I: IntoIterator<Item = &'a Task>,
    F: Fn(&Task) -> K,
{
    let mut groups: Vec<TaskGroup<'a, K>> = Vec::new();
    for task in tasks {
        let key = key_of(task);
        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => group.tasks.push(task),
            None => groups.push(TaskGroup {
                key,
                tasks: vec![task],
            }),
        }
    }
    groups
}
