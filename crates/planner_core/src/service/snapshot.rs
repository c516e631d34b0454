//! Whole-store import and export.
//!
//! # Invariants
//! - Import validates every entity and reference before the planner exists;
//!   a bad snapshot never yields a partially loaded planner.
//! - Export never writes a task area. An imported legacy `area` is accepted
//!   only when it equals the area derived from the task's project.

use super::planner::{check_step, Planner};
use crate::model::area::Area;
use crate::model::goal::Goal;
use crate::model::normalize_title;
use crate::model::project::Project;
use crate::model::task::{Task, TaskRecord};
use crate::model::validation::InvalidState;
use crate::store::{EntityStore, ReferenceError, StoreResult};
use crate::time::Clock;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Serializable copy of all four collections in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub areas: Vec<Area>,
    pub projects: Vec<Project>,
    pub goals: Vec<Goal>,
    pub tasks: Vec<TaskRecord>,
}

impl<C: Clock> Planner<C> {
    pub fn export_snapshot(&self) -> Snapshot {
        let store = self.store();
        Snapshot {
            areas: store.areas.iter().cloned().collect(),
            projects: store.projects.iter().cloned().collect(),
            goals: store.goals.iter().cloned().collect(),
            tasks: store.tasks.iter().cloned().map(TaskRecord::from).collect(),
        }
    }

    /// Builds a planner from a snapshot after validating it in full.
    pub fn from_snapshot(snapshot: Snapshot, clock: C) -> StoreResult<Self> {
        let counts = (
            snapshot.areas.len(),
            snapshot.projects.len(),
            snapshot.goals.len(),
            snapshot.tasks.len(),
        );
        match load_store(snapshot) {
            Ok(store) => {
                info!(
                    "event=snapshot_import module=planner status=ok areas={} projects={} goals={} tasks={}",
                    counts.0, counts.1, counts.2, counts.3
                );
                Ok(Self::from_parts(store, clock))
            }
            Err(err) => {
                warn!(
                    "event=snapshot_import module=planner status=error error_code={}",
                    err.code()
                );
                Err(err)
            }
        }
    }
}

fn load_store(snapshot: Snapshot) -> StoreResult<EntityStore> {
    let mut store = EntityStore::new();

    for area in snapshot.areas {
        normalize_title(&area.name)?;
        store.areas.insert(area)?;
    }

    for project in snapshot.projects {
        project.validate()?;
        if !store.areas.contains(project.area) {
            return Err(ReferenceError::MissingArea(project.area).into());
        }
        store.projects.insert(project)?;
    }

    for goal in snapshot.goals {
        goal.validate()?;
        if !store.areas.contains(goal.area) {
            return Err(ReferenceError::MissingArea(goal.area).into());
        }
        if let Some(missing) = goal
            .project_ids
            .iter()
            .find(|id| !store.projects.contains(**id))
        {
            return Err(ReferenceError::MissingProject(*missing).into());
        }
        store.goals.insert(goal)?;
    }

    for mut record in snapshot.tasks {
        if let Some(area) = record.area.take() {
            let derived = record
                .project
                .and_then(|id| store.projects.get(id))
                .map(|project| project.area);
            if derived != Some(area) {
                return Err(InvalidState::AreaIsDerived.into());
            }
        }
        let mut task = Task::try_from(record)?;
        normalize_title(&task.title)?;
        task.check_due()?;
        if let Some(project) = task.project {
            if !store.projects.contains(project) {
                return Err(ReferenceError::MissingProject(project).into());
            }
        }
        check_step(&store, task.project, task.step)?;
        store.tasks.insert(task)?;
    }

    Ok(store)
}
