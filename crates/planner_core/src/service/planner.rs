//! Planner use-case service.
//!
//! # Responsibility
//! - Be the single mutation surface over the entity store.
//! - Enforce cross-entity rules: referenced ids exist, steps belong to the
//!   task's project, completion stays mutually exclusive.
//! - Expose every derived view through one `ViewContext`.
//!
//! # Invariants
//! - Every mutation replaces whole objects; a failed mutation leaves the
//!   store unchanged.
//! - Area is never written on a task; moving a task between projects moves
//!   it between areas.
//! - Removing a project or step clears the references that pointed at it.
//!
//! # See also
//! - `service::snapshot` for import/export.
//! - `view` for the pure derivations behind the `list_*` queries.

use crate::model::area::{Area, AreaId, AreaPatch};
use crate::model::goal::{Goal, GoalDraft, GoalId, GoalPatch};
use crate::model::progress::Progress;
use crate::model::project::{
    validate_date_range, Project, ProjectDraft, ProjectId, ProjectPatch, ProjectStatus, Step,
    StepId,
};
use crate::model::task::{Completion, Task, TaskDraft, TaskId, TaskPatch, Timeframe};
use crate::model::{new_entity_id, normalize_title};
use crate::store::{EntityKind, EntityStore, ReferenceError, StoreError, StoreResult};
use crate::time::{Clock, DueDateTime, RelativeDayBucket, SystemClock, Timestamp};
use crate::view::areas::{area_summaries, tasks_by_area, AreaSummary};
use crate::view::board::{project_step_board, ProjectBoard};
use crate::view::completed::completed_view;
use crate::view::goals::{goal_list, goal_progress};
use crate::view::inbox::inbox_view;
use crate::view::kanban::{kanban_by_project_status, kanban_by_timeframe, ProjectColumn};
use crate::view::projects::project_list;
use crate::view::today::today_view;
use crate::view::upcoming::upcoming_view;
use crate::view::{
    AreaKey, GoalListParams, ProjectListParams, TaskGroup, ViewContext, ViewParams,
};
use chrono::NaiveDate;
use log::{log, warn, Level};
use uuid::Uuid;

/// Title given to steps added without one.
pub const DEFAULT_STEP_TITLE: &str = "New Step";

/// Owns the entity store and the clock that stamps completion times.
#[derive(Debug)]
pub struct Planner<C: Clock = SystemClock> {
    store: EntityStore,
    clock: C,
}

impl Planner<SystemClock> {
    /// Empty planner on the local wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Planner<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Planner<C> {
    pub fn with_clock(clock: C) -> Self {
        Self::from_parts(EntityStore::new(), clock)
    }

    /// Wraps an already validated store.
    pub(crate) fn from_parts(store: EntityStore, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Read-only view input over the current collections at `now()`.
    pub fn view_context(&self) -> ViewContext<'_> {
        ViewContext {
            areas: self.store.areas.as_slice(),
            projects: self.store.projects.as_slice(),
            goals: self.store.goals.as_slice(),
            tasks: self.store.tasks.as_slice(),
            now: self.now(),
        }
    }

    // ---- areas ----

    pub fn create_area(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> StoreResult<AreaId> {
        let id = new_entity_id();
        let name = name.into();
        let color = color.into();
        let result = normalize_title(&name)
            .map_err(StoreError::from)
            .and_then(|name| self.store.areas.insert(Area::with_id(id, name, color)))
            .map(|()| id);
        logged(Level::Info, "area_create", id, result)
    }

    pub fn update_area(&mut self, id: AreaId, patch: AreaPatch) -> StoreResult<()> {
        let result = self.apply_area_patch(id, patch);
        logged(Level::Debug, "area_update", id, result)
    }

    /// Fails with `AreaInUse` while a project or goal still points at it.
    pub fn remove_area(&mut self, id: AreaId) -> StoreResult<()> {
        let result = self.remove_area_checked(id);
        logged(Level::Info, "area_remove", id, result)
    }

    pub fn area(&self, id: AreaId) -> Option<&Area> {
        self.store.areas.get(id)
    }

    pub fn areas(&self) -> &[Area] {
        self.store.areas.as_slice()
    }

    fn apply_area_patch(&mut self, id: AreaId, patch: AreaPatch) -> StoreResult<()> {
        let mut area = self.store.areas.require(id)?.clone();
        if let Some(name) = patch.name {
            area.name = normalize_title(&name)?;
        }
        if let Some(color) = patch.color {
            area.color = color;
        }
        self.store.areas.replace(area)
    }

    fn remove_area_checked(&mut self, id: AreaId) -> StoreResult<()> {
        self.store.areas.require(id)?;
        let in_use = self.store.projects.iter().any(|project| project.area == id)
            || self.store.goals.iter().any(|goal| goal.area == id);
        if in_use {
            return Err(ReferenceError::AreaInUse(id).into());
        }
        self.store.areas.remove(id).map(|_| ())
    }

    // ---- projects ----

    pub fn create_project(&mut self, draft: ProjectDraft) -> StoreResult<ProjectId> {
        let id = new_entity_id();
        let result = self.insert_project(id, draft).map(|()| id);
        logged(Level::Info, "project_create", id, result)
    }

    pub fn update_project(&mut self, id: ProjectId, patch: ProjectPatch) -> StoreResult<()> {
        let result = self.apply_project_patch(id, patch);
        logged(Level::Debug, "project_update", id, result)
    }

    pub fn update_project_status(&mut self, id: ProjectId, status: ProjectStatus) -> StoreResult<()> {
        let result = self.modify_project(id, |project| {
            project.status = status;
            Ok(())
        });
        logged(Level::Debug, "project_status_update", id, result)
    }

    /// Removes the project, clears `project`/`step` on its tasks and detaches
    /// it from every goal.
    pub fn remove_project(&mut self, id: ProjectId) -> StoreResult<()> {
        let result = self.remove_project_cascade(id);
        logged(Level::Info, "project_remove", id, result)
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.store.projects.get(id)
    }

    pub fn projects(&self) -> &[Project] {
        self.store.projects.as_slice()
    }

    fn insert_project(&mut self, id: ProjectId, draft: ProjectDraft) -> StoreResult<()> {
        let title = normalize_title(&draft.title)?;
        validate_date_range(draft.start_date, draft.end_date)?;
        self.require_area(draft.area)?;
        self.store.projects.insert(Project {
            id,
            title,
            description: draft.description,
            area: draft.area,
            start_date: draft.start_date,
            end_date: draft.end_date,
            status: draft.status,
            steps: Vec::new(),
        })
    }

    fn apply_project_patch(&mut self, id: ProjectId, patch: ProjectPatch) -> StoreResult<()> {
        if let Some(area) = patch.area {
            self.require_area(area)?;
        }
        self.modify_project(id, |project| {
            if let Some(title) = patch.title {
                project.title = normalize_title(&title)?;
            }
            if let Some(description) = patch.description {
                project.description = description;
            }
            if let Some(area) = patch.area {
                project.area = area;
            }
            if let Some(start_date) = patch.start_date {
                project.start_date = start_date;
            }
            if let Some(end_date) = patch.end_date {
                project.end_date = end_date;
            }
            if let Some(status) = patch.status {
                project.status = status;
            }
            validate_date_range(project.start_date, project.end_date)?;
            Ok(())
        })
    }

    fn remove_project_cascade(&mut self, id: ProjectId) -> StoreResult<()> {
        self.store.projects.remove(id)?;
        let orphaned = self
            .store
            .tasks
            .iter()
            .filter(|task| task.project == Some(id))
            .map(|task| {
                let mut task = task.clone();
                task.project = None;
                task.step = None;
                task
            })
            .collect::<Vec<_>>();
        for task in orphaned {
            self.store.tasks.replace(task)?;
        }
        let detached = self
            .store
            .goals
            .iter()
            .filter(|goal| goal.project_ids.contains(&id))
            .map(|goal| {
                let mut goal = goal.clone();
                goal.project_ids.remove(&id);
                goal
            })
            .collect::<Vec<_>>();
        for goal in detached {
            self.store.goals.replace(goal)?;
        }
        Ok(())
    }

    fn modify_project<F>(&mut self, id: ProjectId, apply: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Project) -> StoreResult<()>,
    {
        let mut project = self.store.projects.require(id)?.clone();
        apply(&mut project)?;
        self.store.projects.replace(project)
    }

    // ---- steps ----

    /// Appends a step after the current last one. Blank titles become
    /// `DEFAULT_STEP_TITLE`.
    pub fn add_step(&mut self, project: ProjectId, title: impl Into<String>) -> StoreResult<StepId> {
        let id = new_entity_id();
        let title = title.into();
        let result = self
            .modify_project(project, |project| {
                let title = normalize_title(&title).unwrap_or_else(|_| DEFAULT_STEP_TITLE.to_string());
                let order = project.next_step_order();
                project.steps.push(Step {
                    id,
                    title,
                    order,
                    completed: false,
                });
                Ok(())
            })
            .map(|()| id);
        logged(Level::Info, "step_add", id, result)
    }

    pub fn rename_step(
        &mut self,
        project: ProjectId,
        step: StepId,
        title: impl Into<String>,
    ) -> StoreResult<()> {
        let title = title.into();
        let result = self.modify_step(project, step, |step| {
            step.title = normalize_title(&title)?;
            Ok(())
        });
        logged(Level::Debug, "step_rename", step, result)
    }

    /// Flips the step's completed flag and returns the new value.
    pub fn toggle_step(&mut self, project: ProjectId, step: StepId) -> StoreResult<bool> {
        let mut completed = false;
        let result = self
            .modify_step(project, step, |step| {
                step.completed = !step.completed;
                completed = step.completed;
                Ok(())
            })
            .map(|()| completed);
        logged(Level::Debug, "step_toggle", step, result)
    }

    /// Moves the step to `target_index` in display order and renumbers
    /// every step's `order` to `1..=n`. Indexes past the end append.
    pub fn move_step(
        &mut self,
        project: ProjectId,
        step: StepId,
        target_index: usize,
    ) -> StoreResult<()> {
        let result = self.modify_project(project, |project| {
            let mut ordered = project.ordered_steps().into_iter().cloned().collect::<Vec<_>>();
            let from = ordered
                .iter()
                .position(|candidate| candidate.id == step)
                .ok_or(StoreError::NotFound(EntityKind::Step, step))?;
            let moved = ordered.remove(from);
            let target = target_index.min(ordered.len());
            ordered.insert(target, moved);
            for (index, step) in ordered.iter_mut().enumerate() {
                step.order = index as i64 + 1;
            }
            project.steps = ordered;
            Ok(())
        });
        logged(Level::Debug, "step_move", step, result)
    }

    /// Removes the step and unpins every task that referenced it.
    pub fn remove_step(&mut self, project: ProjectId, step: StepId) -> StoreResult<()> {
        let result = self.remove_step_cascade(project, step);
        logged(Level::Info, "step_remove", step, result)
    }

    fn modify_step<F>(&mut self, project: ProjectId, step: StepId, apply: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Step) -> StoreResult<()>,
    {
        self.modify_project(project, |project| {
            let target = project
                .steps
                .iter_mut()
                .find(|candidate| candidate.id == step)
                .ok_or(StoreError::NotFound(EntityKind::Step, step))?;
            apply(target)
        })
    }

    fn remove_step_cascade(&mut self, project: ProjectId, step: StepId) -> StoreResult<()> {
        self.modify_project(project, |project| {
            let before = project.steps.len();
            project.steps.retain(|candidate| candidate.id != step);
            if project.steps.len() == before {
                return Err(StoreError::NotFound(EntityKind::Step, step));
            }
            Ok(())
        })?;
        let unpinned = self
            .store
            .tasks
            .iter()
            .filter(|task| task.step == Some(step))
            .map(|task| {
                let mut task = task.clone();
                task.step = None;
                task
            })
            .collect::<Vec<_>>();
        for task in unpinned {
            self.store.tasks.replace(task)?;
        }
        Ok(())
    }

    // ---- goals ----

    pub fn create_goal(&mut self, draft: GoalDraft) -> StoreResult<GoalId> {
        let id = new_entity_id();
        let result = self.insert_goal(id, draft).map(|()| id);
        logged(Level::Info, "goal_create", id, result)
    }

    pub fn update_goal(&mut self, id: GoalId, patch: GoalPatch) -> StoreResult<()> {
        let result = self.apply_goal_patch(id, patch);
        logged(Level::Debug, "goal_update", id, result)
    }

    pub fn remove_goal(&mut self, id: GoalId) -> StoreResult<()> {
        let result = self.store.goals.remove(id).map(|_| ());
        logged(Level::Info, "goal_remove", id, result)
    }

    /// Attaching an already attached project is a no-op.
    pub fn attach_project(&mut self, goal: GoalId, project: ProjectId) -> StoreResult<()> {
        let result = self.require_project(project).and_then(|()| {
            self.modify_goal(goal, |goal| {
                goal.project_ids.insert(project);
                Ok(())
            })
        });
        logged(Level::Debug, "goal_attach_project", goal, result)
    }

    pub fn detach_project(&mut self, goal: GoalId, project: ProjectId) -> StoreResult<()> {
        let result = self.modify_goal(goal, |goal| {
            goal.project_ids.remove(&project);
            Ok(())
        });
        logged(Level::Debug, "goal_detach_project", goal, result)
    }

    /// Finished attached projects over all attached projects.
    pub fn goal_progress(&self, id: GoalId) -> StoreResult<Progress> {
        let goal = self.store.goals.require(id)?;
        Ok(goal_progress(&self.view_context(), goal))
    }

    pub fn goal(&self, id: GoalId) -> Option<&Goal> {
        self.store.goals.get(id)
    }

    pub fn goals(&self) -> &[Goal] {
        self.store.goals.as_slice()
    }

    fn insert_goal(&mut self, id: GoalId, draft: GoalDraft) -> StoreResult<()> {
        let title = normalize_title(&draft.title)?;
        validate_date_range(draft.start_date, draft.end_date)?;
        self.require_area(draft.area)?;
        for project in &draft.project_ids {
            self.require_project(*project)?;
        }
        self.store.goals.insert(Goal {
            id,
            title,
            description: draft.description,
            area: draft.area,
            start_date: draft.start_date,
            end_date: draft.end_date,
            status: draft.status,
            project_ids: draft.project_ids,
        })
    }

    fn apply_goal_patch(&mut self, id: GoalId, patch: GoalPatch) -> StoreResult<()> {
        if let Some(area) = patch.area {
            self.require_area(area)?;
        }
        if let Some(project_ids) = &patch.project_ids {
            for project in project_ids {
                self.require_project(*project)?;
            }
        }
        self.modify_goal(id, |goal| {
            if let Some(title) = patch.title {
                goal.title = normalize_title(&title)?;
            }
            if let Some(description) = patch.description {
                goal.description = description;
            }
            if let Some(area) = patch.area {
                goal.area = area;
            }
            if let Some(start_date) = patch.start_date {
                goal.start_date = start_date;
            }
            if let Some(end_date) = patch.end_date {
                goal.end_date = end_date;
            }
            if let Some(status) = patch.status {
                goal.status = status;
            }
            if let Some(project_ids) = patch.project_ids {
                goal.project_ids = project_ids;
            }
            validate_date_range(goal.start_date, goal.end_date)?;
            Ok(())
        })
    }

    fn modify_goal<F>(&mut self, id: GoalId, apply: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Goal) -> StoreResult<()>,
    {
        let mut goal = self.store.goals.require(id)?.clone();
        apply(&mut goal)?;
        self.store.goals.replace(goal)
    }

    // ---- tasks ----

    /// Creates an open task stamped with `now()` as its creation time.
    pub fn create_task(&mut self, draft: TaskDraft) -> StoreResult<TaskId> {
        let id = new_entity_id();
        let result = self.insert_task(id, draft).map(|()| id);
        logged(Level::Info, "task_create", id, result)
    }

    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> StoreResult<()> {
        let result = self.apply_task_patch(id, patch);
        logged(Level::Debug, "task_update", id, result)
    }

    pub fn remove_task(&mut self, id: TaskId) -> StoreResult<()> {
        let result = self.store.tasks.remove(id).map(|_| ());
        logged(Level::Info, "task_remove", id, result)
    }

    /// Checkbox toggle: open -> completed(now), completed or cancelled -> open.
    pub fn toggle_task_done(&mut self, id: TaskId) -> StoreResult<Completion> {
        let now = self.now();
        let result = self.modify_task(id, |task, _| {
            task.completion = task.completion.toggled(now);
            Ok(task.completion)
        });
        logged(Level::Debug, "task_toggle", id, result)
    }

    /// Marks the task cancelled at `now()`, clearing any completion time.
    pub fn cancel_task(&mut self, id: TaskId) -> StoreResult<()> {
        let now = self.now();
        let result = self.modify_task(id, |task, _| {
            task.completion = Completion::Cancelled(now);
            Ok(())
        });
        logged(Level::Debug, "task_cancel", id, result)
    }

    /// Moves the task to another project (or none). A step survives only
    /// when the project stays the same.
    pub fn assign_task_to_project(
        &mut self,
        id: TaskId,
        project: Option<ProjectId>,
    ) -> StoreResult<()> {
        let result = self.modify_task(id, |task, store| {
            set_task_project(store, task, project)
        });
        logged(Level::Debug, "task_assign_project", id, result)
    }

    /// Pins the task to a step of its current project, or unpins it.
    pub fn assign_task_to_step(&mut self, id: TaskId, step: Option<StepId>) -> StoreResult<()> {
        let result = self.modify_task(id, |task, store| {
            check_step(store, task.project, step)?;
            task.step = step;
            Ok(())
        });
        logged(Level::Debug, "task_assign_step", id, result)
    }

    pub fn update_task_timeframe(&mut self, id: TaskId, timeframe: Timeframe) -> StoreResult<()> {
        let result = self.modify_task(id, |task, _| {
            task.timeframe = timeframe;
            Ok(())
        });
        logged(Level::Debug, "task_timeframe_update", id, result)
    }

    /// Sets or clears the due date; clearing also drops the time interval.
    pub fn update_task_due_date(
        &mut self,
        id: TaskId,
        due: Option<DueDateTime>,
    ) -> StoreResult<()> {
        let result = self.modify_task(id, |task, _| {
            task.set_due(due);
            Ok(())
        });
        logged(Level::Debug, "task_due_update", id, result)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.store.tasks.get(id)
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks.as_slice()
    }

    /// Derived area of the task; `None` without a resolvable project.
    pub fn task_area(&self, id: TaskId) -> StoreResult<Option<AreaId>> {
        let task = self.store.tasks.require(id)?;
        Ok(self.view_context().area_of(task))
    }

    fn insert_task(&mut self, id: TaskId, draft: TaskDraft) -> StoreResult<()> {
        let mut task = Task::with_id(id, normalize_title(&draft.title)?, self.now());
        task.description = draft.description;
        task.priority = draft.priority;
        task.timeframe = draft.timeframe;
        task.set_due(draft.due);
        if let Some(project) = draft.project {
            self.require_project(project)?;
        }
        check_step(&self.store, draft.project, draft.step)?;
        task.project = draft.project;
        task.step = draft.step;
        self.store.tasks.insert(task)
    }

    fn apply_task_patch(&mut self, id: TaskId, patch: TaskPatch) -> StoreResult<()> {
        self.modify_task(id, |task, store| {
            if let Some(title) = patch.title {
                task.title = normalize_title(&title)?;
            }
            if let Some(description) = patch.description {
                task.description = description;
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            if let Some(timeframe) = patch.timeframe {
                task.timeframe = timeframe;
            }
            if let Some(due) = patch.due {
                task.set_due(due);
            }
            if let Some(project) = patch.project {
                set_task_project(store, task, project)?;
            }
            if let Some(step) = patch.step {
                check_step(store, task.project, step)?;
                task.step = step;
            }
            task.completion = task.completion.patched(patch.completed, patch.cancelled)?;
            Ok(())
        })
    }

    fn modify_task<T, F>(&mut self, id: TaskId, apply: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Task, &EntityStore) -> StoreResult<T>,
    {
        let mut task = self.store.tasks.require(id)?.clone();
        let value = apply(&mut task, &self.store)?;
        self.store.tasks.replace(task)?;
        Ok(value)
    }

    fn require_area(&self, id: AreaId) -> StoreResult<()> {
        if self.store.areas.contains(id) {
            Ok(())
        } else {
            Err(ReferenceError::MissingArea(id).into())
        }
    }

    fn require_project(&self, id: ProjectId) -> StoreResult<()> {
        if self.store.projects.contains(id) {
            Ok(())
        } else {
            Err(ReferenceError::MissingProject(id).into())
        }
    }

    // ---- queries ----

    pub fn list_today(&self, params: &ViewParams) -> Vec<TaskGroup<'_, AreaKey>> {
        today_view(&self.view_context(), params)
    }

    pub fn list_upcoming(&self, params: &ViewParams) -> Vec<TaskGroup<'_, RelativeDayBucket>> {
        upcoming_view(&self.view_context(), params)
    }

    pub fn list_inbox(&self, params: &ViewParams) -> Vec<&Task> {
        inbox_view(&self.view_context(), params)
    }

    pub fn list_completed(&self) -> Vec<TaskGroup<'_, NaiveDate>> {
        completed_view(&self.view_context())
    }

    pub fn list_by_timeframe(&self, params: &ViewParams) -> Vec<TaskGroup<'_, Timeframe>> {
        kanban_by_timeframe(&self.view_context(), params)
    }

    pub fn list_projects_by_status(&self, params: &ProjectListParams) -> Vec<ProjectColumn<'_>> {
        kanban_by_project_status(&self.view_context(), params)
    }

    pub fn list_by_area(&self, params: &ViewParams) -> Vec<TaskGroup<'_, AreaKey>> {
        tasks_by_area(&self.view_context(), params)
    }

    pub fn list_projects(&self, params: &ProjectListParams) -> Vec<&Project> {
        project_list(&self.view_context(), params)
    }

    pub fn list_goals(&self, params: &GoalListParams) -> Vec<&Goal> {
        goal_list(&self.view_context(), params)
    }

    pub fn project_board(
        &self,
        project: ProjectId,
        params: &ViewParams,
    ) -> StoreResult<ProjectBoard<'_>> {
        project_step_board(&self.view_context(), project, params)
            .ok_or(StoreError::NotFound(EntityKind::Project, project))
    }

    pub fn area_summaries(&self) -> Vec<AreaSummary<'_>> {
        area_summaries(&self.view_context())
    }
}

/// Sets `task.project`, clearing `task.step` when the project changes.
fn set_task_project(
    store: &EntityStore,
    task: &mut Task,
    project: Option<ProjectId>,
) -> StoreResult<()> {
    if let Some(id) = project {
        if !store.projects.contains(id) {
            return Err(ReferenceError::MissingProject(id).into());
        }
    }
    if task.project != project {
        task.step = None;
    }
    task.project = project;
    Ok(())
}

/// A step may only be set when it belongs to `project`.
pub(crate) fn check_step(
    store: &EntityStore,
    project: Option<ProjectId>,
    step: Option<StepId>,
) -> StoreResult<()> {
    let Some(step) = step else {
        return Ok(());
    };
    let Some(project) = project else {
        return Err(ReferenceError::StepWithoutProject(step).into());
    };
    let owner = store.projects.require(project)?;
    if owner.has_step(step) {
        Ok(())
    } else {
        Err(ReferenceError::StepNotInProject { step, project }.into())
    }
}

fn logged<T>(level: Level, event: &'static str, id: Uuid, result: StoreResult<T>) -> StoreResult<T> {
    match &result {
        Ok(_) => log!(level, "event={event} module=planner status=ok id={id}"),
        Err(err) => warn!(
            "event={event} module=planner status=error id={id} error_code={}",
            err.code()
        ),
    }
    result
}
