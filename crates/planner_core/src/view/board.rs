//! Project detail board: the project's tasks grouped under its steps.

use super::sort::sort_tasks;
use super::{ViewContext, ViewParams};
use crate::model::progress::Progress;
use crate::model::project::{Project, ProjectId, Step};
use crate::model::task::Task;

/// One step with its tasks and task completion ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct StepGroup<'a> {
    pub step: &'a Step,
    pub tasks: Vec<&'a Task>,
    pub progress: Progress,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectBoard<'a> {
    pub project: &'a Project,
    /// Ordered by `Step::order`.
    pub steps: Vec<StepGroup<'a>>,
    /// Project tasks with no step.
    pub unassigned: Vec<&'a Task>,
    /// Completed steps over all steps.
    pub step_progress: Progress,
    /// Done tasks over all project tasks.
    pub task_progress: Progress,
}

/// `None` when the project does not exist. Done tasks are always listed.
pub fn project_step_board<'a>(
    ctx: &ViewContext<'a>,
    project: ProjectId,
    params: &ViewParams,
) -> Option<ProjectBoard<'a>> {
    let project = ctx.project(project)?;
    let tasks = ctx
        .tasks
        .iter()
        .filter(|task| task.project == Some(project.id))
        .collect::<Vec<_>>();

    let steps = project
        .ordered_steps()
        .into_iter()
        .map(|step| {
            let mut step_tasks = tasks
                .iter()
                .copied()
                .filter(|task| task.step == Some(step.id))
                .collect::<Vec<_>>();
            let progress = done_ratio(&step_tasks);
            sort_tasks(&mut step_tasks, params.sort_by);
            StepGroup {
                step,
                tasks: step_tasks,
                progress,
            }
        })
        .collect();

    let mut unassigned = tasks
        .iter()
        .copied()
        .filter(|task| task.step.map_or(true, |step| !project.has_step(step)))
        .collect::<Vec<_>>();
    sort_tasks(&mut unassigned, params.sort_by);

    Some(ProjectBoard {
        project,
        steps,
        unassigned,
        step_progress: project.step_progress(),
        task_progress: done_ratio(&tasks),
    })
}

fn done_ratio(tasks: &[&Task]) -> Progress {
    let done = tasks.iter().filter(|task| task.is_done()).count();
    Progress::new(done, tasks.len())
}

#[cfg(test)]
mod tests {
    use super::project_step_board;
    use crate::model::area::Area;
    use crate::model::project::{Project, ProjectStatus, Step};
    use crate::model::task::{Completion, Task};
    use crate::view::{ViewContext, ViewParams};
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn steps_follow_order_and_unassigned_trails() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let area = Area::new("Work", "blue");
        let design = Step {
            id: Uuid::now_v7(),
            title: "Design".to_string(),
            order: 2,
            completed: false,
        };
        let research = Step {
            id: Uuid::now_v7(),
            title: "Research".to_string(),
            order: 1,
            completed: true,
        };
        let project = Project {
            id: Uuid::now_v7(),
            title: "Website".to_string(),
            description: None,
            area: area.id,
            start_date: None,
            end_date: None,
            status: ProjectStatus::Active,
            steps: vec![design.clone(), research.clone()],
        };

        let mut sketch = Task::new("sketch", now);
        sketch.project = Some(project.id);
        sketch.step = Some(design.id);
        let mut interview = Task::new("interview", now);
        interview.project = Some(project.id);
        interview.step = Some(research.id);
        interview.completion = Completion::Completed(now);
        let mut loose = Task::new("loose", now);
        loose.project = Some(project.id);

        let areas = vec![area];
        let projects = vec![project.clone()];
        let tasks = vec![sketch, interview, loose];
        let ctx = ViewContext {
            areas: &areas,
            projects: &projects,
            goals: &[],
            tasks: &tasks,
            now,
        };

        let board = project_step_board(&ctx, project.id, &ViewParams::default()).unwrap();
        assert_eq!(board.steps[0].step.title, "Research");
        assert_eq!(board.steps[0].progress.done, 1);
        assert_eq!(board.steps[1].tasks[0].title, "sketch");
        assert_eq!(board.unassigned[0].title, "loose");
        assert_eq!((board.step_progress.done, board.step_progress.total), (1, 2));
        assert_eq!((board.task_progress.done, board.task_progress.total), (1, 3));
        assert!(project_step_board(&ctx, Uuid::now_v7(), &ViewParams::default()).is_none());
    }
}
