//! Kanban boards: tasks by timeframe and projects by status.

use super::filter::{completion_visible, task_area_selected, DoneRecency};
use super::projects::project_list;
use super::sort::sort_tasks;
use super::{ProjectListParams, TaskGroup, ViewContext, ViewParams};
use crate::model::project::{Project, ProjectStatus};
use crate::model::task::Timeframe;

/// One project board column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectColumn<'a> {
    pub status: ProjectStatus,
    pub projects: Vec<&'a Project>,
}

/// Four columns in `Timeframe::ALL` order, always present.
///
/// Only tasks that derive an area are placed on the board.
pub fn kanban_by_timeframe<'a>(
    ctx: &ViewContext<'a>,
    params: &ViewParams,
) -> Vec<TaskGroup<'a, Timeframe>> {
    Timeframe::ALL
        .iter()
        .map(|timeframe| {
            let mut tasks = ctx
                .tasks
                .iter()
                .filter(|task| task.timeframe == *timeframe)
                .filter(|task| ctx.area_of(task).is_some())
                .filter(|task| task_area_selected(ctx, &params.selected_areas, task))
                .filter(|task| completion_visible(task, params, DoneRecency::Any, ctx.now))
                .collect::<Vec<_>>();
            sort_tasks(&mut tasks, params.sort_by);
            TaskGroup {
                key: *timeframe,
                tasks,
            }
        })
        .collect()
}

/// Four columns in `ProjectStatus::ALL` order, always present.
pub fn kanban_by_project_status<'a>(
    ctx: &ViewContext<'a>,
    params: &ProjectListParams,
) -> Vec<ProjectColumn<'a>> {
    let projects = project_list(ctx, params);
    ProjectStatus::ALL
        .iter()
        .map(|status| ProjectColumn {
            status: *status,
            projects: projects
                .iter()
                .copied()
                .filter(|project| project.status == *status)
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{kanban_by_project_status, kanban_by_timeframe};
    use crate::model::area::Area;
    use crate::model::project::{Project, ProjectStatus};
    use crate::model::task::{Task, Timeframe};
    use crate::view::{ProjectListParams, ViewContext, ViewParams};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn now() -> crate::time::Timestamp {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn timeframe_board_always_has_four_columns_and_skips_arealess_tasks() {
        let area = Area::new("Work", "blue");
        let project = Project {
            id: Uuid::now_v7(),
            title: "p".to_string(),
            description: None,
            area: area.id,
            start_date: None,
            end_date: None,
            status: ProjectStatus::Active,
            steps: Vec::new(),
        };
        let mut placed = Task::new("placed", now());
        placed.project = Some(project.id);
        placed.timeframe = Timeframe::Later;
        let loose = Task::new("loose", now());

        let areas = vec![area];
        let projects = vec![project];
        let tasks = vec![placed, loose];
        let ctx = ViewContext {
            areas: &areas,
            projects: &projects,
            goals: &[],
            tasks: &tasks,
            now: now(),
        };

        let columns = kanban_by_timeframe(&ctx, &ViewParams::default());
        let keys = columns.iter().map(|c| c.key).collect::<Vec<_>>();
        assert_eq!(keys, Timeframe::ALL.to_vec());
        assert!(columns[0].tasks.is_empty());
        assert_eq!(columns[2].tasks[0].title, "placed");

        let status_columns = kanban_by_project_status(&ctx, &ProjectListParams::default());
        assert_eq!(status_columns.len(), 4);
        assert_eq!(status_columns[1].projects.len(), 1);
    }
}
