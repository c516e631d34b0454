//! Goal list and goal progress.

use super::filter::area_selected;
use super::projects::{compare_area_names, compare_start_dates};
use super::{GoalListParams, ListSort, ViewContext};
use crate::model::goal::Goal;
use crate::model::progress::Progress;
use crate::model::project::ProjectStatus;

/// Filtered and stably sorted goals.
pub fn goal_list<'a>(ctx: &ViewContext<'a>, params: &GoalListParams) -> Vec<&'a Goal> {
    let mut goals = ctx
        .goals
        .iter()
        .filter(|goal| area_selected(&params.selected_areas, Some(goal.area)))
        .filter(|goal| {
            params.selected_statuses.is_empty() || params.selected_statuses.contains(&goal.status)
        })
        .collect::<Vec<_>>();

    match params.sort_by {
        ListSort::None => {}
        ListSort::Status => goals.sort_by_key(|goal| goal.status),
        ListSort::Date => goals.sort_by(|a, b| compare_start_dates(a.start_date, b.start_date)),
        ListSort::Area => goals.sort_by(|a, b| compare_area_names(ctx, a.area, b.area)),
    }
    goals
}

/// Finished projects over attached projects that still exist.
pub fn goal_progress(ctx: &ViewContext<'_>, goal: &Goal) -> Progress {
    let attached = goal
        .project_ids
        .iter()
        .filter_map(|id| ctx.project(*id))
        .collect::<Vec<_>>();
    let finished = attached
        .iter()
        .filter(|project| project.status == ProjectStatus::Finished)
        .count();
    Progress::new(finished, attached.len())
}

#[cfg(test)]
mod tests {
    use super::{goal_list, goal_progress};
    use crate::model::area::Area;
    use crate::model::goal::{Goal, GoalStatus};
    use crate::model::project::{Project, ProjectStatus};
    use crate::view::{GoalListParams, ListSort, ViewContext};
    use chrono::NaiveDate;
    use std::collections::BTreeSet;
    use uuid::Uuid;

    fn project(area: Uuid, status: ProjectStatus) -> Project {
        Project {
            id: Uuid::now_v7(),
            title: "p".to_string(),
            description: None,
            area,
            start_date: None,
            end_date: None,
            status,
            steps: Vec::new(),
        }
    }

    fn goal(title: &str, area: Uuid, status: GoalStatus) -> Goal {
        Goal {
            id: Uuid::now_v7(),
            title: title.to_string(),
            description: None,
            area,
            start_date: None,
            end_date: None,
            status,
            project_ids: BTreeSet::new(),
        }
    }

    #[test]
    fn progress_counts_finished_projects_and_skips_dangling_ids() {
        let area = Area::new("Work", "blue");
        let done = project(area.id, ProjectStatus::Finished);
        let running = project(area.id, ProjectStatus::Active);
        let mut g = goal("Ship", area.id, GoalStatus::Active);
        g.project_ids = BTreeSet::from([done.id, running.id, Uuid::now_v7()]);

        let areas = vec![area];
        let projects = vec![done, running];
        let now = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let ctx = ViewContext {
            areas: &areas,
            projects: &projects,
            goals: &[],
            tasks: &[],
            now,
        };
        let progress = goal_progress(&ctx, &g);
        assert_eq!((progress.done, progress.total), (1, 2));
    }

    #[test]
    fn list_sorts_by_area_name_case_insensitively() {
        let zoo = Area::new("zoo", "red");
        let alpha = Area::new("Alpha", "blue");
        let goals = vec![
            goal("first", zoo.id, GoalStatus::New),
            goal("second", alpha.id, GoalStatus::Paused),
        ];
        let areas = vec![zoo, alpha];
        let now = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let ctx = ViewContext {
            areas: &areas,
            projects: &[],
            goals: &goals,
            tasks: &[],
            now,
        };
        let params = GoalListParams {
            sort_by: ListSort::Area,
            ..GoalListParams::default()
        };
        let titles = goal_list(&ctx, &params)
            .iter()
            .map(|g| g.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["second", "first"]);
    }
}
