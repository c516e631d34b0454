//! Area-centric views: tasks grouped by area and per-area counts.

use super::filter::{area_selected, completion_visible, DoneRecency};
use super::sort::sort_tasks;
use super::{AreaKey, TaskGroup, ViewContext, ViewParams};
use crate::model::area::Area;
use serde::Serialize;

/// Open work attached to one area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaSummary<'a> {
    pub area: &'a Area,
    pub open_tasks: usize,
    pub projects: usize,
    pub goals: usize,
}

/// One group per selected area in area collection order, empty ones
/// included. Tasks without an area trail as `AreaKey::NoArea` when no
/// selection is active and at least one exists.
pub fn tasks_by_area<'a>(
    ctx: &ViewContext<'a>,
    params: &ViewParams,
) -> Vec<TaskGroup<'a, AreaKey>> {
    let visible = ctx
        .tasks
        .iter()
        .filter(|task| completion_visible(task, params, DoneRecency::Any, ctx.now))
        .collect::<Vec<_>>();

    let mut groups = ctx
        .areas
        .iter()
        .filter(|area| area_selected(&params.selected_areas, Some(area.id)))
        .map(|area| TaskGroup {
            key: AreaKey::Area(area.id),
            tasks: visible
                .iter()
                .copied()
                .filter(|task| ctx.area_of(task) == Some(area.id))
                .collect(),
        })
        .collect::<Vec<_>>();

    if params.selected_areas.is_empty() {
        let unassigned = visible
            .iter()
            .copied()
            .filter(|task| ctx.area_of(task).is_none())
            .collect::<Vec<_>>();
        if !unassigned.is_empty() {
            groups.push(TaskGroup {
                key: AreaKey::NoArea,
                tasks: unassigned,
            });
        }
    }

    for group in &mut groups {
        sort_tasks(&mut group.tasks, params.sort_by);
    }
    groups
}

/// Counts per area in collection order. Task counts follow the derived area.
pub fn area_summaries<'a>(ctx: &ViewContext<'a>) -> Vec<AreaSummary<'a>> {
    ctx.areas
        .iter()
        .map(|area| AreaSummary {
            area,
            open_tasks: ctx
                .tasks
                .iter()
                .filter(|task| !task.is_done() && ctx.area_of(task) == Some(area.id))
                .count(),
            projects: ctx
                .projects
                .iter()
                .filter(|project| project.area == area.id)
                .count(),
            goals: ctx.goals.iter().filter(|goal| goal.area == area.id).count(),
        })
        .collect()
}
