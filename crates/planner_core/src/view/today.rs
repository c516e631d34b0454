//! Today view: everything due by the end of today, grouped by derived area.

use super::filter::{completion_visible, DoneRecency};
use super::sort::sort_tasks;
use super::{group_by, AreaKey, TaskGroup, ViewContext, ViewParams};
use crate::time::end_of_day;

/// Tasks due at or before the end of today (overdue included).
///
/// Groups keep first-appearance order; tasks inside a group are sorted.
pub fn today_view<'a>(
    ctx: &ViewContext<'a>,
    params: &ViewParams,
) -> Vec<TaskGroup<'a, AreaKey>> {
    let cutoff = end_of_day(ctx.now);
    let visible = ctx.tasks.iter().filter(|task| {
        task.due_date.is_some_and(|due| due <= cutoff)
            && completion_visible(task, params, DoneRecency::SameDay, ctx.now)
    });

    let mut groups = group_by(visible, |task| AreaKey::from(ctx.area_of(task)));
    for group in &mut groups {
        sort_tasks(&mut group.tasks, params.sort_by);
    }
    groups
}
