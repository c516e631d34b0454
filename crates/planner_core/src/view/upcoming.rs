//! Upcoming view: dated tasks bucketed by relative day.

use super::filter::{completion_visible, DoneRecency};
use super::sort::sort_tasks;
use super::{TaskGroup, ViewContext, ViewParams};
use crate::time::{relative_day_bucket, RelativeDayBucket};

/// Buckets follow `RelativeDayBucket::ALL`; empty buckets are omitted.
pub fn upcoming_view<'a>(
    ctx: &ViewContext<'a>,
    params: &ViewParams,
) -> Vec<TaskGroup<'a, RelativeDayBucket>> {
    let mut groups: Vec<TaskGroup<'a, RelativeDayBucket>> = RelativeDayBucket::ALL
        .iter()
        .map(|bucket| TaskGroup {
            key: *bucket,
            tasks: Vec::new(),
        })
        .collect();

    for task in ctx.tasks {
        let Some(due) = task.due_date else {
            continue;
        };
        if !completion_visible(task, params, DoneRecency::SinceStartOfToday, ctx.now) {
            continue;
        }
        let bucket = relative_day_bucket(due, ctx.now);
        if let Some(group) = groups.iter_mut().find(|group| group.key == bucket) {
            group.tasks.push(task);
        }
    }

    groups.retain(|group| !group.tasks.is_empty());
    for group in &mut groups {
        sort_tasks(&mut group.tasks, params.sort_by);
    }
    groups
}
