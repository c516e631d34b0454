//! Completed view: every done task grouped by the day it was finished.

use super::{TaskGroup, ViewContext};
use chrono::NaiveDate;

/// Day groups newest first; collection order inside a day.
///
/// Ignores `show_completed` and the area selection.
pub fn completed_view<'a>(ctx: &ViewContext<'a>) -> Vec<TaskGroup<'a, NaiveDate>> {
    let mut groups: Vec<TaskGroup<'a, NaiveDate>> = Vec::new();
    for task in ctx.tasks {
        let Some(done_at) = task.completion.done_at() else {
            continue;
        };
        let day = done_at.date();
        match groups.iter_mut().find(|group| group.key == day) {
            Some(group) => group.tasks.push(task),
            None => groups.push(TaskGroup {
                key: day,
                tasks: vec![task],
            }),
        }
    }
    groups.sort_by(|a, b| b.key.cmp(&a.key));
    groups
}
