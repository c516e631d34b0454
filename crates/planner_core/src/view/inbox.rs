//! Inbox: captured tasks with neither a due date nor a project.

use super::filter::{completion_visible, DoneRecency};
use super::sort::done_last;
use super::{ViewContext, ViewParams};
use crate::model::task::Task;

/// Done-last, then newest `created` first. `sort_by` does not apply here.
pub fn inbox_view<'a>(ctx: &ViewContext<'a>, params: &ViewParams) -> Vec<&'a Task> {
    let mut tasks = ctx
        .tasks
        .iter()
        .filter(|task| task.due_date.is_none() && task.project.is_none())
        .filter(|task| completion_visible(task, params, DoneRecency::SameDay, ctx.now))
        .collect::<Vec<_>>();
    tasks.sort_by(|a, b| done_last(a, b).then_with(|| b.created().cmp(&a.created())));
    tasks
}
