//! Completion visibility and area-selection filters.

use super::{ViewContext, ViewParams};
use crate::model::area::AreaId;
use crate::model::task::Task;
use crate::time::{is_today, start_of_day, Timestamp};
use std::collections::BTreeSet;

/// Which done tasks a view keeps when `show_completed` is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoneRecency {
    /// Every done task.
    Any,
    /// Done on the calendar day of `now`.
    SameDay,
    /// Done at or after the start of today.
    SinceStartOfToday,
}

/// Open tasks always pass; done tasks pass only with `show_completed` and a
/// done time matching `recency`.
pub fn completion_visible(
    task: &Task,
    params: &ViewParams,
    recency: DoneRecency,
    now: Timestamp,
) -> bool {
    let Some(done_at) = task.completion.done_at() else {
        return true;
    };
    if !params.show_completed {
        return false;
    }
    match recency {
        DoneRecency::Any => true,
        DoneRecency::SameDay => is_today(done_at, now),
        DoneRecency::SinceStartOfToday => done_at >= start_of_day(now),
    }
}

/// Empty selection means no restriction.
pub fn area_selected(selected: &BTreeSet<AreaId>, area: Option<AreaId>) -> bool {
    if selected.is_empty() {
        return true;
    }
    area.is_some_and(|id| selected.contains(&id))
}

/// Applies the area selection to a task through its derived area.
pub fn task_area_selected(ctx: &ViewContext<'_>, selected: &BTreeSet<AreaId>, task: &Task) -> bool {
    area_selected(selected, ctx.area_of(task))
}
