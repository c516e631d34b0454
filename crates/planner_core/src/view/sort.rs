//! Task ordering shared by every list view.
//!
//! Primary key: not-done before done (skipped for the Completed view).
//! Secondary key: `SortBy`. `slice::sort_by` is stable, so `SortBy::None`
//! keeps input order inside each partition.

use super::SortBy;
use crate::model::task::Task;
use std::cmp::Ordering;

/// Sorts in place with the done-last partition followed by `sort_by`.
pub fn sort_tasks(tasks: &mut [&Task], sort_by: SortBy) {
    tasks.sort_by(|a, b| done_last(a, b).then_with(|| compare_secondary(a, b, sort_by)));
}

pub fn done_last(a: &Task, b: &Task) -> Ordering {
    a.is_done().cmp(&b.is_done())
}

/// Urgent first for `Priority`; earliest due first with undated last for `Date`.
pub fn compare_secondary(a: &Task, b: &Task, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::None => Ordering::Equal,
        SortBy::Priority => b.priority.cmp(&a.priority),
        SortBy::Date => match (a.due_date, b.due_date) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(left), Some(right)) => left.cmp(&right),
        },
    }
}
