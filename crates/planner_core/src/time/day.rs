//! Day-level classification of timestamps.
//!
//! # Invariants
//! - `end_of_day` is the last millisecond of the calendar day.
//! - `relative_day_bucket` checks yesterday/today/tomorrow before the
//!   numeric bands; any other past date folds into `Yesterday`.
//! - Done tasks are never overdue.

use super::Timestamp;
use crate::model::task::Task;
use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

/// Relative grouping used by the Upcoming view.
///
/// Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelativeDayBucket {
    Yesterday,
    Today,
    Tomorrow,
    Next7Days,
    Next30Days,
    Later,
}

impl RelativeDayBucket {
    /// Fixed display order of Upcoming groups.
    pub const ALL: [RelativeDayBucket; 6] = [
        Self::Yesterday,
        Self::Today,
        Self::Tomorrow,
        Self::Next7Days,
        Self::Next30Days,
        Self::Later,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Yesterday => "Yesterday",
            Self::Today => "Today",
            Self::Tomorrow => "Tomorrow",
            Self::Next7Days => "Next 7 Days",
            Self::Next30Days => "Next 30 Days",
            Self::Later => "Later",
        }
    }
}

pub fn start_of_day(ts: Timestamp) -> Timestamp {
    ts.date().and_time(NaiveTime::MIN)
}

pub fn end_of_day(ts: Timestamp) -> Timestamp {
    start_of_day(ts) + Duration::days(1) - Duration::milliseconds(1)
}

pub fn is_today(date: Timestamp, now: Timestamp) -> bool {
    date.date() == now.date()
}

pub fn is_tomorrow(date: Timestamp, now: Timestamp) -> bool {
    now.date().succ_opt() == Some(date.date())
}

pub fn is_yesterday(date: Timestamp, now: Timestamp) -> bool {
    now.date().pred_opt() == Some(date.date())
}

/// Whole days from `from` to `to`, truncated toward zero.
pub fn days_between(from: Timestamp, to: Timestamp) -> i64 {
    (to - from).num_days()
}

/// Classifies `date` into the Upcoming view bucket relative to `now`.
pub fn relative_day_bucket(date: Timestamp, now: Timestamp) -> RelativeDayBucket {
    if is_yesterday(date, now) {
        return RelativeDayBucket::Yesterday;
    }
    if is_today(date, now) {
        return RelativeDayBucket::Today;
    }
    if is_tomorrow(date, now) {
        return RelativeDayBucket::Tomorrow;
    }

    match days_between(now, date) {
        1..=7 => RelativeDayBucket::Next7Days,
        8..=30 => RelativeDayBucket::Next30Days,
        days if days > 30 => RelativeDayBucket::Later,
        _ => RelativeDayBucket::Yesterday,
    }
}

/// Returns whether an open task's due date lies before the start of today.
pub fn is_overdue(task: &Task, now: Timestamp) -> bool {
    match task.due_date {
        Some(due) => !task.is_done() && due < start_of_day(now),
        None => false,
    }
}
