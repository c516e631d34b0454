//! Short date labels shown next to tasks.

use super::day::{days_between, is_today, is_tomorrow, start_of_day};
use super::Timestamp;
use chrono::NaiveDate;

/// "Today", "Tomorrow", or a month/day label such as "Mar 8".
pub fn task_date_label(date: Timestamp, now: Timestamp) -> String {
    if is_today(date, now) {
        return "Today".to_string();
    }
    if is_tomorrow(date, now) {
        return "Tomorrow".to_string();
    }
    date.format("%b %-d").to_string()
}

/// Today view label: "dd.MM" for today and later, "<n> d" for past dates.
pub fn today_view_date_label(date: Timestamp, now: Timestamp) -> String {
    if !is_today(date, now) && date < now {
        let days = days_between(start_of_day(date), start_of_day(now));
        return format!("{days} d");
    }
    date.format("%d.%m").to_string()
}

/// Heading of one Completed view group, e.g. "Mon 15.01.2024".
pub fn completed_group_label(day: NaiveDate) -> String {
    day.format("%a %d.%m.%Y").to_string()
}

/// Completion time shown in the Completed view, e.g. "23:59".
pub fn completed_time_label(done_at: Timestamp) -> String {
    done_at.format("%H:%M").to_string()
}
