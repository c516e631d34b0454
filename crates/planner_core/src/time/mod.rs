//! Time and date utilities for due dates, day buckets and time intervals.
//!
//! # Responsibility
//! - Classify timestamps relative to "now" (today/tomorrow/yesterday/overdue).
//! - Encode a calendar date plus optional start/end time into one due value.
//! - Render the short date labels used by list views.
//!
//! # Invariants
//! - All functions are pure; "now" is always passed in or read from a `Clock`.
//! - Timestamps are local wall-clock `NaiveDateTime` values.

pub mod clock;
pub mod day;
pub mod interval;
pub mod label;

/// Local wall-clock timestamp used for every date field in the planner.
pub type Timestamp = chrono::NaiveDateTime;

pub use clock::{Clock, ManualClock, SystemClock};
pub use day::{
    days_between, end_of_day, is_overdue, is_today, is_tomorrow, is_yesterday,
    relative_day_bucket, start_of_day, RelativeDayBucket,
};
pub use interval::{
    decode_time_interval, encode_due_date_time, DueDateTime, Meridiem, TimeInterval, TimeOfDay12h,
};
