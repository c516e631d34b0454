//! Due date + time interval encoding.
//!
//! # Responsibility
//! - Combine a calendar date with an optional start/end time into one due
//!   timestamp plus an explicit `TimeInterval` annotation.
//! - Parse and print the `"HH:MM"` / `"HH:MM-HH:MM"` wire form.
//!
//! # Invariants
//! - A due timestamp at midnight with no interval means "no time was set".
//!   A literal midnight appointment without an end time is indistinguishable
//!   from an all-day due date.
//! - `end`, when present, is never earlier than `start`.
//! - Interval times carry minute precision only.

use super::Timestamp;
use crate::model::validation::ValidationError;
use chrono::{NaiveDate, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static TIME_INTERVAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2})(?:-(\d{2}):(\d{2}))?$").expect("valid time interval regex")
});

/// Start time with optional end time of a task's due slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeInterval {
    start: NaiveTime,
    end: Option<NaiveTime>,
}

impl TimeInterval {
    /// Builds an interval, truncating both ends to whole minutes.
    ///
    /// # Errors
    /// - `ReversedTimeInterval` when `end < start`.
    pub fn new(start: NaiveTime, end: Option<NaiveTime>) -> Result<Self, ValidationError> {
        let start = truncate_to_minute(start);
        let end = end.map(truncate_to_minute);
        if let Some(end) = end {
            if end < start {
                return Err(ValidationError::ReversedTimeInterval {
                    start: start.format("%H:%M").to_string(),
                    end: end.format("%H:%M").to_string(),
                });
            }
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> Option<NaiveTime> {
        self.end
    }
}

impl Display for TimeInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.start.format("%H:%M"))?;
        if let Some(end) = self.end {
            write!(f, "-{}", end.format("%H:%M"))?;
        }
        Ok(())
    }
}

impl FromStr for TimeInterval {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTimeInterval(value.to_string());
        let caps = TIME_INTERVAL_RE.captures(value.trim()).ok_or_else(invalid)?;

        let start = parse_hour_minute(&caps[1], &caps[2]).ok_or_else(invalid)?;
        let end = match (caps.get(3), caps.get(4)) {
            (Some(hour), Some(minute)) => {
                Some(parse_hour_minute(hour.as_str(), minute.as_str()).ok_or_else(invalid)?)
            }
            _ => None,
        };

        Self::new(start, end)
    }
}

impl TryFrom<String> for TimeInterval {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeInterval> for String {
    fn from(value: TimeInterval) -> Self {
        value.to_string()
    }
}

/// A due timestamp together with its optional time-of-day annotation.
///
/// Built only through [`encode_due_date_time`], [`DueDateTime::all_day`] or
/// [`DueDateTime::decode`], so the interval start always equals the time
/// carried by `due`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueDateTime {
    due: Timestamp,
    interval: Option<TimeInterval>,
}

impl DueDateTime {
    /// All-day due date (midnight, no interval).
    pub fn all_day(date: NaiveDate) -> Self {
        Self {
            due: date.and_time(NaiveTime::MIN),
            interval: None,
        }
    }

    /// Rebuilds a due value from its persisted parts.
    ///
    /// # Errors
    /// - `InvalidTimeInterval` / `ReversedTimeInterval` for bad interval text.
    /// - `IntervalStartMismatch` when the interval start is not the time of `due`.
    pub fn decode(due: Timestamp, interval: Option<&str>) -> Result<Self, ValidationError> {
        let interval = interval.map(decode_time_interval).transpose()?;
        Self::checked(due, interval)
    }

    /// Pairs already-parsed parts. A bare `00:00` annotation reads as all-day.
    pub(crate) fn checked(
        due: Timestamp,
        interval: Option<TimeInterval>,
    ) -> Result<Self, ValidationError> {
        let Some(interval) = interval else {
            return Ok(Self { due, interval: None });
        };
        if interval.start != due.time() {
            return Err(ValidationError::IntervalStartMismatch {
                due: due.format("%Y-%m-%dT%H:%M").to_string(),
                interval: interval.to_string(),
            });
        }
        Ok(Self::from_start(due, interval))
    }

    /// Parts read back from a stored task, which were checked on the way in.
    pub(crate) fn stored(due: Timestamp, interval: Option<TimeInterval>) -> Self {
        Self { due, interval }
    }

    fn from_start(due: Timestamp, interval: TimeInterval) -> Self {
        if interval.start == NaiveTime::MIN && interval.end.is_none() {
            return Self { due, interval: None };
        }
        Self {
            due,
            interval: Some(interval),
        }
    }

    pub fn due(&self) -> Timestamp {
        self.due
    }

    pub fn interval(&self) -> Option<TimeInterval> {
        self.interval
    }

    /// Whether the due value carries a specific time of day.
    pub fn has_specific_time(&self) -> bool {
        self.interval.is_some()
    }
}

/// Combines a calendar date with an optional start and end time.
///
/// # Contract
/// - No start: due at midnight, no interval (all-day).
/// - Start at midnight and no end: same as all-day.
/// - An end without a start is ignored.
///
/// # Errors
/// - `ReversedTimeInterval` when the end is earlier than the start.
pub fn encode_due_date_time(
    date: NaiveDate,
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
) -> Result<DueDateTime, ValidationError> {
    let Some(start) = start else {
        return Ok(DueDateTime::all_day(date));
    };

    let interval = TimeInterval::new(start, end)?;
    Ok(DueDateTime::from_start(date.and_time(interval.start), interval))
}

/// Parses `"HH:MM"` or `"HH:MM-HH:MM"`.
pub fn decode_time_interval(value: &str) -> Result<TimeInterval, ValidationError> {
    value.parse()
}

/// Half of the day for 12-hour clock input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Meridiem {
    Am,
    Pm,
}

/// 12-hour clock reading as entered through time pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay12h {
    /// 1..=12
    pub hour: u32,
    pub minute: u32,
    pub period: Meridiem,
}

impl TimeOfDay12h {
    /// Converts to a 24-hour time (`12 AM` is 00, `12 PM` is 12).
    pub fn to_naive_time(self) -> Result<NaiveTime, ValidationError> {
        if !(1..=12).contains(&self.hour) {
            return Err(self.invalid());
        }
        let hour = match (self.period, self.hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Am, hour) => hour,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, hour) => hour + 12,
        };
        NaiveTime::from_hms_opt(hour, self.minute, 0).ok_or_else(|| self.invalid())
    }

    pub fn from_naive_time(time: NaiveTime) -> Self {
        let period = if time.hour() >= 12 {
            Meridiem::Pm
        } else {
            Meridiem::Am
        };
        let hour = match time.hour() % 12 {
            0 => 12,
            hour => hour,
        };
        Self {
            hour,
            minute: time.minute(),
            period,
        }
    }

    fn invalid(self) -> ValidationError {
        ValidationError::InvalidClockTime {
            hour: self.hour,
            minute: self.minute,
        }
    }
}

fn parse_hour_minute(hour: &str, minute: &str) -> Option<NaiveTime> {
    let hour = hour.parse::<u32>().ok()?;
    let minute = minute.parse::<u32>().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_nanosecond(0)
        .and_then(|time| time.with_second(0))
        .unwrap_or(time)
}
