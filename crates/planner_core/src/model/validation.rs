//! Validation and state errors raised by model construction.

use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty after trimming.
    BlankTitle,
    /// Time interval text is not `HH:MM` or `HH:MM-HH:MM`.
    InvalidTimeInterval(String),
    /// Interval end is earlier than its start.
    ReversedTimeInterval { start: String, end: String },
    /// 12-hour clock input is out of range.
    InvalidClockTime { hour: u32, minute: u32 },
    /// End date is earlier than start date.
    ReversedDateRange,
    /// Interval start differs from the time of day carried by the due timestamp.
    IntervalStartMismatch { due: String, interval: String },
    /// Two steps of one project share the same order value.
    DuplicateStepOrder(i64),
    /// Two steps of one project share the same id.
    DuplicateStepId(Uuid),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "title must not be blank"),
            Self::InvalidTimeInterval(value) => write!(
                f,
                "invalid time interval `{value}`; expected HH:MM or HH:MM-HH:MM"
            ),
            Self::ReversedTimeInterval { start, end } => {
                write!(f, "time interval end ({end}) must be >= start ({start})")
            }
            Self::InvalidClockTime { hour, minute } => {
                write!(f, "invalid 12-hour clock time {hour}:{minute:02}")
            }
            Self::ReversedDateRange => write!(f, "end date must not be earlier than start date"),
            Self::IntervalStartMismatch { due, interval } => write!(
                f,
                "time interval `{interval}` does not start at the due time {due}"
            ),
            Self::DuplicateStepOrder(order) => write!(f, "duplicate step order {order}"),
            Self::DuplicateStepId(id) => write!(f, "duplicate step id {id}"),
        }
    }
}

impl Error for ValidationError {}

/// Task state that the model refuses to represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidState {
    /// Both `completed` and `cancelled` were set.
    CompletedAndCancelled,
    /// An area was supplied for a task instead of being derived from its project.
    AreaIsDerived,
}

impl Display for InvalidState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CompletedAndCancelled => {
                write!(f, "task cannot be both completed and cancelled")
            }
            Self::AreaIsDerived => {
                write!(f, "task area is derived from its project and cannot be set")
            }
        }
    }
}

impl Error for InvalidState {}
