//! Time range request / window / failure types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw, unvalidated time parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeRangeRequest {
    #[serde(rename = "startTime")]
    pub start_time: Option<String>,
    #[serde(rename = "endTime")]
    pub end_time: Option<String>,
    #[serde(rename = "timeGrain")]
    pub time_grain: Option<String>,
}

impl TimeRangeRequest {
    pub fn new(
        start_time: Option<&str>,
        end_time: Option<&str>,
        time_grain: Option<&str>,
    ) -> Self {
        Self {
            start_time: start_time.map(str::to_string),
            end_time: end_time.map(str::to_string),
            time_grain: time_grain.map(str::to_string),
        }
    }
}

/// Validated UTC window plus sampling grain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
    pub grain: Duration,

    /// Grain parse failure that was overridden by a successful window.
    pub grain_warning: Option<ValidationFailure>,
}

impl TimeWindow {
    pub fn span(&self) -> Duration {
        self.end_utc - self.start_utc
    }

    pub fn grain_minutes(&self) -> i64 {
        self.grain.num_minutes()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationFailureKind {
    InvalidTimeFormat,
    RangeInverted,
    StartInFuture,
    RangeTooLong,
    InvalidTimeGrain,
}

/// Rejection reasons, listed in the order they are checked.
///
/// The `Display` text is the complete user-facing message and is returned to
/// HTTP clients as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Cannot parse invalid date time. Valid Time format is yyyy-mm-ddThh:mm")]
    InvalidTimeFormat,

    #[error("Invalid Start Time and End Time. End Time cannot be earlier than Start Time.")]
    RangeInverted,

    #[error("Invalid Start Time. Start Time cannot be a future date.")]
    StartInFuture,

    #[error("Invalid Time Range. Time Range cannot be more than 24 hours.")]
    RangeTooLong,

    #[error("Invalid time grain: {0}")]
    InvalidTimeGrain(String),
}

impl ValidationFailure {
    pub fn kind(&self) -> ValidationFailureKind {
        match self {
            ValidationFailure::InvalidTimeFormat => ValidationFailureKind::InvalidTimeFormat,
            ValidationFailure::RangeInverted => ValidationFailureKind::RangeInverted,
            ValidationFailure::StartInFuture => ValidationFailureKind::StartInFuture,
            ValidationFailure::RangeTooLong => ValidationFailureKind::RangeTooLong,
            ValidationFailure::InvalidTimeGrain(_) => ValidationFailureKind::InvalidTimeGrain,
        }
    }
}
