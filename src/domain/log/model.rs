//! Log query parameter types shared with the parser implementations

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::domain::time_range::TimeWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerType {
    Windows,
    Linux,
}

impl WorkerType {
    pub fn as_code(&self) -> &'static str {
        match self {
            WorkerType::Windows => "windows",
            WorkerType::Linux => "linux",
        }
    }
}

/// Query forwarded to a [`LogParser`](super::parser::LogParser).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogParserParameters {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub time_grain: Duration,
    pub worker_type: WorkerType,
}

impl LogParserParameters {
    pub fn new(window: &TimeWindow, worker_type: WorkerType) -> Self {
        Self {
            start_time: window.start_utc,
            end_time: window.end_utc,
            time_grain: window.grain,
            worker_type,
        }
    }
}

#[derive(Debug, Error)]
pub enum LogQueryError {
    #[error("Stack is required")]
    MissingStack,

    #[error("Stack {0} has no log parser implementation")]
    ParserNotFound(String),
}
