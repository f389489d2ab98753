//! Seams to the log-parsing subsystem. Results are opaque JSON and are passed
//! back to the client untouched.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use super::model::{LogParserParameters, WorkerType};

#[async_trait]
pub trait LogParser: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    async fn get_histogram(&self, stack: &str, params: &LogParserParameters) -> Result<Value>;
}

#[async_trait]
pub trait EventLogReader: Send + Sync {
    async fn get_event_logs(
        &self,
        stack: Option<&str>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Value>;
}

#[async_trait]
pub trait LogEnabler: Send + Sync {
    async fn enable_logging(&self, stack: Option<&str>, enable: bool) -> Result<Vec<String>>;

    async fn is_enabled(&self, stack: Option<&str>) -> Result<bool>;
}

pub trait ParserFactory: Send + Sync {
    /// `None` when the stack has no parser for this worker type.
    fn parser_for(&self, stack: &str, worker_type: WorkerType) -> Option<Arc<dyn LogParser>>;
}
