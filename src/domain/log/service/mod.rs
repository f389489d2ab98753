use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::util::clock::Clock;
use crate::domain::log::model::{LogParserParameters, LogQueryError, WorkerType};
use crate::domain::log::parser::{EventLogReader, LogEnabler, ParserFactory};
use crate::domain::time_range::{resolve, TimeRangeRequest, TimeWindow, ValidationFailure};

pub struct LogQueryService {
    parsers: Arc<dyn ParserFactory>,
    event_logs: Arc<dyn EventLogReader>,
    enabler: Arc<dyn LogEnabler>,
    clock: Arc<dyn Clock>,
}

impl LogQueryService {
    pub fn new(
        parsers: Arc<dyn ParserFactory>,
        event_logs: Arc<dyn EventLogReader>,
        enabler: Arc<dyn LogEnabler>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            parsers,
            event_logs,
            enabler,
            clock,
        }
    }

    pub async fn get_histogram(
        &self,
        stack: Option<String>,
        worker_type: WorkerType,
        range: TimeRangeRequest,
    ) -> Result<Value> {
        let stack = stack
            .filter(|s| !s.trim().is_empty())
            .ok_or(LogQueryError::MissingStack)?;

        let window = self.resolve_window(&range)?;
        let params = LogParserParameters::new(&window, worker_type);

        let parser = self
            .parsers
            .parser_for(&stack, worker_type)
            .ok_or_else(|| LogQueryError::ParserNotFound(stack.clone()))?;

        debug!(
            parser = parser.name(),
            %stack,
            worker = worker_type.as_code(),
            start = %params.start_time,
            end = %params.end_time,
            grain_minutes = params.time_grain.num_minutes(),
            "Dispatching histogram query"
        );

        parser.get_histogram(&stack, &params).await
    }

    /// Event logs are not bucketed, any `timeGrain` on the request is ignored.
    pub async fn get_event_logs(
        &self,
        stack: Option<String>,
        range: TimeRangeRequest,
    ) -> Result<Value> {
        let range = TimeRangeRequest {
            time_grain: None,
            ..range
        };
        let window = self.resolve_window(&range)?;

        self.event_logs
            .get_event_logs(stack.as_deref(), window.start_utc, window.end_utc)
            .await
    }

    pub async fn enable_logging(&self, stack: Option<String>, enable: bool) -> Result<Vec<String>> {
        debug!(stack = ?stack, enable, "Toggling logging");
        self.enabler.enable_logging(stack.as_deref(), enable).await
    }

    pub async fn is_logging_enabled(&self, stack: Option<String>) -> Result<bool> {
        self.enabler.is_enabled(stack.as_deref()).await
    }

    fn resolve_window(&self, range: &TimeRangeRequest) -> Result<TimeWindow, ValidationFailure> {
        match resolve(range, self.clock.now()) {
            Ok(window) => {
                if let Some(warning) = &window.grain_warning {
                    warn!(%warning, "Falling back to default time grain");
                }
                Ok(window)
            }
            Err(failure) => {
                debug!(kind = ?failure.kind(), reason = %failure, "Rejected time range");
                Err(failure)
            }
        }
    }
}
