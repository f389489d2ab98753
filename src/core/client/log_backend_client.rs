use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::domain::log::model::{LogParserParameters, WorkerType};
use crate::domain::log::parser::{EventLogReader, LogEnabler, LogParser};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("log backend returned {status} for {path}")]
    Status {
        status: reqwest::StatusCode,
        path: String,
    },

    #[error("log backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// HTTP client for the remote log-parsing service.
pub struct RemoteLogBackend {
    client: Client,
    base_url: String,
}

impl RemoteLogBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn histogram_path(worker_type: WorkerType, stack: &str) -> String {
        format!(
            "/histogram/{}/{}",
            worker_type.as_code(),
            urlencoding::encode(stack)
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, BackendError> {
        debug!(%method, path, "Calling log backend");

        let resp = self
            .client
            .request(method, self.url(path))
            .query(query)
            .send()
            .await
            .inspect_err(|e| error!(?e, path, "Log backend unreachable"))?;

        let status = resp.status();
        if !status.is_success() {
            error!(%status, path, "Log backend returned an error status");
            return Err(BackendError::Status {
                status,
                path: path.to_string(),
            });
        }

        Ok(resp.json::<T>().await?)
    }
}

pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn stack_param(stack: Option<&str>) -> Vec<(&'static str, String)> {
    stack
        .map(|s| vec![("stack", s.to_string())])
        .unwrap_or_default()
}

#[async_trait]
impl EventLogReader for RemoteLogBackend {
    async fn get_event_logs(
        &self,
        stack: Option<&str>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Value> {
        let mut query = stack_param(stack);
        query.push(("startTime", format_instant(start)));
        query.push(("endTime", format_instant(end)));

        Ok(self.send_json(Method::GET, "/eventlogs", &query).await?)
    }
}

#[async_trait]
impl LogEnabler for RemoteLogBackend {
    async fn enable_logging(&self, stack: Option<&str>, enable: bool) -> Result<Vec<String>> {
        let mut query = stack_param(stack);
        query.push(("enable", enable.to_string()));

        Ok(self.send_json(Method::PUT, "/logging", &query).await?)
    }

    async fn is_enabled(&self, stack: Option<&str>) -> Result<bool> {
        let query = stack_param(stack);
        Ok(self.send_json(Method::GET, "/logging", &query).await?)
    }
}

/// Histogram parser for one worker type, backed by [`RemoteLogBackend`].
pub struct RemoteLogParser {
    backend: Arc<RemoteLogBackend>,
    name: String,
}

impl RemoteLogParser {
    pub fn new(backend: Arc<RemoteLogBackend>, worker_type: WorkerType) -> Self {
        Self {
            backend,
            name: format!("remote-{}", worker_type.as_code()),
        }
    }
}

#[async_trait]
impl LogParser for RemoteLogParser {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_histogram(&self, stack: &str, params: &LogParserParameters) -> Result<Value> {
        let path = RemoteLogBackend::histogram_path(params.worker_type, stack);
        let query = [
            ("startTime", format_instant(params.start_time)),
            ("endTime", format_instant(params.end_time)),
            ("timeGrain", params.time_grain.num_minutes().to_string()),
        ];

        Ok(self.backend.send_json(Method::GET, &path, &query).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn histogram_path_encodes_stack() {
        assert_eq!(
            RemoteLogBackend::histogram_path(WorkerType::Linux, "php"),
            "/histogram/linux/php"
        );
        assert_eq!(
            RemoteLogBackend::histogram_path(WorkerType::Windows, "asp.net core/v2"),
            "/histogram/windows/asp.net%20core%2Fv2"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let backend = RemoteLogBackend::with_client(Client::new(), "http://parser:5080/");
        assert_eq!(backend.url("/eventlogs"), "http://parser:5080/eventlogs");
    }

    #[test]
    fn instants_are_sent_as_utc_rfc3339() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_instant(instant), "2024-01-02T03:04:05.000Z");
    }

    #[test]
    fn stack_param_is_optional() {
        assert!(stack_param(None).is_empty());
        assert_eq!(stack_param(Some("php")), vec![("stack", "php".to_string())]);
    }

    #[test]
    fn status_error_names_status_and_path() {
        let err = BackendError::Status {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            path: "/eventlogs".into(),
        };

        assert_eq!(
            err.to_string(),
            "log backend returned 503 Service Unavailable for /eventlogs"
        );
    }
}
