use std::sync::Arc;

use anyhow::Result;

use crate::config::AppConfig;
use crate::core::client::log_backend_client::RemoteLogBackend;
use crate::core::client::parser_factory::RemoteParserFactory;
use crate::core::util::clock::SystemClock;
use crate::domain::log::service::LogQueryService;

#[derive(Clone)]
pub struct AppState {
    pub log_query_service: Arc<LogQueryService>,
}

impl AppState {
    pub fn new(log_query_service: Arc<LogQueryService>) -> Self {
        Self { log_query_service }
    }
}

/// Wires the remote log backend into the query service.
pub fn build_app_state(config: &AppConfig) -> Result<AppState> {
    let backend = Arc::new(RemoteLogBackend::new(
        &config.backend_url,
        config.backend_timeout(),
    )?);

    let parsers = RemoteParserFactory::new(
        backend.clone(),
        &config.windows_stacks,
        &config.linux_stacks,
    );

    let service = LogQueryService::new(
        Arc::new(parsers),
        backend.clone(),
        backend,
        Arc::new(SystemClock),
    );

    Ok(AppState::new(Arc::new(service)))
}
