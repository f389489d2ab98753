//! Runtime configuration loaded from `LOGANALYZER_*` environment variables
//! (a `.env` file is honoured through dotenvy).

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use validator::Validate;

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5080";
const DEFAULT_WINDOWS_STACKS: &str = "asp.net,php,node,python,java";
const DEFAULT_LINUX_STACKS: &str = "php,node,python,java,ruby";
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    #[validate(length(min = 1))]
    pub server_addr: String,

    #[validate(url)]
    pub backend_url: String,

    pub windows_stacks: Vec<String>,
    pub linux_stacks: Vec<String>,

    #[validate(range(min = 1, max = 600))]
    pub backend_timeout_secs: u64,

    #[validate(length(min = 1))]
    pub log_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let backend_timeout_secs = match lookup("LOGANALYZER_BACKEND_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("LOGANALYZER_BACKEND_TIMEOUT_SECS is not a number: {raw}"))?,
            None => DEFAULT_BACKEND_TIMEOUT_SECS,
        };

        let config = Self {
            server_addr: get("LOGANALYZER_SERVER_ADDR", DEFAULT_SERVER_ADDR),
            backend_url: get("LOGANALYZER_BACKEND_URL", DEFAULT_BACKEND_URL),
            windows_stacks: split_list(&get("LOGANALYZER_WINDOWS_STACKS", DEFAULT_WINDOWS_STACKS)),
            linux_stacks: split_list(&get("LOGANALYZER_LINUX_STACKS", DEFAULT_LINUX_STACKS)),
            backend_timeout_secs,
            log_dir: get("LOGANALYZER_LOG_DIR", DEFAULT_LOG_DIR),
        };

        config.validate().context("invalid configuration")?;
        Ok(config)
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
