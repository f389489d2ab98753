use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use super::log_backend_client::{RemoteLogBackend, RemoteLogParser};
use crate::domain::log::model::WorkerType;
use crate::domain::log::parser::{LogParser, ParserFactory};

/// Selects a parser by stack and worker type. A stack is supported for a
/// worker type only when it is listed in that worker's stack set.
pub struct RemoteParserFactory {
    windows_stacks: HashSet<String>,
    linux_stacks: HashSet<String>,
    windows: Arc<dyn LogParser>,
    linux: Arc<dyn LogParser>,
}

impl RemoteParserFactory {
    pub fn new(
        backend: Arc<RemoteLogBackend>,
        windows_stacks: &[String],
        linux_stacks: &[String],
    ) -> Self {
        Self::with_parsers(
            Arc::new(RemoteLogParser::new(backend.clone(), WorkerType::Windows)),
            Arc::new(RemoteLogParser::new(backend, WorkerType::Linux)),
            windows_stacks,
            linux_stacks,
        )
    }

    pub fn with_parsers(
        windows: Arc<dyn LogParser>,
        linux: Arc<dyn LogParser>,
        windows_stacks: &[String],
        linux_stacks: &[String],
    ) -> Self {
        Self {
            windows_stacks: normalize(windows_stacks),
            linux_stacks: normalize(linux_stacks),
            windows,
            linux,
        }
    }
}

impl ParserFactory for RemoteParserFactory {
    fn parser_for(&self, stack: &str, worker_type: WorkerType) -> Option<Arc<dyn LogParser>> {
        let key = stack.trim().to_lowercase();
        let (stacks, parser) = match worker_type {
            WorkerType::Windows => (&self.windows_stacks, &self.windows),
            WorkerType::Linux => (&self.linux_stacks, &self.linux),
        };

        if stacks.contains(&key) {
            Some(parser.clone())
        } else {
            debug!(stack, worker = worker_type.as_code(), "No parser registered");
            None
        }
    }
}

fn normalize(stacks: &[String]) -> HashSet<String> {
    stacks
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn factory() -> RemoteParserFactory {
        let backend = Arc::new(
            RemoteLogBackend::new("http://127.0.0.1:5080", Duration::from_secs(1)).unwrap(),
        );
        RemoteParserFactory::new(
            backend,
            &["PHP".to_string(), " asp.net ".to_string(), "".to_string()],
            &["php".to_string(), "ruby".to_string()],
        )
    }

    #[test]
    fn selects_parser_per_worker_type() {
        let factory = factory();

        let windows = factory.parser_for("php", WorkerType::Windows).unwrap();
        let linux = factory.parser_for("php", WorkerType::Linux).unwrap();

        assert_eq!(windows.name(), "remote-windows");
        assert_eq!(linux.name(), "remote-linux");
    }

    #[test]
    fn stack_lookup_is_case_insensitive() {
        let factory = factory();
        assert!(factory.parser_for("ASP.NET", WorkerType::Windows).is_some());
        assert!(factory.parser_for("Ruby", WorkerType::Linux).is_some());
    }

    #[test]
    fn unsupported_stack_has_no_parser() {
        let factory = factory();
        assert!(factory.parser_for("ruby", WorkerType::Windows).is_none());
        assert!(factory.parser_for("asp.net", WorkerType::Linux).is_none());
        assert!(factory.parser_for("", WorkerType::Windows).is_none());
    }
}
