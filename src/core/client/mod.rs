// Remote log-parsing service client
pub mod log_backend_client;
pub mod parser_factory;
