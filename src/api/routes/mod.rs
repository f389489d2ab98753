//! API route declarations (e.g., /log/*)

pub mod log_routes;
