//! Time window resolution for log queries

pub mod datetime_parser;
pub mod model;
pub mod resolver;

pub use model::{TimeRangeRequest, TimeWindow, ValidationFailure, ValidationFailureKind};
pub use resolver::resolve;
