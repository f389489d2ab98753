pub mod log;
pub mod time_range;
