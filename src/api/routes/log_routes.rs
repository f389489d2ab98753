//! Log routes (e.g., /log/*)

use axum::{routing::{get, put}, Router};
use crate::api::controller::log::LogController;
use crate::app_state::AppState;

pub fn log_routes() -> Router<AppState> {
    Router::new()
        .route("/histogram", get(LogController::get_histogram))
        .route("/windows/histogram", get(LogController::get_windows_histogram))
        .route("/linux/histogram", get(LogController::get_linux_histogram))

        .route("/eventlogs", get(LogController::get_event_logs))

        .route("/enablelogging", put(LogController::enable_logging))
        .route("/loggingenabled", get(LogController::is_logging_enabled))
}
