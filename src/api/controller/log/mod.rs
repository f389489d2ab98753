//! Log controller: connects /log routes to the log query service

use axum::extract::{Query, State};
use axum::Json;
use serde_json::Value;
use tracing::{info_span, Instrument};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::log_dto::{EnableLoggingQuery, EventLogQuery, HistogramQuery, StackQuery};
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::log::model::WorkerType;
use crate::errors::AppError;

pub struct LogController;

impl LogController {
    /// `/log/histogram` has always meant the Windows worker.
    pub async fn get_histogram(
        state: State<AppState>,
        q: Query<HistogramQuery>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        Self::histogram(state, q, WorkerType::Windows).await
    }

    pub async fn get_windows_histogram(
        state: State<AppState>,
        q: Query<HistogramQuery>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        Self::histogram(state, q, WorkerType::Windows).await
    }

    pub async fn get_linux_histogram(
        state: State<AppState>,
        q: Query<HistogramQuery>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        Self::histogram(state, q, WorkerType::Linux).await
    }

    async fn histogram(
        State(state): State<AppState>,
        Query(q): Query<HistogramQuery>,
        worker_type: WorkerType,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        q.validate()?;
        let span = info_span!(
            "histogram",
            request_id = %Uuid::new_v4(),
            worker = worker_type.as_code(),
        );

        to_json(
            state
                .log_query_service
                .get_histogram(q.stack.clone(), worker_type, q.time_range())
                .instrument(span)
                .await,
        )
    }

    pub async fn get_event_logs(
        State(state): State<AppState>,
        Query(q): Query<EventLogQuery>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        q.validate()?;
        let span = info_span!("event_logs", request_id = %Uuid::new_v4());

        to_json(
            state
                .log_query_service
                .get_event_logs(q.stack.clone(), q.time_range())
                .instrument(span)
                .await,
        )
    }

    pub async fn enable_logging(
        State(state): State<AppState>,
        Query(q): Query<EnableLoggingQuery>,
    ) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
        q.validate()?;
        to_json(
            state
                .log_query_service
                .enable_logging(q.stack, q.enable)
                .await,
        )
    }

    pub async fn is_logging_enabled(
        State(state): State<AppState>,
        Query(q): Query<StackQuery>,
    ) -> Result<Json<ApiResponse<bool>>, AppError> {
        q.validate()?;
        to_json(state.log_query_service.is_logging_enabled(q.stack).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::log::service::tests::{fixture, Fixture};
    use http::StatusCode;

    fn state_and_fixture() -> (AppState, Fixture) {
        let fx = fixture();
        (AppState::new(fx.service.clone()), fx)
    }

    fn histogram_query(stack: &str, start: Option<&str>, grain: Option<&str>) -> HistogramQuery {
        HistogramQuery {
            stack: Some(stack.to_string()),
            start_time: start.map(str::to_string),
            end_time: None,
            time_grain: grain.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn linux_route_selects_linux_worker() {
        let (state, fx) = state_and_fixture();

        let Json(resp) = LogController::get_linux_histogram(
            State(state),
            Query(histogram_query("php", None, Some("10"))),
        )
        .await
        .expect("histogram should succeed");

        assert!(resp.is_successful);
        assert_eq!(resp.data.unwrap()["worker"], "linux");
        let calls = fx.parser.calls.lock().unwrap();
        assert_eq!(calls[0].1.worker_type, WorkerType::Linux);
    }

    #[tokio::test]
    async fn default_route_selects_windows_worker() {
        let (state, fx) = state_and_fixture();

        LogController::get_histogram(State(state), Query(histogram_query("php", None, None)))
            .await
            .expect("histogram should succeed");

        let calls = fx.parser.calls.lock().unwrap();
        assert_eq!(calls[0].1.worker_type, WorkerType::Windows);
    }

    #[tokio::test]
    async fn invalid_range_is_bad_request_with_reason() {
        let (state, _fx) = state_and_fixture();

        let err = LogController::get_windows_histogram(
            State(state),
            Query(histogram_query("php", Some("not-a-date"), Some("abc"))),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Cannot parse invalid date time. Valid Time format is yyyy-mm-ddThh:mm"
        );
    }

    #[tokio::test]
    async fn unknown_stack_is_not_found() {
        let (state, _fx) = state_and_fixture();

        let err = LogController::get_histogram(
            State(state),
            Query(histogram_query("cobol", None, None)),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn overlong_stack_fails_validation() {
        let (state, _fx) = state_and_fixture();

        let err = LogController::get_histogram(
            State(state),
            Query(histogram_query(&"x".repeat(200), None, None)),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn event_logs_pass_stack_through() {
        let (state, fx) = state_and_fixture();

        LogController::get_event_logs(
            State(state),
            Query(EventLogQuery {
                stack: Some("node".into()),
                ..Default::default()
            }),
        )
        .await
        .expect("event logs should succeed");

        let calls = fx.event_logs.calls.lock().unwrap();
        assert_eq!(calls[0].0.as_deref(), Some("node"));
    }

    #[tokio::test]
    async fn enable_logging_defaults_to_true() {
        let (state, fx) = state_and_fixture();
        let q: EnableLoggingQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(q.enable);

        LogController::enable_logging(State(state.clone()), Query(q))
            .await
            .expect("enable should succeed");
        assert!(*fx.enabler.enabled.lock().unwrap());

        let Json(resp) = LogController::is_logging_enabled(State(state), Query(StackQuery::default()))
            .await
            .unwrap();
        assert_eq!(resp.data, Some(true));
    }
}
