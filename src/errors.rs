use axum::{response::IntoResponse, Json};
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::core::client::log_backend_client::BackendError;
use crate::domain::log::model::LogQueryError;
use crate::domain::time_range::ValidationFailure;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    /// Message is already user-facing and is returned verbatim.
    #[error("{0}")]
    BadRequest(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("{0}")]
    NotFound(String),
}

/// Helper for mapping any unknown error into internal error
pub fn internal_error<E: ToString>(err: E) -> AppError {
    AppError::InternalServerError(err.to_string())
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(failure) = err.downcast_ref::<ValidationFailure>() {
            return AppError::BadRequest(failure.to_string());
        }
        if let Some(query_err) = err.downcast_ref::<LogQueryError>() {
            return match query_err {
                LogQueryError::MissingStack => AppError::BadRequest(query_err.to_string()),
                LogQueryError::ParserNotFound(_) => AppError::NotFound(query_err.to_string()),
            };
        }
        if let Some(backend_err) = err.downcast_ref::<BackendError>() {
            return AppError::UpstreamError(backend_err.to_string());
        }
        internal_error(err)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();

        // String provided by thiserror → safe JSON message
        let body = Json(json!({
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}
