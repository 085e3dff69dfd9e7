//! Errors that cross the batch boundary and reach the HTTP response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Batch-level failure. Per-event failures never end up here.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The request body is not a JSON array of lifecycle events.
    #[error("Error decoding lifecycle events: {0}")]
    Decode(#[from] serde_json::Error),

    /// The pipeline cannot run because credentials were not configured.
    #[error("Missing credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match &self {
            ServiceError::Decode(e) => tracing::error!(error = %e, "Rejecting malformed batch"),
            ServiceError::MissingCredentials(vars) => {
                tracing::error!(missing = ?vars, "Lifecycle pipeline is not configured");
            }
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ServiceError>;
