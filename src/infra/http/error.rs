use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::application::content::ContentError;
use crate::infra::http::models::ApiEnvelope;

/// Error response carrying the `{success: false, message}` envelope the
/// API has always spoken.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiEnvelope::<()>::failure(self.message);
        (self.status, Json(body)).into_response()
    }
}

/// Map a service error onto the wire. Store and cache failures are
/// logged here with their full chain and surfaced as an opaque message.
pub fn content_error_to_api(err: ContentError, internal_message: &'static str) -> ApiError {
    match err {
        ContentError::NotFound { .. } => ApiError::not_found("Content not found"),
        ContentError::SlugTaken { .. } => ApiError::conflict("Content already exists"),
        ContentError::Store(_) | ContentError::Cache(_) => {
            error!(error = %err, "content operation failed");
            ApiError::internal(internal_message)
        }
    }
}
