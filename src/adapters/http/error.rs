//! Shared error body for all HTTP adapters.
//!
//! Every error response has the shape `{ "code": "...", "message": "..." }`,
//! with optional `details` for machine-readable extras such as the field that
//! failed validation or the reason an entitlement was denied.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Pairs the body with a status code.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Logs an infrastructure failure and returns a generic 500.
///
/// The underlying message never reaches the client.
pub fn internal_error(context: &str, detail: &str) -> Response {
    tracing::error!(context, error = detail, "Request failed");
    ErrorResponse::new(ErrorCode::InternalError, "An internal error occurred")
        .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
}
