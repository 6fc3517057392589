//! Extractors shared by the HTTP modules.
//!
//! Both replace axum's plain-text rejections with an [`ErrorResponse`] body
//! carrying a 400 `VALIDATION_FAILED` code.

use std::str::FromStr;

use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::{request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;

use crate::domain::foundation::ErrorCode;

use super::error::ErrorResponse;

/// Single path parameter parsed into an identifier type.
#[derive(Debug, Clone, Copy)]
pub struct IdPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: FromStr + Send,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        raw.parse::<T>().map(IdPath).map_err(|_| {
            ErrorResponse::new(ErrorCode::ValidationFailed, format!("Invalid id: {}", raw))
                .with_details(serde_json::json!({ "field": "id" }))
                .into_response_with(StatusCode::BAD_REQUEST)
        })
    }
}

/// JSON request body.
///
/// Take it as `Result<JsonBody<T>, BodyRejection>` when another check (such
/// as the session gate) has to answer before a malformed body does.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

/// A request body that is missing, not JSON, or the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyRejection {
    message: String,
}

impl BodyRejection {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<JsonRejection> for BodyRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        ErrorResponse::new(ErrorCode::ValidationFailed, self.message)
            .with_details(serde_json::json!({ "field": "body" }))
            .into_response_with(StatusCode::BAD_REQUEST)
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}
