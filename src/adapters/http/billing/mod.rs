//! HTTP adapter for payment processor webhooks.
//!
//! - `POST /api/webhooks/stripe` - Stripe subscription notifications
//!
//! No session is involved; the request is authenticated by its signature.
//! Status codes follow the processor's redelivery contract: 2xx acknowledges,
//! 4xx drops, 5xx asks for a retry.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::adapters::http::error::{internal_error, ErrorResponse};
use crate::application::handlers::company::{
    HandleBillingWebhookCommand, HandleBillingWebhookHandler, WebhookOutcome,
};
use crate::domain::billing::{StripeWebhookVerifier, WebhookError};
use crate::ports::CompanyRepository;

/// Header carrying the Stripe signature.
pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

/// Dependencies of the webhook endpoint.
#[derive(Clone)]
pub struct BillingAppState {
    pub verifier: Arc<StripeWebhookVerifier>,
    pub companies: Arc<dyn CompanyRepository>,
}

impl BillingAppState {
    pub fn webhook_handler(&self) -> HandleBillingWebhookHandler {
        HandleBillingWebhookHandler::new(self.verifier.clone(), self.companies.clone())
    }
}

/// Acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
    pub event_type: String,
    pub applied: bool,
}

impl From<WebhookOutcome> for WebhookAck {
    fn from(outcome: WebhookOutcome) -> Self {
        match outcome {
            WebhookOutcome::Applied { event_type, .. } => Self {
                received: true,
                event_type: event_type.as_str().to_string(),
                applied: true,
            },
            WebhookOutcome::Ignored { event_type } => Self {
                received: true,
                event_type: event_type.as_str().to_string(),
                applied: false,
            },
        }
    }
}

/// POST /api/webhooks/stripe - Handle Stripe webhook events
pub async fn handle_stripe_webhook(
    State(state): State<BillingAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookApiError::MissingSignature)?;

    let cmd = HandleBillingWebhookCommand {
        payload: body.to_vec(),
        signature: signature.to_string(),
    };

    let outcome = state.webhook_handler().handle(cmd).await?;

    Ok(Json(WebhookAck::from(outcome)))
}

/// Create the webhook router.
pub fn billing_routes() -> Router<BillingAppState> {
    Router::new().route("/api/webhooks/stripe", post(handle_stripe_webhook))
}

/// API error type for webhook failures.
#[derive(Debug)]
pub enum WebhookApiError {
    MissingSignature,
    Webhook(WebhookError),
}

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self::Webhook(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let err = match self {
            WebhookApiError::MissingSignature => {
                return ErrorResponse::new(
                    "INVALID_WEBHOOK_SIGNATURE",
                    "Missing Stripe-Signature header",
                )
                .into_response_with(StatusCode::BAD_REQUEST);
            }
            WebhookApiError::Webhook(err) => err,
        };

        if err.is_retryable() {
            return internal_error("billing_webhook", &err.to_string());
        }

        if err.is_authentication_failure() {
            warn!(error = %err, "Rejected webhook with bad signature");
            return ErrorResponse::new("INVALID_WEBHOOK_SIGNATURE", err.to_string())
                .into_response_with(StatusCode::UNAUTHORIZED);
        }

        warn!(error = %err, "Rejected malformed webhook");
        ErrorResponse::new("INVALID_WEBHOOK", err.to_string())
            .into_response_with(StatusCode::BAD_REQUEST)
    }
}
