//! Webhook error types for billing notifications.
//!
//! Retryability follows the processor's delivery contract: a 2xx response
//! acknowledges the event, 4xx drops it, 5xx schedules a redelivery.

use thiserror::Error;

/// Errors that occur while receiving a billing webhook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// Signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signed timestamp is older than the tolerance window.
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Signed timestamp is in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Failed to parse the payload or signature header.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Required field missing from the event object.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// The event references a company we do not know (yet).
    #[error("Company not found for event")]
    CompanyNotFound,

    /// Storage failed while applying the event.
    #[error("Database error: {0}")]
    Database(String),
}

impl WebhookError {
    /// Returns true if the processor should redeliver this event.
    ///
    /// An unknown company may only be unknown yet, as events can arrive
    /// before the checkout that links them.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::Database(_) | WebhookError::CompanyNotFound)
    }

    /// Returns true for failures of the authenticity check.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            WebhookError::InvalidSignature | WebhookError::TimestampOutOfRange
        )
    }
}

impl From<crate::domain::foundation::DomainError> for WebhookError {
    fn from(err: crate::domain::foundation::DomainError) -> Self {
        WebhookError::Database(err.to_string())
    }
}
