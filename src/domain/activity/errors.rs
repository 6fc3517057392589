//! Activity-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Unauthenticated | 401 |
//! | Unauthorized | 403 |
//! | Forbidden | 403 |
//! | NotFound | 404 |
//! | CompanyNotFound | 404 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::company::EntitlementDenial;
use crate::domain::foundation::{ActivityId, DomainError, ErrorCode, ValidationError};

/// Errors of the listing lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityError {
    /// No session accompanied the request.
    Unauthenticated,

    /// The caller's role may not manage listings.
    Unauthorized,

    /// The company's subscription does not permit the mutation.
    Forbidden(EntitlementDenial),

    /// The listing does not exist or belongs to another company.
    NotFound(ActivityId),

    /// No company is linked to the caller.
    CompanyNotFound,

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl ActivityError {
    pub fn not_found(id: ActivityId) -> Self {
        ActivityError::NotFound(id)
    }

    pub fn forbidden(reason: EntitlementDenial) -> Self {
        ActivityError::Forbidden(reason)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ActivityError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ActivityError::Infrastructure(message.into())
    }

    /// Converts a repository error from a write against listing `id`.
    ///
    /// The row can vanish between ownership resolution and the write when a
    /// delete races it; that surfaces as `NotFound`, not as infrastructure.
    pub fn from_write(id: ActivityId, err: DomainError) -> Self {
        match err.code {
            ErrorCode::ActivityNotFound => ActivityError::NotFound(id),
            _ => ActivityError::from(err),
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ActivityError::Unauthenticated => ErrorCode::Unauthenticated,
            ActivityError::Unauthorized => ErrorCode::Unauthorized,
            ActivityError::Forbidden(_) => ErrorCode::Forbidden,
            ActivityError::NotFound(_) => ErrorCode::ActivityNotFound,
            ActivityError::CompanyNotFound => ErrorCode::CompanyNotFound,
            ActivityError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ActivityError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            ActivityError::Unauthenticated => "Authentication required".to_string(),
            ActivityError::Unauthorized => {
                "Only company accounts can manage listings".to_string()
            }
            ActivityError::Forbidden(reason) => reason.user_message().to_string(),
            ActivityError::NotFound(id) => format!("Activity not found: {}", id),
            ActivityError::CompanyNotFound => {
                "No company is linked to this account".to_string()
            }
            ActivityError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ActivityError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ActivityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ActivityError {}

impl From<ValidationError> for ActivityError {
    fn from(err: ValidationError) -> Self {
        ActivityError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ActivityError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => ActivityError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::CompanyNotFound => ActivityError::CompanyNotFound,
            _ => ActivityError::Infrastructure(err.to_string()),
        }
    }
}
