//! Engagement-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Unauthenticated | 401 |
//! | Unauthorized | 403 |
//! | ActivityNotFound | 404 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{ActivityId, DomainError, ErrorCode};

/// Errors of favorites and click tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngagementError {
    /// No session accompanied the request.
    Unauthenticated,

    /// Only parents keep favorites.
    Unauthorized,

    /// The listing does not exist or is not published.
    ActivityNotFound(ActivityId),

    /// Infrastructure error.
    Infrastructure(String),
}

impl EngagementError {
    pub fn activity_not_found(id: ActivityId) -> Self {
        EngagementError::ActivityNotFound(id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        EngagementError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EngagementError::Unauthenticated => ErrorCode::Unauthenticated,
            EngagementError::Unauthorized => ErrorCode::Unauthorized,
            EngagementError::ActivityNotFound(_) => ErrorCode::ActivityNotFound,
            EngagementError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            EngagementError::Unauthenticated => "Authentication required".to_string(),
            EngagementError::Unauthorized => "Only parent accounts keep favorites".to_string(),
            EngagementError::ActivityNotFound(id) => format!("Activity not found: {}", id),
            EngagementError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for EngagementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for EngagementError {}

impl From<DomainError> for EngagementError {
    fn from(err: DomainError) -> Self {
        EngagementError::Infrastructure(err.to_string())
    }
}
