//! Company-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Unauthenticated | 401 |
//! | Unauthorized | 403 |
//! | NotFound | 404 |
//! | NotFoundForUser | 404 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{CompanyId, DomainError, ErrorCode, UserId};

/// Company-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyError {
    /// No session accompanied the request.
    Unauthenticated,

    /// The caller's role may not perform this operation.
    Unauthorized,

    /// Company was not found.
    NotFound(CompanyId),

    /// No company is linked to this user.
    NotFoundForUser(UserId),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl CompanyError {
    pub fn not_found(id: CompanyId) -> Self {
        CompanyError::NotFound(id)
    }

    pub fn not_found_for_user(user_id: UserId) -> Self {
        CompanyError::NotFoundForUser(user_id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CompanyError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CompanyError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CompanyError::Unauthenticated => ErrorCode::Unauthenticated,
            CompanyError::Unauthorized => ErrorCode::Unauthorized,
            CompanyError::NotFound(_) | CompanyError::NotFoundForUser(_) => {
                ErrorCode::CompanyNotFound
            }
            CompanyError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CompanyError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            CompanyError::Unauthenticated => "Authentication required".to_string(),
            CompanyError::Unauthorized => {
                "Your role does not permit this operation".to_string()
            }
            CompanyError::NotFound(id) => format!("Company not found: {}", id),
            CompanyError::NotFoundForUser(_) => {
                "No company is linked to this account".to_string()
            }
            CompanyError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CompanyError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CompanyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CompanyError {}

impl From<DomainError> for CompanyError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => CompanyError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => CompanyError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_share_code() {
        assert_eq!(
            CompanyError::not_found(CompanyId::new()).code(),
            ErrorCode::CompanyNotFound
        );
        assert_eq!(
            CompanyError::not_found_for_user(UserId::new("u1").unwrap()).code(),
            ErrorCode::CompanyNotFound
        );
    }

    #[test]
    fn not_found_for_user_does_not_leak_user_id() {
        let err = CompanyError::not_found_for_user(UserId::new("secret-user").unwrap());
        assert!(!err.message().contains("secret-user"));
    }

    #[test]
    fn database_error_converts_to_infrastructure() {
        let err: CompanyError = DomainError::database("connection reset").into();
        assert!(matches!(err, CompanyError::Infrastructure(_)));
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }

    #[test]
    fn validation_domain_error_keeps_field() {
        let err: CompanyError = DomainError::validation("days", "out of range").into();
        assert_eq!(err, CompanyError::validation("days", "out of range"));
    }

    #[test]
    fn display_matches_message() {
        let err = CompanyError::Unauthorized;
        assert_eq!(format!("{}", err), err.message());
    }
}
