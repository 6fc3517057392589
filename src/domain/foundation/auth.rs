//! Authentication types for the domain layer.
//!
//! These types represent the session context of a request: who is calling and
//! with which role. They have **no external dependencies** - any identity
//! provider can populate them via the `SessionValidator` port.
//!
//! # Example
//!
//! ```ignore
//! // In HTTP middleware, after JWT validation:
//! let user = AuthenticatedUser::new(
//!     UserId::new("user-123")?,
//!     "owner@chessclub.example",
//!     Some("Chess Club".to_string()),
//!     Role::Company,
//! );
//!
//! request.extensions_mut().insert(user);
//! ```

use super::{Role, UserId};
use thiserror::Error;

/// Authenticated user extracted from a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the identity provider.
    pub id: UserId,

    /// User's email address from the token claims.
    pub email: String,

    /// Display name if available.
    pub display_name: Option<String>,

    /// Marketplace role carried by the session.
    pub role: Role,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        display_name: Option<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
            role,
        }
    }

    /// Returns the user's display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }

    /// Returns true if this session belongs to an administrator.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The token carries no usable role claim.
    #[error("Invalid role claim: {0}")]
    InvalidRole(String),

    /// The authentication service is unavailable.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::InvalidRole(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user_id() -> UserId {
        UserId::new("user-123").unwrap()
    }

    #[test]
    fn authenticated_user_new_creates_user() {
        let user = AuthenticatedUser::new(
            test_user_id(),
            "test@example.com",
            Some("Test User".to_string()),
            Role::Company,
        );

        assert_eq!(user.id.as_str(), "user-123");
        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.role, Role::Company);
        assert!(!user.is_admin());
    }

    #[test]
    fn display_name_or_email_falls_back_to_email() {
        let user = AuthenticatedUser::new(test_user_id(), "bob@example.com", None, Role::Parent);
        assert_eq!(user.display_name_or_email(), "bob@example.com");
    }

    #[test]
    fn auth_error_service_unavailable_displays_message() {
        let err = AuthError::service_unavailable("Connection refused");
        assert_eq!(format!("{}", err), "Auth service unavailable: Connection refused");
    }

    #[test]
    fn auth_error_requires_reauthentication_for_token_errors() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(AuthError::InvalidRole("x".into()).requires_reauthentication());
        assert!(!AuthError::service_unavailable("").requires_reauthentication());
    }
}
