//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, roles, and error types
//! that form the vocabulary of the marketplace domain.

mod auth;
mod errors;
mod ids;
mod role;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ActivityId, CompanyId, UserId};
pub use role::Role;
pub use timestamp::Timestamp;
