//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `jwt` - HS256 access tokens issued by the identity service
//! - `mock` - Test implementation that doesn't require an identity service

mod jwt;
mod mock;

pub use jwt::{AccessClaims, Audience, JwtConfig, JwtSessionValidator};
pub use mock::MockSessionValidator;
