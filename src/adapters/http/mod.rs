//! HTTP adapters - axum routers, handlers and middleware.
//!
//! Each module owns its `*AppState`, DTOs and `*ApiError` mapping:
//!
//! - `activity` - Listing catalogue and lifecycle
//! - `company` - Entitlement and admin trial grants
//! - `engagement` - Favorites and click tracking
//! - `billing` - Payment processor webhooks
//! - `health` - Liveness
//!
//! [`build_router`] wires them together behind the shared layers.

pub mod activity;
pub mod billing;
pub mod company;
pub mod engagement;
pub mod error;
pub mod extract;
pub mod health;
pub mod middleware;
pub mod router;

pub use error::ErrorResponse;
pub use router::{build_router, Dependencies};
