//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Session validation (HS256 JWT, test mock)
//! - `http` - axum routers, handlers and middleware
//! - `memory` - In-memory repositories for tests and local runs
//! - `postgres` - PostgreSQL repositories via sqlx

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
