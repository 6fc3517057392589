//! Activity Hub - Extracurricular activity marketplace backend.
//!
//! Companies publish listings of activities for children; parents browse them
//! and keep favorites. A company may create or edit listings only while its
//! subscription is current, which the billing webhooks keep up to date.
//!
//! Layout follows a hexagonal design:
//!
//! - `domain` - Aggregates, entitlement evaluation, validation
//! - `ports` - Storage and identity traits
//! - `application` - Command and query handlers
//! - `adapters` - HTTP, PostgreSQL, JWT and in-memory implementations
//! - `config` - Environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
