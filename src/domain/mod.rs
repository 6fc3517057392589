//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, roles, session context, errors)
//! - `company` - Companies, subscription snapshots and the entitlement evaluator
//! - `activity` - Listings, content normalization and publication lifecycle
//! - `billing` - Payment processor webhook events and signature verification
//! - `engagement` - Favorites and click analytics

pub mod activity;
pub mod billing;
pub mod company;
pub mod engagement;
pub mod foundation;
