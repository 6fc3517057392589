//! Company domain module.
//!
//! Companies own listings and hold the subscription that gates listing
//! mutations.
//!
//! # Module Structure
//!
//! - `aggregate` - Company aggregate entity
//! - `subscription` - Billing snapshot mirrored from the payment processor
//! - `entitlement` - Pure entitlement evaluator
//! - `errors` - Company-specific errors

mod aggregate;
pub mod entitlement;
mod errors;
mod subscription;

pub use aggregate::Company;
pub use entitlement::{evaluate, EntitlementDecision, EntitlementDenial};
pub use errors::CompanyError;
pub use subscription::{SubscriptionState, TRIAL_PREFIX};
