//! Company subscription handlers.
//!
//! ## Commands
//! - Grant an administrative trial
//! - Apply billing webhooks
//!
//! ## Queries
//! - Current entitlement of the acting company

mod check_entitlement;
mod grant_trial;
mod handle_billing_webhook;

// Commands
pub use grant_trial::{GrantTrialCommand, GrantTrialHandler, MAX_TRIAL_DAYS, MIN_TRIAL_DAYS};
pub use handle_billing_webhook::{
    HandleBillingWebhookCommand, HandleBillingWebhookHandler, WebhookOutcome,
};

// Queries
pub use check_entitlement::{
    CheckEntitlementHandler, CheckEntitlementQuery, CheckEntitlementResult,
};
