//! Billing domain module.
//!
//! Receives subscription notifications from the payment processor.
//!
//! # Module Structure
//!
//! - `event` - Stripe event envelope and the objects we read from it
//! - `verifier` - Webhook signature verification
//! - `errors` - Webhook errors with retry semantics

mod errors;
mod event;
mod verifier;

pub use errors::WebhookError;
pub use event::{
    CheckoutSessionObject, InvoiceObject, StripeEvent, StripeEventData, StripeEventType,
    SubscriptionObject,
};
pub use verifier::{
    SignatureHeader, StripeWebhookVerifier, MAX_CLOCK_SKEW_SECS, MAX_EVENT_AGE_SECS,
};
