//! Entitlement evaluation.
//!
//! Decides whether a caller may create or edit listings, from the caller's
//! role and the acting company's subscription snapshot. This is the only
//! place the rule lives; handlers consult [`evaluate`] and never re-derive it.
//!
//! Rules, first match wins:
//!
//! 1. `Admin` is always allowed.
//! 2. No subscription id (absent or blank) is denied with `NoSubscription`.
//! 3. No period end is denied with `NoSubscription`.
//! 4. A period end at or before `now` is denied with `Expired`.
//! 5. Otherwise allowed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Role, Timestamp};

use super::SubscriptionState;

/// Why a mutating request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntitlementDenial {
    /// The company never subscribed, or the subscription was cancelled.
    NoSubscription,
    /// The paid period has ended.
    Expired,
}

impl EntitlementDenial {
    /// Machine-readable reason, as sent to clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntitlementDenial::NoSubscription => "no-subscription",
            EntitlementDenial::Expired => "expired",
        }
    }

    /// Returns a user-friendly message for this reason.
    pub fn user_message(&self) -> &'static str {
        match self {
            EntitlementDenial::NoSubscription => {
                "An active subscription is required to manage listings"
            }
            EntitlementDenial::Expired => {
                "Your subscription has expired. Renew it to manage listings"
            }
        }
    }
}

impl fmt::Display for EntitlementDenial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an entitlement check. Computed fresh on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum EntitlementDecision {
    Allowed,
    Denied(EntitlementDenial),
}

impl EntitlementDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, EntitlementDecision::Allowed)
    }

    /// Returns the denial reason, if any.
    pub fn denial(&self) -> Option<EntitlementDenial> {
        match self {
            EntitlementDecision::Allowed => None,
            EntitlementDecision::Denied(reason) => Some(*reason),
        }
    }

    /// Converts to a `Result`, for use with `?` in handlers.
    pub fn into_result(self) -> Result<(), EntitlementDenial> {
        match self {
            EntitlementDecision::Allowed => Ok(()),
            EntitlementDecision::Denied(reason) => Err(reason),
        }
    }
}

/// Evaluates whether `role` acting on `subscription` may mutate listings at `now`.
pub fn evaluate(role: Role, subscription: &SubscriptionState, now: Timestamp) -> EntitlementDecision {
    if role.is_admin() {
        return EntitlementDecision::Allowed;
    }

    if subscription.active_subscription_id().is_none() {
        return EntitlementDecision::Denied(EntitlementDenial::NoSubscription);
    }

    let Some(period_end) = subscription.current_period_end else {
        return EntitlementDecision::Denied(EntitlementDenial::NoSubscription);
    };

    if period_end <= now {
        return EntitlementDecision::Denied(EntitlementDenial::Expired);
    }

    EntitlementDecision::Allowed
}
