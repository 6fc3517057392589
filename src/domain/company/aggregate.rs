//! Company aggregate entity.
//!
//! A Company is the seller side of the marketplace. Each company account is
//! linked one-to-one to a user with the `COMPANY` role and owns its listings.
//!
//! # Design Decisions
//!
//! - **Derived entitlement**: only the subscription snapshot is stored; the
//!   right to mutate listings is evaluated on each request
//! - **Billing-owned fields**: subscription fields change only through the
//!   billing webhook flow or an admin trial grant

use crate::domain::foundation::{CompanyId, Role, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use super::{entitlement, EntitlementDecision, SubscriptionState};

/// Company aggregate - a listing owner with a subscription.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `user_id` is unique (one company per user account)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,

    /// User account that operates this company.
    pub user_id: UserId,

    pub name: String,

    /// Billing snapshot mirrored from the payment processor.
    pub subscription: SubscriptionState,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Company {
    /// Registers a new company without a subscription.
    pub fn register(id: CompanyId, user_id: UserId, name: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            user_id,
            name: name.into(),
            subscription: SubscriptionState::none(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy with the given subscription snapshot.
    pub fn with_subscription(mut self, subscription: SubscriptionState) -> Self {
        self.subscription = subscription;
        self
    }

    /// Returns true if `user_id` operates this company.
    pub fn is_operated_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Evaluates whether `role` may mutate this company's listings at `now`.
    pub fn entitlement(&self, role: Role, now: Timestamp) -> EntitlementDecision {
        entitlement::evaluate(role, &self.subscription, now)
    }

    /// Grants an administrative trial of `days` days.
    pub fn grant_trial(&mut self, days: i64, now: Timestamp) {
        self.subscription.grant_trial(&self.id, now, days);
        self.updated_at = now;
    }

    /// Records a completed checkout session.
    pub fn link_checkout(&mut self, customer_id: Option<String>, subscription_id: Option<String>) {
        self.subscription.link_checkout(customer_id, subscription_id);
        self.touch();
    }

    /// Applies a subscription created/updated notification.
    pub fn apply_subscription_period(
        &mut self,
        subscription_id: &str,
        period_end: Timestamp,
        price_id: Option<String>,
    ) {
        self.subscription
            .apply_period(subscription_id, period_end, price_id);
        self.touch();
    }

    /// Extends the current period after a renewal payment.
    pub fn extend_period(&mut self, period_end: Timestamp) {
        self.subscription.extend_period(period_end);
        self.touch();
    }

    /// Drops the subscription after cancellation.
    pub fn cancel_subscription(&mut self) {
        self.subscription.clear();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
