//! Billing snapshot of a company.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CompanyId, Timestamp};

/// Prefix of administratively granted trial subscription ids.
pub const TRIAL_PREFIX: &str = "trial_";

/// Subscription attributes mirrored from the payment processor.
///
/// Entitlement is never stored here; it is derived from `subscription_id` and
/// `current_period_end` by the entitlement evaluator on every request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionState {
    /// Processor subscription id (`sub_...`) or a trial token (`trial_...`).
    pub subscription_id: Option<String>,

    /// End of the paid (or trial) period.
    pub current_period_end: Option<Timestamp>,

    /// Processor price the subscription is billed at.
    pub price_id: Option<String>,

    /// Processor customer id.
    pub customer_id: Option<String>,
}

impl SubscriptionState {
    /// A company that never subscribed.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns the subscription id when it is present and non-blank.
    pub fn active_subscription_id(&self) -> Option<&str> {
        self.subscription_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Returns true if the subscription id is an administrative trial.
    pub fn is_trial(&self) -> bool {
        self.active_subscription_id()
            .map(|id| id.starts_with(TRIAL_PREFIX))
            .unwrap_or(false)
    }

    /// Records the outcome of a completed checkout.
    pub fn link_checkout(&mut self, customer_id: Option<String>, subscription_id: Option<String>) {
        if customer_id.is_some() {
            self.customer_id = customer_id;
        }
        if subscription_id.is_some() {
            self.subscription_id = subscription_id;
        }
    }

    /// Applies a subscription created/updated notification.
    pub fn apply_period(
        &mut self,
        subscription_id: &str,
        period_end: Timestamp,
        price_id: Option<String>,
    ) {
        self.subscription_id = Some(subscription_id.to_string());
        self.current_period_end = Some(period_end);
        if price_id.is_some() {
            self.price_id = price_id;
        }
    }

    /// Moves the period end forward after a successful renewal payment.
    ///
    /// A notification carrying an earlier period end than the stored one is
    /// ignored, so replays cannot shorten a subscription.
    pub fn extend_period(&mut self, period_end: Timestamp) {
        match self.current_period_end {
            Some(current) if current >= period_end => {}
            _ => self.current_period_end = Some(period_end),
        }
    }

    /// Grants an administrative trial of `days` days starting at `now`.
    pub fn grant_trial(&mut self, company_id: &CompanyId, now: Timestamp, days: i64) {
        self.subscription_id = Some(format!(
            "{}{}",
            TRIAL_PREFIX,
            company_id.as_uuid().simple()
        ));
        self.current_period_end = Some(now.add_days(days));
    }

    /// Drops the subscription after cancellation; the customer is kept.
    pub fn clear(&mut self) {
        self.subscription_id = None;
        self.current_period_end = None;
    }
}
