//! Stripe webhook event types.
//!
//! Only the fields the subscription flow reads are captured; everything else
//! in the processor's payload is ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::{CompanyId, Timestamp};

use super::WebhookError;

/// Stripe webhook event envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Unique identifier for the event (`evt_...`).
    pub id: String,

    /// Type of event (e.g. `"checkout.session.completed"`).
    #[serde(rename = "type")]
    pub event_type: String,

    /// Creation time, Unix seconds.
    pub created: i64,

    pub data: StripeEventData,

    #[serde(default)]
    pub livemode: bool,

    #[serde(default)]
    pub api_version: Option<String>,
}

/// Container for the object the event is about.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

impl StripeEvent {
    /// Parse the event type into a known variant.
    pub fn parsed_type(&self) -> StripeEventType {
        StripeEventType::parse(&self.event_type)
    }

    /// Deserializes the data object as the specified type.
    pub fn object<T: serde::de::DeserializeOwned>(&self) -> Result<T, WebhookError> {
        serde_json::from_value(self.data.object.clone())
            .map_err(|e| WebhookError::ParseError(e.to_string()))
    }
}

/// Stripe event types the subscription flow reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripeEventType {
    CheckoutSessionCompleted,
    CustomerSubscriptionCreated,
    CustomerSubscriptionUpdated,
    CustomerSubscriptionDeleted,
    InvoicePaymentSucceeded,
    /// Anything else; acknowledged and ignored.
    Unknown,
}

impl StripeEventType {
    pub fn parse(s: &str) -> Self {
        match s {
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            "customer.subscription.created" => Self::CustomerSubscriptionCreated,
            "customer.subscription.updated" => Self::CustomerSubscriptionUpdated,
            "customer.subscription.deleted" => Self::CustomerSubscriptionDeleted,
            "invoice.payment_succeeded" => Self::InvoicePaymentSucceeded,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckoutSessionCompleted => "checkout.session.completed",
            Self::CustomerSubscriptionCreated => "customer.subscription.created",
            Self::CustomerSubscriptionUpdated => "customer.subscription.updated",
            Self::CustomerSubscriptionDeleted => "customer.subscription.deleted",
            Self::InvoicePaymentSucceeded => "invoice.payment_succeeded",
            Self::Unknown => "unknown",
        }
    }
}

/// `checkout.session` object.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionObject {
    pub id: String,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub subscription: Option<String>,
    #[serde(default)]
    pub client_reference_id: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSessionObject {
    /// Company the checkout was started for: `client_reference_id`, then
    /// `metadata.company_id`. Values that are not company ids are skipped.
    pub fn company_id(&self) -> Option<CompanyId> {
        self.client_reference_id
            .as_deref()
            .and_then(|r| r.parse().ok())
            .or_else(|| {
                self.metadata
                    .get("company_id")
                    .and_then(|r| r.parse().ok())
            })
    }
}

/// `subscription` object.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionObject {
    pub id: String,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub current_period_end: Option<i64>,
    #[serde(default)]
    pub items: Option<ListOf<SubscriptionItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionItem {
    #[serde(default)]
    pub price: Option<PriceRef>,
    #[serde(default)]
    pub current_period_end: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceRef {
    pub id: String,
}

/// Stripe list wrapper (`{"data": [...]}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ListOf<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl SubscriptionObject {
    /// Period end, from the subscription or (newer API versions) its items.
    pub fn period_end(&self) -> Option<Timestamp> {
        self.current_period_end
            .or_else(|| {
                self.items
                    .as_ref()
                    .and_then(|items| items.data.iter().filter_map(|i| i.current_period_end).max())
            })
            .and_then(Timestamp::from_unix_secs)
    }

    /// Price of the first subscription item.
    pub fn price_id(&self) -> Option<String> {
        self.items
            .as_ref()
            .and_then(|items| items.data.first())
            .and_then(|item| item.price.as_ref())
            .map(|price| price.id.clone())
    }
}

/// `invoice` object.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceObject {
    pub id: String,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub subscription: Option<String>,
    #[serde(default)]
    pub lines: Option<ListOf<InvoiceLine>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceLine {
    #[serde(default)]
    pub subscription: Option<String>,
    #[serde(default)]
    pub period: Option<LinePeriod>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinePeriod {
    pub end: i64,
}

impl InvoiceObject {
    /// Subscription the invoice pays for, from the invoice or its lines.
    pub fn subscription_id(&self) -> Option<String> {
        self.subscription.clone().or_else(|| {
            self.lines
                .as_ref()
                .and_then(|lines| lines.data.iter().find_map(|l| l.subscription.clone()))
        })
    }

    /// Latest period end across the invoice lines.
    pub fn period_end(&self) -> Option<Timestamp> {
        self.lines
            .as_ref()
            .and_then(|lines| {
                lines
                    .data
                    .iter()
                    .filter_map(|l| l.period.as_ref().map(|p| p.end))
                    .max()
            })
            .and_then(Timestamp::from_unix_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(event_type: &str, object: serde_json::Value) -> StripeEvent {
        serde_json::from_value(json!({
            "id": "evt_1",
            "type": event_type,
            "created": 1_704_067_200,
            "data": { "object": object },
            "livemode": false
        }))
        .unwrap()
    }

    #[test]
    fn parses_known_types_and_falls_back_to_unknown() {
        assert_eq!(
            StripeEventType::parse("customer.subscription.created"),
            StripeEventType::CustomerSubscriptionCreated
        );
        assert_eq!(StripeEventType::parse("charge.refunded"), StripeEventType::Unknown);
        assert_eq!(
            StripeEventType::InvoicePaymentSucceeded.as_str(),
            "invoice.payment_succeeded"
        );
    }

    #[test]
    fn checkout_prefers_client_reference_id() {
        let company_id = CompanyId::new();
        let other = CompanyId::new();
        let event = event(
            "checkout.session.completed",
            json!({
                "id": "cs_1",
                "customer": "cus_1",
                "subscription": "sub_1",
                "client_reference_id": company_id.to_string(),
                "metadata": { "company_id": other.to_string() }
            }),
        );

        let session: CheckoutSessionObject = event.object().unwrap();
        assert_eq!(session.company_id(), Some(company_id));
    }

    #[test]
    fn checkout_falls_back_to_metadata() {
        let company_id = CompanyId::new();
        let event = event(
            "checkout.session.completed",
            json!({
                "id": "cs_1",
                "client_reference_id": "not-a-uuid",
                "metadata": { "company_id": company_id.to_string() }
            }),
        );

        let session: CheckoutSessionObject = event.object().unwrap();
        assert_eq!(session.company_id(), Some(company_id));
    }

    #[test]
    fn subscription_reads_period_and_price() {
        let event = event(
            "customer.subscription.updated",
            json!({
                "id": "sub_1",
                "customer": "cus_1",
                "current_period_end": 1_706_745_600,
                "items": { "data": [ { "price": { "id": "price_monthly" } } ] }
            }),
        );

        let sub: SubscriptionObject = event.object().unwrap();
        assert_eq!(sub.period_end().map(|t| t.as_unix_secs()), Some(1_706_745_600));
        assert_eq!(sub.price_id().as_deref(), Some("price_monthly"));
    }

    #[test]
    fn subscription_period_falls_back_to_items() {
        let event = event(
            "customer.subscription.updated",
            json!({
                "id": "sub_1",
                "items": { "data": [
                    { "current_period_end": 1_706_745_600 },
                    { "current_period_end": 1_709_251_200 }
                ] }
            }),
        );

        let sub: SubscriptionObject = event.object().unwrap();
        assert_eq!(sub.period_end().map(|t| t.as_unix_secs()), Some(1_709_251_200));
    }

    #[test]
    fn invoice_reads_line_period_end() {
        let event = event(
            "invoice.payment_succeeded",
            json!({
                "id": "in_1",
                "lines": { "data": [
                    { "subscription": "sub_1", "period": { "start": 1, "end": 1_706_745_600 } }
                ] }
            }),
        );

        let invoice: InvoiceObject = event.object().unwrap();
        assert_eq!(invoice.subscription_id().as_deref(), Some("sub_1"));
        assert_eq!(
            invoice.period_end().map(|t| t.as_unix_secs()),
            Some(1_706_745_600)
        );
    }

    #[test]
    fn wrong_object_shape_is_parse_error() {
        let event = event("customer.subscription.updated", json!({ "customer": 5 }));
        let result: Result<SubscriptionObject, _> = event.object();
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }
}
