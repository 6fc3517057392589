//! HandleBillingWebhookHandler - Command handler for Stripe subscription webhooks.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::billing::{
    CheckoutSessionObject, InvoiceObject, StripeEvent, StripeEventType, StripeWebhookVerifier,
    SubscriptionObject, WebhookError,
};
use crate::domain::company::Company;
use crate::domain::foundation::CompanyId;
use crate::ports::CompanyRepository;

/// Command to handle a billing webhook.
#[derive(Debug, Clone)]
pub struct HandleBillingWebhookCommand {
    /// Raw request body, exactly as signed.
    pub payload: Vec<u8>,
    /// `Stripe-Signature` header value.
    pub signature: String,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// The event changed a company's subscription.
    Applied {
        event_type: StripeEventType,
        company_id: CompanyId,
    },
    /// Event acknowledged but no action taken.
    Ignored { event_type: StripeEventType },
}

/// Handler for processing billing webhooks.
///
/// Keeps each company's subscription snapshot in step with the processor.
/// The entitlement evaluator reads only that snapshot, so this is the single
/// path by which paid access starts, renews and ends.
pub struct HandleBillingWebhookHandler {
    verifier: Arc<StripeWebhookVerifier>,
    companies: Arc<dyn CompanyRepository>,
}

impl HandleBillingWebhookHandler {
    pub fn new(verifier: Arc<StripeWebhookVerifier>, companies: Arc<dyn CompanyRepository>) -> Self {
        Self {
            verifier,
            companies,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleBillingWebhookCommand,
    ) -> Result<WebhookOutcome, WebhookError> {
        // 1. Verify webhook signature and parse event
        let event = self
            .verifier
            .verify_and_parse(&cmd.payload, &cmd.signature)
            .map_err(|e| {
                warn!(error = %e, "Rejected billing webhook");
                e
            })?;

        // 2. Process based on event type
        let event_type = event.parsed_type();
        let outcome = match event_type {
            StripeEventType::CheckoutSessionCompleted => self.checkout_completed(&event).await?,
            StripeEventType::CustomerSubscriptionCreated
            | StripeEventType::CustomerSubscriptionUpdated => {
                self.subscription_changed(&event).await?
            }
            StripeEventType::InvoicePaymentSucceeded => self.invoice_paid(&event).await?,
            StripeEventType::CustomerSubscriptionDeleted => {
                self.subscription_deleted(&event).await?
            }
            StripeEventType::Unknown => None,
        };

        // 3. Report
        Ok(match outcome {
            Some(company_id) => {
                info!(
                    event_id = %event.id,
                    event_type = event_type.as_str(),
                    company_id = %company_id,
                    "Billing webhook applied"
                );
                WebhookOutcome::Applied {
                    event_type,
                    company_id,
                }
            }
            None => WebhookOutcome::Ignored { event_type },
        })
    }

    async fn checkout_completed(&self, event: &StripeEvent) -> Result<Option<CompanyId>, WebhookError> {
        let session: CheckoutSessionObject = event.object()?;
        let company_id = session
            .company_id()
            .ok_or(WebhookError::MissingField("client_reference_id"))?;

        let mut company = self
            .companies
            .find_by_id(&company_id)
            .await?
            .ok_or(WebhookError::CompanyNotFound)?;

        company.link_checkout(session.customer, session.subscription);
        self.save(&company).await
    }

    async fn subscription_changed(
        &self,
        event: &StripeEvent,
    ) -> Result<Option<CompanyId>, WebhookError> {
        let subscription: SubscriptionObject = event.object()?;
        let period_end = subscription
            .period_end()
            .ok_or(WebhookError::MissingField("current_period_end"))?;

        let mut company = self
            .find_company(Some(&subscription.id), subscription.customer.as_deref())
            .await?
            .ok_or(WebhookError::CompanyNotFound)?;

        company.apply_subscription_period(&subscription.id, period_end, subscription.price_id());
        self.save(&company).await
    }

    async fn invoice_paid(&self, event: &StripeEvent) -> Result<Option<CompanyId>, WebhookError> {
        let invoice: InvoiceObject = event.object()?;
        let Some(subscription_id) = invoice.subscription_id() else {
            // One-off invoices carry no subscription.
            return Ok(None);
        };
        let period_end = invoice
            .period_end()
            .ok_or(WebhookError::MissingField("lines.period.end"))?;

        let mut company = self
            .companies
            .find_by_subscription_id(&subscription_id)
            .await?
            .ok_or(WebhookError::CompanyNotFound)?;

        company.extend_period(period_end);
        self.save(&company).await
    }

    async fn subscription_deleted(
        &self,
        event: &StripeEvent,
    ) -> Result<Option<CompanyId>, WebhookError> {
        let subscription: SubscriptionObject = event.object()?;

        let Some(mut company) = self
            .find_company(Some(&subscription.id), subscription.customer.as_deref())
            .await?
        else {
            warn!(
                subscription_id = %subscription.id,
                "Deleted subscription matches no company"
            );
            return Ok(None);
        };

        // A later subscription may already have replaced this one.
        if company
            .subscription
            .active_subscription_id()
            .is_some_and(|current| current != subscription.id)
        {
            return Ok(None);
        }

        company.cancel_subscription();
        self.save(&company).await
    }

    async fn find_company(
        &self,
        subscription_id: Option<&str>,
        customer_id: Option<&str>,
    ) -> Result<Option<Company>, WebhookError> {
        if let Some(id) = subscription_id {
            if let Some(company) = self.companies.find_by_subscription_id(id).await? {
                return Ok(Some(company));
            }
        }
        match customer_id {
            Some(id) => Ok(self.companies.find_by_customer_id(id).await?),
            None => Ok(None),
        }
    }

    async fn save(&self, company: &Company) -> Result<Option<CompanyId>, WebhookError> {
        self.companies.update_subscription(company).await?;
        Ok(Some(company.id))
    }
}
