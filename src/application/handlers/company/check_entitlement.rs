//! CheckEntitlementHandler - Query handler for the company dashboard.

use std::sync::Arc;

use crate::domain::company::{CompanyError, EntitlementDecision, SubscriptionState};
use crate::domain::foundation::{AuthenticatedUser, CompanyId, Role, Timestamp};
use crate::ports::CompanyRepository;

/// Query for the acting company's current entitlement.
#[derive(Debug, Clone)]
pub struct CheckEntitlementQuery {
    pub session: Option<AuthenticatedUser>,
}

/// Current entitlement and the snapshot it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckEntitlementResult {
    pub company_id: CompanyId,
    pub decision: EntitlementDecision,
    pub subscription: SubscriptionState,
    pub evaluated_at: Timestamp,
}

pub struct CheckEntitlementHandler {
    companies: Arc<dyn CompanyRepository>,
}

impl CheckEntitlementHandler {
    pub fn new(companies: Arc<dyn CompanyRepository>) -> Self {
        Self { companies }
    }

    pub async fn handle(
        &self,
        query: CheckEntitlementQuery,
    ) -> Result<CheckEntitlementResult, CompanyError> {
        let user = query.session.ok_or(CompanyError::Unauthenticated)?;
        if user.role == Role::Parent {
            return Err(CompanyError::Unauthorized);
        }

        let company = self
            .companies
            .find_by_user_id(&user.id)
            .await?
            .ok_or_else(|| CompanyError::not_found_for_user(user.id.clone()))?;

        let now = Timestamp::now();
        Ok(CheckEntitlementResult {
            company_id: company.id,
            decision: company.entitlement(user.role, now),
            subscription: company.subscription,
            evaluated_at: now,
        })
    }
}
