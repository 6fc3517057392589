//! HTTP DTOs for company and admin endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::company::CheckEntitlementResult;
use crate::domain::company::Company;
use crate::domain::foundation::{CompanyId, Timestamp};

/// Request to grant a trial. `days` falls back to the configured default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GrantTrialRequest {
    #[serde(default)]
    pub days: Option<i64>,
}

/// Current entitlement of the caller's company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitlementResponse {
    pub company_id: CompanyId,
    pub allowed: bool,
    /// Denial reason (`no-subscription`, `expired`) when not allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub subscription_id: Option<String>,
    pub current_period_end: Option<Timestamp>,
    pub price_id: Option<String>,
    pub is_trial: bool,
    pub evaluated_at: Timestamp,
}

impl From<CheckEntitlementResult> for EntitlementResponse {
    fn from(result: CheckEntitlementResult) -> Self {
        let is_trial = result.subscription.is_trial();
        Self {
            company_id: result.company_id,
            allowed: result.decision.is_allowed(),
            reason: result.decision.denial().map(|r| r.as_str().to_string()),
            subscription_id: result.subscription.subscription_id,
            current_period_end: result.subscription.current_period_end,
            price_id: result.subscription.price_id,
            is_trial,
            evaluated_at: result.evaluated_at,
        }
    }
}

/// Company with its subscription snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub id: CompanyId,
    pub name: String,
    pub subscription_id: Option<String>,
    pub current_period_end: Option<Timestamp>,
    pub price_id: Option<String>,
    pub updated_at: Timestamp,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            subscription_id: company.subscription.subscription_id,
            current_period_end: company.subscription.current_period_end,
            price_id: company.subscription.price_id,
            updated_at: company.updated_at,
        }
    }
}
