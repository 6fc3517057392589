//! GrantTrialHandler - Command handler for administrative trials.

use std::sync::Arc;

use tracing::info;

use crate::domain::company::{Company, CompanyError};
use crate::domain::foundation::{AuthenticatedUser, CompanyId, Timestamp};
use crate::ports::CompanyRepository;

/// Shortest and longest trial an admin may grant, in days.
pub const MIN_TRIAL_DAYS: i64 = 1;
pub const MAX_TRIAL_DAYS: i64 = 365;

/// Command to grant a company a trial subscription.
#[derive(Debug, Clone)]
pub struct GrantTrialCommand {
    pub session: Option<AuthenticatedUser>,
    pub company_id: CompanyId,
    /// Trial length; the configured default when absent.
    pub days: Option<i64>,
}

/// Handler for granting trials. Admin only.
///
/// The trial replaces any current subscription id with a `trial_` token and
/// sets the period end to `now + days`.
pub struct GrantTrialHandler {
    companies: Arc<dyn CompanyRepository>,
    default_days: i64,
}

impl GrantTrialHandler {
    pub fn new(companies: Arc<dyn CompanyRepository>, default_days: i64) -> Self {
        Self {
            companies,
            default_days,
        }
    }

    pub async fn handle(&self, cmd: GrantTrialCommand) -> Result<Company, CompanyError> {
        // 1. Admin only
        let admin = cmd.session.ok_or(CompanyError::Unauthenticated)?;
        if !admin.is_admin() {
            return Err(CompanyError::Unauthorized);
        }

        // 2. Validate length
        let days = cmd.days.unwrap_or(self.default_days);
        if !(MIN_TRIAL_DAYS..=MAX_TRIAL_DAYS).contains(&days) {
            return Err(CompanyError::validation(
                "days",
                format!(
                    "must be between {} and {}, got {}",
                    MIN_TRIAL_DAYS, MAX_TRIAL_DAYS, days
                ),
            ));
        }

        // 3. Load company
        let mut company = self
            .companies
            .find_by_id(&cmd.company_id)
            .await?
            .ok_or_else(|| CompanyError::not_found(cmd.company_id))?;

        // 4. Grant and persist
        company.grant_trial(days, Timestamp::now());
        self.companies.update_subscription(&company).await?;

        info!(
            company_id = %company.id,
            granted_by = %admin.id,
            days,
            "Trial granted"
        );

        Ok(company)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCompanyRepository;
    use crate::application::handlers::activity::test_support::{company_for, user};
    use crate::domain::company::SubscriptionState;
    use crate::domain::foundation::Role;

    fn setup() -> (GrantTrialHandler, Arc<InMemoryCompanyRepository>, Company) {
        let company = company_for(&user("owner-1", Role::Company), SubscriptionState::none());
        let repo = Arc::new(InMemoryCompanyRepository::with_companies([company.clone()]));
        (GrantTrialHandler::new(repo.clone(), 14), repo, company)
    }

    #[tokio::test]
    async fn admin_grants_default_trial() {
        let (handler, repo, company) = setup();

        let updated = handler
            .handle(GrantTrialCommand {
                session: Some(user("admin-1", Role::Admin)),
                company_id: company.id,
                days: None,
            })
            .await
            .unwrap();

        assert!(updated.subscription.is_trial());
        assert!(updated.entitlement(Role::Company, Timestamp::now()).is_allowed());
        assert!(!updated
            .entitlement(Role::Company, Timestamp::now().add_days(15))
            .is_allowed());

        let stored = repo.find_by_id(&company.id).await.unwrap().unwrap();
        assert_eq!(stored.subscription, updated.subscription);
    }

    #[tokio::test]
    async fn company_cannot_grant_itself_a_trial() {
        let (handler, _, company) = setup();

        let result = handler
            .handle(GrantTrialCommand {
                session: Some(user("owner-1", Role::Company)),
                company_id: company.id,
                days: Some(30),
            })
            .await;

        assert_eq!(result.unwrap_err(), CompanyError::Unauthorized);
    }

    #[tokio::test]
    async fn out_of_range_days_are_rejected() {
        let (handler, _, company) = setup();

        for days in [0, -5, 366] {
            let result = handler
                .handle(GrantTrialCommand {
                    session: Some(user("admin-1", Role::Admin)),
                    company_id: company.id,
                    days: Some(days),
                })
                .await;
            assert!(matches!(result, Err(CompanyError::ValidationFailed { .. })));
        }
    }

    #[tokio::test]
    async fn unknown_company_is_not_found() {
        let (handler, _, _) = setup();
        let missing = CompanyId::new();

        let result = handler
            .handle(GrantTrialCommand {
                session: Some(user("admin-1", Role::Admin)),
                company_id: missing,
                days: Some(7),
            })
            .await;

        assert_eq!(result.unwrap_err(), CompanyError::NotFound(missing));
    }
}
