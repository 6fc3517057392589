//! In-memory company repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::company::Company;
use crate::domain::foundation::{CompanyId, DomainError, ErrorCode, UserId};
use crate::ports::CompanyRepository;

use super::lock;

/// In-memory implementation of the CompanyRepository port.
#[derive(Default)]
pub struct InMemoryCompanyRepository {
    companies: Mutex<HashMap<CompanyId, Company>>,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `companies`.
    pub fn with_companies(companies: impl IntoIterator<Item = Company>) -> Self {
        Self {
            companies: Mutex::new(companies.into_iter().map(|c| (c.id, c)).collect()),
        }
    }

    fn find_where(&self, pred: impl Fn(&Company) -> bool) -> Result<Option<Company>, DomainError> {
        Ok(lock(&self.companies)?.values().find(|c| pred(c)).cloned())
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn save(&self, company: &Company) -> Result<(), DomainError> {
        let mut companies = lock(&self.companies)?;
        if companies.values().any(|c| c.user_id == company.user_id) {
            return Err(DomainError::validation(
                "user_id",
                "User already operates a company",
            ));
        }
        companies.insert(company.id, company.clone());
        Ok(())
    }

    async fn update_subscription(&self, company: &Company) -> Result<(), DomainError> {
        let mut companies = lock(&self.companies)?;
        let stored = companies.get_mut(&company.id).ok_or_else(|| {
            DomainError::new(ErrorCode::CompanyNotFound, "Company not found")
        })?;
        stored.subscription = company.subscription.clone();
        stored.updated_at = company.updated_at;
        Ok(())
    }

    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, DomainError> {
        Ok(lock(&self.companies)?.get(id).cloned())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Company>, DomainError> {
        self.find_where(|c| &c.user_id == user_id)
    }

    async fn find_by_subscription_id(
        &self,
        subscription_id: &str,
    ) -> Result<Option<Company>, DomainError> {
        self.find_where(|c| c.subscription.subscription_id.as_deref() == Some(subscription_id))
    }

    async fn find_by_customer_id(&self, customer_id: &str) -> Result<Option<Company>, DomainError> {
        self.find_where(|c| c.subscription.customer_id.as_deref() == Some(customer_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(user: &str) -> Company {
        Company::register(CompanyId::new(), UserId::new(user).unwrap(), "Acme Camps")
    }

    #[tokio::test]
    async fn save_rejects_second_company_for_user() {
        let repo = InMemoryCompanyRepository::new();
        repo.save(&company("owner-1")).await.unwrap();

        let err = repo.save(&company("owner-1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn finds_by_billing_ids() {
        let mut acme = company("owner-1");
        acme.link_checkout(Some("cus_9".to_string()), Some("sub_9".to_string()));
        let repo = InMemoryCompanyRepository::with_companies([acme.clone()]);

        assert_eq!(repo.find_by_customer_id("cus_9").await.unwrap(), Some(acme.clone()));
        assert_eq!(repo.find_by_subscription_id("sub_9").await.unwrap(), Some(acme));
        assert!(repo.find_by_subscription_id("sub_x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_subscription_of_unknown_company_fails() {
        let repo = InMemoryCompanyRepository::new();
        let err = repo.update_subscription(&company("owner-2")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CompanyNotFound);
    }
}
