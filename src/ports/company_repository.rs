//! Company repository port.
//!
//! Companies are registered by the identity flow; this core reads them to
//! resolve the acting company and writes only their subscription snapshot.

use crate::domain::company::Company;
use crate::domain::foundation::{CompanyId, DomainError, UserId};
use async_trait::async_trait;

/// Repository port for Company aggregate persistence.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Save a new company.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the user already operates a company
    async fn save(&self, company: &Company) -> Result<(), DomainError>;

    /// Persist the subscription snapshot of an existing company.
    ///
    /// # Errors
    ///
    /// - `CompanyNotFound` if the company doesn't exist
    async fn update_subscription(&self, company: &Company) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, DomainError>;

    /// Find the company operated by a user. This is how the acting company
    /// of a request is resolved.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Company>, DomainError>;

    async fn find_by_subscription_id(
        &self,
        subscription_id: &str,
    ) -> Result<Option<Company>, DomainError>;

    async fn find_by_customer_id(&self, customer_id: &str) -> Result<Option<Company>, DomainError>;
}
