//! Activity repository port.
//!
//! Defines the contract for persisting and retrieving listings.
//!
//! # Ownership
//!
//! `find_owned` filters by both the listing id and the owning company, so a
//! listing of another company is indistinguishable from a missing one.
//! Handlers must use it (through `ActivityAccess`) for every company-scoped
//! mutation instead of loading by id and comparing afterwards.

use crate::domain::activity::{Activity, ActivityFilter};
use crate::domain::foundation::{ActivityId, CompanyId, DomainError};
use async_trait::async_trait;

/// Repository port for Activity aggregate persistence.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Find a listing by id regardless of owner.
    async fn find_by_id(&self, id: &ActivityId) -> Result<Option<Activity>, DomainError>;

    /// Find a listing only if `company_id` owns it.
    async fn find_owned(
        &self,
        company_id: &CompanyId,
        id: &ActivityId,
    ) -> Result<Option<Activity>, DomainError>;

    /// Insert a new listing.
    async fn create(&self, activity: &Activity) -> Result<(), DomainError>;

    /// Replace the content columns and status of an existing listing.
    ///
    /// # Errors
    ///
    /// - `ActivityNotFound` if the listing no longer exists
    async fn update(&self, activity: &Activity) -> Result<(), DomainError>;

    /// Set the publication flag.
    ///
    /// # Errors
    ///
    /// - `ActivityNotFound` if the listing no longer exists
    async fn set_published(&self, id: &ActivityId, published: bool) -> Result<(), DomainError>;

    /// Delete a listing. Deleting a missing listing is not an error.
    async fn delete(&self, id: &ActivityId) -> Result<(), DomainError>;

    /// Published listings matching `filter`, newest first.
    async fn list_published(&self, filter: &ActivityFilter) -> Result<Vec<Activity>, DomainError>;

    /// Published listings among `ids`, newest first.
    async fn list_published_by_ids(&self, ids: &[ActivityId]) -> Result<Vec<Activity>, DomainError>;

    /// All listings of a company, drafts included, newest first.
    async fn list_by_company(&self, company_id: &CompanyId) -> Result<Vec<Activity>, DomainError>;
}
