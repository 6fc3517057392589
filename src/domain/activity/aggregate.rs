//! Activity aggregate entity.
//!
//! An Activity is a listing published by a company: an extracurricular
//! offering with an age range, a price and a location.

use crate::domain::foundation::{ActivityId, CompanyId, Timestamp};
use serde::{Deserialize, Serialize};

use super::{ActivityFields, PublicationStatus};

/// Activity aggregate - a company's listing.
///
/// # Invariants
///
/// - `company_id` never changes after creation
/// - `details` always satisfies the `ActivityFields` invariants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,

    /// Owning company.
    pub company_id: CompanyId,

    /// Listing content.
    pub details: ActivityFields,

    pub status: PublicationStatus,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Activity {
    /// Creates a listing owned by `company_id`.
    pub fn create(
        id: ActivityId,
        company_id: CompanyId,
        details: ActivityFields,
        published: bool,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            company_id,
            details,
            status: PublicationStatus::from_published(published),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitutes a listing from storage.
    pub fn reconstitute(
        id: ActivityId,
        company_id: CompanyId,
        details: ActivityFields,
        status: PublicationStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            company_id,
            details,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status.is_published()
    }

    /// Replaces the whole content of the listing.
    pub fn replace_details(&mut self, details: ActivityFields) {
        self.details = details;
        self.updated_at = Timestamp::now();
    }

    /// Publishes or unpublishes the listing.
    ///
    /// Either direction is allowed; re-applying the current status leaves
    /// `updated_at` alone. Returns `true` if the status actually changed.
    pub fn set_published(&mut self, published: bool) -> bool {
        let next = PublicationStatus::from_published(published);
        if next == self.status {
            return false;
        }
        self.status = next;
        self.updated_at = Timestamp::now();
        true
    }
}
