//! Shared authorization steps of the listing lifecycle.
//!
//! Every mutating handler runs the same gates in the same order:
//!
//! 1. session present, else `Unauthenticated`
//! 2. role is Company or Admin, else `Unauthorized`
//! 3. acting company resolved from the session user
//! 4. entitlement (create/update only), else `Forbidden(reason)`
//! 5. ownership through [`ActivityAccess::resolve_target`], else `NotFound`

use std::sync::Arc;

use tracing::warn;

use crate::domain::activity::{Activity, ActivityError};
use crate::domain::company::{self, Company, SubscriptionState};
use crate::domain::foundation::{ActivityId, AuthenticatedUser, Timestamp};
use crate::ports::{ActivityRepository, CompanyRepository};

/// Caller cleared to manage listings.
#[derive(Debug, Clone)]
pub struct ListingManager {
    pub user: AuthenticatedUser,
    /// Company operated by the caller. Always present for company users;
    /// optional for admins.
    pub company: Option<Company>,
}

impl ListingManager {
    /// Company that new listings are created under.
    pub fn require_company(&self) -> Result<&Company, ActivityError> {
        self.company.as_ref().ok_or(ActivityError::CompanyNotFound)
    }

    /// Runs the entitlement evaluator for this caller at `now`.
    pub fn ensure_entitled(&self, now: Timestamp) -> Result<(), ActivityError> {
        let none = SubscriptionState::none();
        let subscription = self
            .company
            .as_ref()
            .map(|c| &c.subscription)
            .unwrap_or(&none);

        company::evaluate(self.user.role, subscription, now)
            .into_result()
            .map_err(|reason| {
                warn!(
                    user_id = %self.user.id,
                    reason = %reason,
                    "Listing mutation denied by entitlement"
                );
                ActivityError::forbidden(reason)
            })
    }
}

/// Resolves callers and target listings for lifecycle handlers.
#[derive(Clone)]
pub struct ActivityAccess {
    companies: Arc<dyn CompanyRepository>,
    activities: Arc<dyn ActivityRepository>,
}

impl ActivityAccess {
    pub fn new(
        companies: Arc<dyn CompanyRepository>,
        activities: Arc<dyn ActivityRepository>,
    ) -> Self {
        Self {
            companies,
            activities,
        }
    }

    /// Applies the session, role and company gates.
    pub async fn authorize(
        &self,
        session: Option<&AuthenticatedUser>,
    ) -> Result<ListingManager, ActivityError> {
        let user = session.ok_or(ActivityError::Unauthenticated)?;

        if !user.role.can_manage_listings() {
            return Err(ActivityError::Unauthorized);
        }

        let company = self.companies.find_by_user_id(&user.id).await?;
        if company.is_none() && !user.is_admin() {
            return Err(ActivityError::CompanyNotFound);
        }

        Ok(ListingManager {
            user: user.clone(),
            company,
        })
    }

    /// Loads the listing the caller may act on.
    ///
    /// Company users only see their own listings; a listing owned by anyone
    /// else is reported exactly like a missing one. Admins act on any listing.
    pub async fn resolve_target(
        &self,
        manager: &ListingManager,
        id: &ActivityId,
    ) -> Result<Activity, ActivityError> {
        let found = if manager.user.is_admin() {
            self.activities.find_by_id(id).await?
        } else {
            let company = manager.require_company()?;
            self.activities.find_owned(&company.id, id).await?
        };

        found.ok_or_else(|| ActivityError::not_found(*id))
    }
}
