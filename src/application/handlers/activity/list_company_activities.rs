//! ListCompanyActivitiesHandler - Query handler for a company's own listings.

use std::sync::Arc;

use crate::domain::activity::{Activity, ActivityError};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::ActivityRepository;

use super::ActivityAccess;

/// Query for the acting company's listings, drafts included.
#[derive(Debug, Clone)]
pub struct ListCompanyActivitiesQuery {
    pub session: Option<AuthenticatedUser>,
}

pub struct ListCompanyActivitiesHandler {
    access: ActivityAccess,
    activities: Arc<dyn ActivityRepository>,
}

impl ListCompanyActivitiesHandler {
    pub fn new(access: ActivityAccess, activities: Arc<dyn ActivityRepository>) -> Self {
        Self { access, activities }
    }

    pub async fn handle(
        &self,
        query: ListCompanyActivitiesQuery,
    ) -> Result<Vec<Activity>, ActivityError> {
        let manager = self.access.authorize(query.session.as_ref()).await?;
        let company = manager.require_company()?;

        Ok(self.activities.list_by_company(&company.id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::activity::test_support::*;
    use crate::domain::foundation::Role;

    #[tokio::test]
    async fn lists_own_drafts_and_published() {
        let owner = user("owner-1", Role::Company);
        let company = company_for(&owner, expired_subscription());
        let other = company_for(&user("owner-2", Role::Company), active_subscription());
        let world = World::new(
            vec![company.clone(), other.clone()],
            vec![
                listing_of(&company, true),
                listing_of(&company, false),
                listing_of(&other, true),
            ],
        );

        let listed = ListCompanyActivitiesHandler::new(world.access(), world.activities.clone())
            .handle(ListCompanyActivitiesQuery {
                session: Some(owner),
            })
            .await
            .unwrap();

        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|a| a.company_id == company.id));
    }

    #[tokio::test]
    async fn parent_is_unauthorized() {
        let world = World::new(vec![], vec![]);

        let result = ListCompanyActivitiesHandler::new(world.access(), world.activities.clone())
            .handle(ListCompanyActivitiesQuery {
                session: Some(user("parent-1", Role::Parent)),
            })
            .await;

        assert_eq!(result.unwrap_err(), ActivityError::Unauthorized);
    }
}
