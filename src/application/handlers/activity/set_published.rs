//! SetPublishedHandler - Command handler for publishing and unpublishing.

use std::sync::Arc;

use tracing::info;

use crate::domain::activity::{Activity, ActivityError};
use crate::domain::foundation::{ActivityId, AuthenticatedUser};
use crate::ports::ActivityRepository;

use super::ActivityAccess;

/// Command to publish or unpublish a listing.
#[derive(Debug, Clone)]
pub struct SetPublishedCommand {
    pub session: Option<AuthenticatedUser>,
    pub activity_id: ActivityId,
    pub published: bool,
}

/// Handler for toggling publication.
///
/// Not gated by entitlement: a company whose subscription lapsed can still
/// take its listings offline (or back online).
pub struct SetPublishedHandler {
    access: ActivityAccess,
    activities: Arc<dyn ActivityRepository>,
}

impl SetPublishedHandler {
    pub fn new(access: ActivityAccess, activities: Arc<dyn ActivityRepository>) -> Self {
        Self { access, activities }
    }

    pub async fn handle(&self, cmd: SetPublishedCommand) -> Result<Activity, ActivityError> {
        // 1. Session, role and acting company
        let manager = self.access.authorize(cmd.session.as_ref()).await?;

        // 2. Ownership
        let mut activity = self.access.resolve_target(&manager, &cmd.activity_id).await?;

        // 3. Transition; re-applying the current status is a no-op
        if activity.set_published(cmd.published) {
            self.activities
                .set_published(&activity.id, cmd.published)
                .await
                .map_err(|e| ActivityError::from_write(activity.id, e))?;

            info!(
                activity_id = %activity.id,
                company_id = %activity.company_id,
                published = cmd.published,
                "Activity publication changed"
            );
        }

        Ok(activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::activity::test_support::*;
    use crate::domain::company::SubscriptionState;
    use crate::domain::foundation::Role;

    fn handler(world: &World) -> SetPublishedHandler {
        SetPublishedHandler::new(world.access(), world.activities.clone())
    }

    fn command(session: &AuthenticatedUser, id: ActivityId, published: bool) -> SetPublishedCommand {
        SetPublishedCommand {
            session: Some(session.clone()),
            activity_id: id,
            published,
        }
    }

    #[tokio::test]
    async fn publishing_twice_yields_same_state() {
        let owner = user("owner-1", Role::Company);
        let company = company_for(&owner, active_subscription());
        let listing = listing_of(&company, false);
        let world = World::new(vec![company], vec![listing.clone()]);

        let first = handler(&world).handle(command(&owner, listing.id, true)).await.unwrap();
        let second = handler(&world).handle(command(&owner, listing.id, true)).await.unwrap();

        assert!(first.is_published());
        assert_eq!(first.status, second.status);
        let stored = world.activities.find_by_id(&listing.id).await.unwrap().unwrap();
        assert!(stored.is_published());
    }

    #[tokio::test]
    async fn lapsed_company_can_unpublish_own_listing() {
        let owner = user("owner-1", Role::Company);
        let company = company_for(&owner, expired_subscription());
        let listing = listing_of(&company, true);
        let world = World::new(vec![company], vec![listing.clone()]);

        let result = handler(&world).handle(command(&owner, listing.id, false)).await.unwrap();

        assert!(!result.is_published());
    }

    #[tokio::test]
    async fn unsubscribed_company_can_publish_own_listing() {
        let owner = user("owner-1", Role::Company);
        let company = company_for(&owner, SubscriptionState::none());
        let listing = listing_of(&company, false);
        let world = World::new(vec![company], vec![listing.clone()]);

        let result = handler(&world).handle(command(&owner, listing.id, true)).await.unwrap();

        assert!(result.is_published());
    }

    #[tokio::test]
    async fn other_companys_listing_is_not_found() {
        let owner_a = user("owner-a", Role::Company);
        let company_a = company_for(&owner_a, active_subscription());
        let company_b = company_for(&user("owner-b", Role::Company), active_subscription());
        let listing_b = listing_of(&company_b, false);
        let world = World::new(vec![company_a, company_b], vec![listing_b.clone()]);

        let result = handler(&world).handle(command(&owner_a, listing_b.id, true)).await;

        assert_eq!(result.unwrap_err(), ActivityError::NotFound(listing_b.id));
        let stored = world.activities.find_by_id(&listing_b.id).await.unwrap().unwrap();
        assert!(!stored.is_published());
    }

    #[tokio::test]
    async fn parent_is_unauthorized() {
        let world = World::new(vec![], vec![]);
        let parent = user("parent-1", Role::Parent);

        let result = handler(&world).handle(command(&parent, ActivityId::new(), true)).await;

        assert_eq!(result.unwrap_err(), ActivityError::Unauthorized);
    }

    #[tokio::test]
    async fn admin_without_company_can_unpublish_any_listing() {
        let company = company_for(&user("owner-1", Role::Company), active_subscription());
        let listing = listing_of(&company, true);
        let world = World::new(vec![company], vec![listing.clone()]);
        let admin = user("admin-1", Role::Admin);

        let result = handler(&world).handle(command(&admin, listing.id, false)).await.unwrap();

        assert!(!result.is_published());
    }

    #[tokio::test]
    async fn listing_deleted_mid_publish_is_not_found() {
        let owner = user("owner-1", Role::Company);
        let company = company_for(&owner, active_subscription());
        let listing = listing_of(&company, false);
        let world = World::new(vec![company], vec![listing.clone()]);
        let (access, activities) = world.racing_delete();

        let result = SetPublishedHandler::new(access, activities)
            .handle(command(&owner, listing.id, true))
            .await;

        assert_eq!(result.unwrap_err(), ActivityError::NotFound(listing.id));
    }
}
