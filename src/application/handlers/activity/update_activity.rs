//! UpdateActivityHandler - Command handler for replacing a listing's content.

use std::sync::Arc;

use tracing::info;

use crate::domain::activity::{Activity, ActivityDraft, ActivityError};
use crate::domain::foundation::{ActivityId, AuthenticatedUser, Timestamp};
use crate::ports::ActivityRepository;

use super::ActivityAccess;

/// Command to update a listing.
///
/// The draft replaces every content field; omitted optional fields fall
/// back to their defaults. `published` is applied only when present.
#[derive(Debug, Clone)]
pub struct UpdateActivityCommand {
    pub session: Option<AuthenticatedUser>,
    pub activity_id: ActivityId,
    pub draft: ActivityDraft,
}

/// Handler for updating listings.
pub struct UpdateActivityHandler {
    access: ActivityAccess,
    activities: Arc<dyn ActivityRepository>,
}

impl UpdateActivityHandler {
    pub fn new(access: ActivityAccess, activities: Arc<dyn ActivityRepository>) -> Self {
        Self { access, activities }
    }

    pub async fn handle(&self, cmd: UpdateActivityCommand) -> Result<Activity, ActivityError> {
        // 1. Session, role and acting company
        let manager = self.access.authorize(cmd.session.as_ref()).await?;

        // 2. Entitlement
        manager.ensure_entitled(Timestamp::now())?;

        // 3. Ownership
        let mut activity = self.access.resolve_target(&manager, &cmd.activity_id).await?;

        // 4. Validate and replace
        let fields = cmd.draft.normalize()?;
        activity.replace_details(fields);
        if let Some(published) = cmd.draft.published {
            activity.set_published(published);
        }

        // 5. Persist
        self.activities
            .update(&activity)
            .await
            .map_err(|e| ActivityError::from_write(activity.id, e))?;

        info!(
            activity_id = %activity.id,
            company_id = %activity.company_id,
            "Activity updated"
        );

        Ok(activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::activity::test_support::*;
    use crate::domain::company::EntitlementDenial;
    use crate::domain::foundation::Role;

    fn handler(world: &World) -> UpdateActivityHandler {
        UpdateActivityHandler::new(world.access(), world.activities.clone())
    }

    #[tokio::test]
    async fn owner_replaces_content() {
        let owner = user("owner-1", Role::Company);
        let company = company_for(&owner, active_subscription());
        let listing = listing_of(&company, false);
        let world = World::new(vec![company], vec![listing.clone()]);
        let mut draft = chess_club_draft();
        draft.title = Some("Chess Masters".to_string());

        let updated = handler(&world)
            .handle(UpdateActivityCommand {
                session: Some(owner),
                activity_id: listing.id,
                draft,
            })
            .await
            .unwrap();

        assert_eq!(updated.details.title, "Chess Masters");
        let stored = world.activities.find_by_id(&listing.id).await.unwrap().unwrap();
        assert_eq!(stored.details.title, "Chess Masters");
    }

    #[tokio::test]
    async fn omitted_address_is_reset_to_empty() {
        let owner = user("owner-1", Role::Company);
        let company = company_for(&owner, active_subscription());
        let listing = listing_of(&company, false);
        assert_eq!(listing.details.address, "123 Main St");
        let world = World::new(vec![company], vec![listing.clone()]);
        let mut draft = chess_club_draft();
        draft.address = None;

        let updated = handler(&world)
            .handle(UpdateActivityCommand {
                session: Some(owner),
                activity_id: listing.id,
                draft,
            })
            .await
            .unwrap();

        assert_eq!(updated.details.address, "");
    }

    #[tokio::test]
    async fn omitted_published_keeps_status() {
        let owner = user("owner-1", Role::Company);
        let company = company_for(&owner, active_subscription());
        let listing = listing_of(&company, true);
        let world = World::new(vec![company], vec![listing.clone()]);

        let updated = handler(&world)
            .handle(UpdateActivityCommand {
                session: Some(owner),
                activity_id: listing.id,
                draft: chess_club_draft(),
            })
            .await
            .unwrap();

        assert!(updated.is_published());
    }

    #[tokio::test]
    async fn present_published_is_applied() {
        let owner = user("owner-1", Role::Company);
        let company = company_for(&owner, active_subscription());
        let listing = listing_of(&company, true);
        let world = World::new(vec![company], vec![listing.clone()]);
        let mut draft = chess_club_draft();
        draft.published = Some(false);

        let updated = handler(&world)
            .handle(UpdateActivityCommand {
                session: Some(owner),
                activity_id: listing.id,
                draft,
            })
            .await
            .unwrap();

        assert!(!updated.is_published());
    }

    #[tokio::test]
    async fn other_companys_listing_is_not_found() {
        let owner_a = user("owner-a", Role::Company);
        let owner_b = user("owner-b", Role::Company);
        let company_a = company_for(&owner_a, active_subscription());
        let company_b = company_for(&owner_b, active_subscription());
        let listing_b = listing_of(&company_b, true);
        let world = World::new(vec![company_a, company_b], vec![listing_b.clone()]);

        let result = handler(&world)
            .handle(UpdateActivityCommand {
                session: Some(owner_a),
                activity_id: listing_b.id,
                draft: chess_club_draft(),
            })
            .await;

        assert_eq!(result.unwrap_err(), ActivityError::NotFound(listing_b.id));
    }

    #[tokio::test]
    async fn missing_listing_and_foreign_listing_look_identical() {
        let owner_a = user("owner-a", Role::Company);
        let company_a = company_for(&owner_a, active_subscription());
        let company_b = company_for(&user("owner-b", Role::Company), active_subscription());
        let listing_b = listing_of(&company_b, true);
        let world = World::new(vec![company_a, company_b], vec![listing_b.clone()]);
        let missing = ActivityId::new();

        let foreign = handler(&world)
            .handle(UpdateActivityCommand {
                session: Some(owner_a.clone()),
                activity_id: listing_b.id,
                draft: chess_club_draft(),
            })
            .await
            .unwrap_err();
        let absent = handler(&world)
            .handle(UpdateActivityCommand {
                session: Some(owner_a),
                activity_id: missing,
                draft: chess_club_draft(),
            })
            .await
            .unwrap_err();

        assert_eq!(foreign.code(), absent.code());
    }

    #[tokio::test]
    async fn lapsed_company_cannot_update() {
        let owner = user("owner-1", Role::Company);
        let company = company_for(&owner, expired_subscription());
        let listing = listing_of(&company, true);
        let world = World::new(vec![company], vec![listing.clone()]);

        let result = handler(&world)
            .handle(UpdateActivityCommand {
                session: Some(owner),
                activity_id: listing.id,
                draft: chess_club_draft(),
            })
            .await;

        assert_eq!(
            result.unwrap_err(),
            ActivityError::Forbidden(EntitlementDenial::Expired)
        );
    }

    #[tokio::test]
    async fn admin_updates_any_listing() {
        let company = company_for(&user("owner-1", Role::Company), expired_subscription());
        let listing = listing_of(&company, true);
        let world = World::new(vec![company], vec![listing.clone()]);
        let mut draft = chess_club_draft();
        draft.city = Some("Laval".to_string());

        let updated = handler(&world)
            .handle(UpdateActivityCommand {
                session: Some(user("admin-1", Role::Admin)),
                activity_id: listing.id,
                draft,
            })
            .await
            .unwrap();

        assert_eq!(updated.details.city, "Laval");
        assert_eq!(updated.company_id, listing.company_id);
    }

    #[tokio::test]
    async fn invalid_update_leaves_listing_untouched() {
        let owner = user("owner-1", Role::Company);
        let company = company_for(&owner, active_subscription());
        let listing = listing_of(&company, false);
        let world = World::new(vec![company], vec![listing.clone()]);
        let mut draft = chess_club_draft();
        draft.age_min = Some(50.0.into());

        let result = handler(&world)
            .handle(UpdateActivityCommand {
                session: Some(owner),
                activity_id: listing.id,
                draft,
            })
            .await;

        assert!(matches!(result, Err(ActivityError::ValidationFailed { .. })));
        let stored = world.activities.find_by_id(&listing.id).await.unwrap().unwrap();
        assert_eq!(stored, listing);
    }

    #[tokio::test]
    async fn listing_deleted_mid_update_is_not_found() {
        let owner = user("owner-1", Role::Company);
        let company = company_for(&owner, active_subscription());
        let listing = listing_of(&company, false);
        let world = World::new(vec![company], vec![listing.clone()]);
        let (access, activities) = world.racing_delete();

        let result = UpdateActivityHandler::new(access, activities)
            .handle(UpdateActivityCommand {
                session: Some(owner),
                activity_id: listing.id,
                draft: chess_club_draft(),
            })
            .await;

        assert_eq!(result.unwrap_err(), ActivityError::NotFound(listing.id));
    }
}
