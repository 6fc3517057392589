//! CreateActivityHandler - Command handler for creating listings.

use std::sync::Arc;

use tracing::info;

use crate::domain::activity::{Activity, ActivityDraft, ActivityError};
use crate::domain::foundation::{ActivityId, AuthenticatedUser, Timestamp};
use crate::ports::ActivityRepository;

use super::ActivityAccess;

/// Command to create a listing.
#[derive(Debug, Clone)]
pub struct CreateActivityCommand {
    pub session: Option<AuthenticatedUser>,
    pub draft: ActivityDraft,
}

/// Handler for creating listings.
pub struct CreateActivityHandler {
    access: ActivityAccess,
    activities: Arc<dyn ActivityRepository>,
}

impl CreateActivityHandler {
    pub fn new(access: ActivityAccess, activities: Arc<dyn ActivityRepository>) -> Self {
        Self { access, activities }
    }

    pub async fn handle(&self, cmd: CreateActivityCommand) -> Result<Activity, ActivityError> {
        // 1. Session, role and acting company
        let manager = self.access.authorize(cmd.session.as_ref()).await?;
        let company = manager.require_company()?;

        // 2. Entitlement
        manager.ensure_entitled(Timestamp::now())?;

        // 3. Validate content
        let fields = cmd.draft.normalize()?;

        // 4. Persist under the acting company
        let activity = Activity::create(
            ActivityId::new(),
            company.id,
            fields,
            cmd.draft.published.unwrap_or(false),
        );
        self.activities.create(&activity).await?;

        info!(
            activity_id = %activity.id,
            company_id = %activity.company_id,
            published = activity.is_published(),
            "Activity created"
        );

        Ok(activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::activity::test_support::*;
    use crate::domain::company::{EntitlementDenial, SubscriptionState};
    use crate::domain::foundation::Role;

    fn handler(world: &World) -> CreateActivityHandler {
        CreateActivityHandler::new(world.access(), world.activities.clone())
    }

    #[tokio::test]
    async fn active_company_creates_unpublished_listing() {
        let owner = user("owner-1", Role::Company);
        let company = company_for(&owner, active_subscription());
        let world = World::new(vec![company.clone()], vec![]);

        let activity = handler(&world)
            .handle(CreateActivityCommand {
                session: Some(owner),
                draft: chess_club_draft(),
            })
            .await
            .unwrap();

        assert_eq!(activity.details.title, "Chess Club");
        assert_eq!(activity.company_id, company.id);
        assert!(!activity.is_published());
        assert_eq!(world.activities.len(), 1);
    }

    #[tokio::test]
    async fn four_required_fields_are_enough_to_create() {
        let owner = user("owner-1", Role::Company);
        let world = World::new(vec![company_for(&owner, active_subscription())], vec![]);
        let draft = ActivityDraft {
            title: Some("Chess Club".to_string()),
            description: Some("...".to_string()),
            category: Some("Arte".to_string()),
            city: Some("Madrid".to_string()),
            ..ActivityDraft::default()
        };

        let activity = handler(&world)
            .handle(CreateActivityCommand {
                session: Some(owner),
                draft,
            })
            .await
            .unwrap();

        assert!(!activity.is_published());
        assert_eq!(activity.details.city, "Madrid");
        assert_eq!(activity.details.age_min, 0);
        assert_eq!(activity.details.price_cents, 0);
    }

    #[tokio::test]
    async fn published_flag_is_honored_on_create() {
        let owner = user("owner-1", Role::Company);
        let world = World::new(vec![company_for(&owner, active_subscription())], vec![]);
        let mut draft = chess_club_draft();
        draft.published = Some(true);

        let activity = handler(&world)
            .handle(CreateActivityCommand {
                session: Some(owner),
                draft,
            })
            .await
            .unwrap();

        assert!(activity.is_published());
    }

    #[tokio::test]
    async fn expired_company_is_forbidden() {
        let owner = user("owner-1", Role::Company);
        let world = World::new(vec![company_for(&owner, expired_subscription())], vec![]);

        let result = handler(&world)
            .handle(CreateActivityCommand {
                session: Some(owner),
                draft: chess_club_draft(),
            })
            .await;

        assert_eq!(
            result.unwrap_err(),
            ActivityError::Forbidden(EntitlementDenial::Expired)
        );
        assert!(world.activities.is_empty());
    }

    #[tokio::test]
    async fn unsubscribed_company_is_forbidden_with_no_subscription() {
        let owner = user("owner-1", Role::Company);
        let world = World::new(vec![company_for(&owner, SubscriptionState::none())], vec![]);

        let result = handler(&world)
            .handle(CreateActivityCommand {
                session: Some(owner),
                draft: chess_club_draft(),
            })
            .await;

        assert_eq!(
            result.unwrap_err(),
            ActivityError::Forbidden(EntitlementDenial::NoSubscription)
        );
    }

    #[tokio::test]
    async fn missing_session_is_unauthenticated() {
        let world = World::new(vec![], vec![]);

        let result = handler(&world)
            .handle(CreateActivityCommand {
                session: None,
                draft: chess_club_draft(),
            })
            .await;

        assert_eq!(result.unwrap_err(), ActivityError::Unauthenticated);
    }

    #[tokio::test]
    async fn parent_is_unauthorized() {
        let world = World::new(vec![], vec![]);

        let result = handler(&world)
            .handle(CreateActivityCommand {
                session: Some(user("parent-1", Role::Parent)),
                draft: chess_club_draft(),
            })
            .await;

        assert_eq!(result.unwrap_err(), ActivityError::Unauthorized);
    }

    #[tokio::test]
    async fn company_user_without_company_record_gets_company_not_found() {
        let world = World::new(vec![], vec![]);

        let result = handler(&world)
            .handle(CreateActivityCommand {
                session: Some(user("owner-1", Role::Company)),
                draft: chess_club_draft(),
            })
            .await;

        assert_eq!(result.unwrap_err(), ActivityError::CompanyNotFound);
    }

    #[tokio::test]
    async fn admin_without_company_cannot_create() {
        let world = World::new(vec![], vec![]);

        let result = handler(&world)
            .handle(CreateActivityCommand {
                session: Some(user("admin-1", Role::Admin)),
                draft: chess_club_draft(),
            })
            .await;

        assert_eq!(result.unwrap_err(), ActivityError::CompanyNotFound);
    }

    #[tokio::test]
    async fn admin_with_linked_company_bypasses_subscription() {
        let admin = user("admin-1", Role::Admin);
        let world = World::new(vec![company_for(&admin, SubscriptionState::none())], vec![]);

        let result = handler(&world)
            .handle(CreateActivityCommand {
                session: Some(admin),
                draft: chess_club_draft(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn entitlement_is_checked_before_validation() {
        let owner = user("owner-1", Role::Company);
        let world = World::new(vec![company_for(&owner, expired_subscription())], vec![]);

        let result = handler(&world)
            .handle(CreateActivityCommand {
                session: Some(owner),
                draft: ActivityDraft::default(),
            })
            .await;

        assert!(matches!(result, Err(ActivityError::Forbidden(_))));
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected() {
        let owner = user("owner-1", Role::Company);
        let world = World::new(vec![company_for(&owner, active_subscription())], vec![]);
        let mut draft = chess_club_draft();
        draft.price = Some("free".into());

        let result = handler(&world)
            .handle(CreateActivityCommand {
                session: Some(owner),
                draft,
            })
            .await;

        assert!(matches!(
            result,
            Err(ActivityError::ValidationFailed { ref field, .. }) if field == "price"
        ));
        assert!(world.activities.is_empty());
    }
}
