//! RecordClickHandler - Command handler for listing click analytics.

use std::sync::Arc;

use tracing::warn;

use crate::domain::engagement::{ActivityClick, EngagementError};
use crate::domain::foundation::{ActivityId, AuthenticatedUser};
use crate::ports::{ActivityRepository, ClickRecorder};

#[derive(Debug, Clone)]
pub struct RecordClickCommand {
    /// Anonymous visitors are counted too.
    pub session: Option<AuthenticatedUser>,
    pub activity_id: ActivityId,
}

/// Handler for recording clicks.
///
/// Recording is best effort: once the listing is known to be published, a
/// failing recorder is logged and the click is dropped.
pub struct RecordClickHandler {
    activities: Arc<dyn ActivityRepository>,
    clicks: Arc<dyn ClickRecorder>,
}

impl RecordClickHandler {
    pub fn new(activities: Arc<dyn ActivityRepository>, clicks: Arc<dyn ClickRecorder>) -> Self {
        Self { activities, clicks }
    }

    pub async fn handle(&self, cmd: RecordClickCommand) -> Result<(), EngagementError> {
        let published = self
            .activities
            .find_by_id(&cmd.activity_id)
            .await?
            .is_some_and(|activity| activity.is_published());
        if !published {
            return Err(EngagementError::activity_not_found(cmd.activity_id));
        }

        let click = ActivityClick::new(cmd.activity_id, cmd.session.map(|user| user.id));
        if let Err(e) = self.clicks.record(&click).await {
            warn!(activity_id = %cmd.activity_id, error = %e, "Dropped click");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryActivityRepository, InMemoryClickRecorder};
    use crate::application::handlers::activity::test_support::{
        active_subscription, company_for, listing_of, user,
    };
    use crate::domain::foundation::{DomainError, Role};
    use async_trait::async_trait;

    struct FailingRecorder;

    #[async_trait]
    impl ClickRecorder for FailingRecorder {
        async fn record(&self, _click: &ActivityClick) -> Result<(), DomainError> {
            Err(DomainError::database("connection reset"))
        }
    }

    fn repo_with(published: bool) -> (Arc<InMemoryActivityRepository>, ActivityId) {
        let company = company_for(&user("owner-1", Role::Company), active_subscription());
        let listing = listing_of(&company, published);
        let id = listing.id;
        (Arc::new(InMemoryActivityRepository::with_activities([listing])), id)
    }

    #[tokio::test]
    async fn anonymous_click_is_recorded() {
        let (activities, id) = repo_with(true);
        let clicks = Arc::new(InMemoryClickRecorder::new());
        let handler = RecordClickHandler::new(activities, clicks.clone());

        handler
            .handle(RecordClickCommand {
                session: None,
                activity_id: id,
            })
            .await
            .unwrap();

        let recorded = clicks.clicks();
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].is_anonymous());
    }

    #[tokio::test]
    async fn click_on_draft_is_not_found() {
        let (activities, id) = repo_with(false);
        let handler = RecordClickHandler::new(activities, Arc::new(InMemoryClickRecorder::new()));

        let result = handler
            .handle(RecordClickCommand {
                session: Some(user("parent-1", Role::Parent)),
                activity_id: id,
            })
            .await;

        assert_eq!(result.unwrap_err(), EngagementError::ActivityNotFound(id));
    }

    #[tokio::test]
    async fn recorder_failure_is_swallowed() {
        let (activities, id) = repo_with(true);
        let handler = RecordClickHandler::new(activities, Arc::new(FailingRecorder));

        let result = handler
            .handle(RecordClickCommand {
                session: None,
                activity_id: id,
            })
            .await;

        assert!(result.is_ok());
    }
}
