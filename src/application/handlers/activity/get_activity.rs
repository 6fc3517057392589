//! GetActivityHandler - Query handler for a single listing.

use std::sync::Arc;

use crate::domain::activity::{Activity, ActivityError};
use crate::domain::foundation::{ActivityId, AuthenticatedUser};
use crate::ports::ActivityRepository;

use super::ActivityAccess;

/// Query for one listing.
#[derive(Debug, Clone)]
pub struct GetActivityQuery {
    pub viewer: Option<AuthenticatedUser>,
    pub activity_id: ActivityId,
}

/// Handler for reading a listing.
///
/// Published listings are public. Drafts are visible to whoever passes the
/// lifecycle ownership check (the owning company and admins); anyone else
/// gets `NotFound`.
pub struct GetActivityHandler {
    access: ActivityAccess,
    activities: Arc<dyn ActivityRepository>,
}

impl GetActivityHandler {
    pub fn new(access: ActivityAccess, activities: Arc<dyn ActivityRepository>) -> Self {
        Self { access, activities }
    }

    pub async fn handle(&self, query: GetActivityQuery) -> Result<Activity, ActivityError> {
        // 1. Published listings need no session
        let activity = self
            .activities
            .find_by_id(&query.activity_id)
            .await?
            .ok_or_else(|| ActivityError::not_found(query.activity_id))?;

        if activity.is_published() {
            return Ok(activity);
        }

        // 2. Drafts only for callers who could manage them
        let manager = match self.access.authorize(query.viewer.as_ref()).await {
            Ok(manager) => manager,
            Err(ActivityError::Infrastructure(detail)) => {
                return Err(ActivityError::Infrastructure(detail))
            }
            Err(_) => return Err(ActivityError::not_found(query.activity_id)),
        };

        self.access.resolve_target(&manager, &query.activity_id).await
    }
}
