//! DeleteActivityHandler - Command handler for deleting listings.

use std::sync::Arc;

use tracing::info;

use crate::domain::activity::ActivityError;
use crate::domain::foundation::{ActivityId, AuthenticatedUser};
use crate::ports::ActivityRepository;

use super::ActivityAccess;

/// Command to delete a listing.
#[derive(Debug, Clone)]
pub struct DeleteActivityCommand {
    pub session: Option<AuthenticatedUser>,
    pub activity_id: ActivityId,
}

/// Handler for deleting listings. Not gated by entitlement.
pub struct DeleteActivityHandler {
    access: ActivityAccess,
    activities: Arc<dyn ActivityRepository>,
}

impl DeleteActivityHandler {
    pub fn new(access: ActivityAccess, activities: Arc<dyn ActivityRepository>) -> Self {
        Self { access, activities }
    }

    pub async fn handle(&self, cmd: DeleteActivityCommand) -> Result<(), ActivityError> {
        // 1. Session, role and acting company
        let manager = self.access.authorize(cmd.session.as_ref()).await?;

        // 2. Ownership
        let activity = self.access.resolve_target(&manager, &cmd.activity_id).await?;

        // 3. Delete
        self.activities
            .delete(&activity.id)
            .await
            .map_err(|e| ActivityError::from_write(activity.id, e))?;

        info!(
            activity_id = %activity.id,
            company_id = %activity.company_id,
            deleted_by = %manager.user.id,
            "Activity deleted"
        );

        Ok(())
    }
}
