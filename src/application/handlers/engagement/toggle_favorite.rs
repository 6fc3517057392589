//! ToggleFavoriteHandler - Command handler for parent favorites.

use std::sync::Arc;

use tracing::info;

use crate::domain::engagement::{EngagementError, Favorite};
use crate::domain::foundation::{ActivityId, AuthenticatedUser, Role};
use crate::ports::{ActivityRepository, FavoriteRepository};

/// Command to flip a listing in or out of the caller's favorites.
#[derive(Debug, Clone)]
pub struct ToggleFavoriteCommand {
    pub session: Option<AuthenticatedUser>,
    pub activity_id: ActivityId,
}

/// Favorite state after the toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleFavoriteResult {
    pub activity_id: ActivityId,
    pub favorited: bool,
}

pub struct ToggleFavoriteHandler {
    activities: Arc<dyn ActivityRepository>,
    favorites: Arc<dyn FavoriteRepository>,
}

impl ToggleFavoriteHandler {
    pub fn new(
        activities: Arc<dyn ActivityRepository>,
        favorites: Arc<dyn FavoriteRepository>,
    ) -> Self {
        Self {
            activities,
            favorites,
        }
    }

    pub async fn handle(
        &self,
        cmd: ToggleFavoriteCommand,
    ) -> Result<ToggleFavoriteResult, EngagementError> {
        // 1. Parents only
        let user = cmd.session.ok_or(EngagementError::Unauthenticated)?;
        if user.role != Role::Parent {
            return Err(EngagementError::Unauthorized);
        }

        // 2. Listing must be visible
        let published = self
            .activities
            .find_by_id(&cmd.activity_id)
            .await?
            .is_some_and(|activity| activity.is_published());
        if !published {
            return Err(EngagementError::activity_not_found(cmd.activity_id));
        }

        // 3. Flip
        let favorited = if self.favorites.remove(&user.id, &cmd.activity_id).await? {
            false
        } else {
            self.favorites
                .add(&Favorite::new(user.id.clone(), cmd.activity_id))
                .await?;
            true
        };

        info!(
            activity_id = %cmd.activity_id,
            user_id = %user.id,
            favorited,
            "Favorite toggled"
        );

        Ok(ToggleFavoriteResult {
            activity_id: cmd.activity_id,
            favorited,
        })
    }
}
