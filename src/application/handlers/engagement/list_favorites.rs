//! ListFavoritesHandler - Query handler for a parent's saved listings.

use std::sync::Arc;

use crate::domain::activity::Activity;
use crate::domain::engagement::EngagementError;
use crate::domain::foundation::{ActivityId, AuthenticatedUser, Role};
use crate::ports::{ActivityRepository, FavoriteRepository};

#[derive(Debug, Clone)]
pub struct ListFavoritesQuery {
    pub session: Option<AuthenticatedUser>,
}

/// Handler for listing favorites.
///
/// Returns the favorited listings that are still published, most recently
/// favorited first. Unpublished or deleted listings are left out silently.
pub struct ListFavoritesHandler {
    activities: Arc<dyn ActivityRepository>,
    favorites: Arc<dyn FavoriteRepository>,
}

impl ListFavoritesHandler {
    pub fn new(
        activities: Arc<dyn ActivityRepository>,
        favorites: Arc<dyn FavoriteRepository>,
    ) -> Self {
        Self {
            activities,
            favorites,
        }
    }

    pub async fn handle(&self, query: ListFavoritesQuery) -> Result<Vec<Activity>, EngagementError> {
        let user = query.session.ok_or(EngagementError::Unauthenticated)?;
        if user.role != Role::Parent {
            return Err(EngagementError::Unauthorized);
        }

        let mut favorites = self.favorites.list_for_user(&user.id).await?;
        favorites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let ids: Vec<ActivityId> = favorites.iter().map(|f| f.activity_id).collect();

        let mut activities = self.activities.list_published_by_ids(&ids).await?;
        activities.sort_by_key(|activity| ids.iter().position(|id| *id == activity.id));
        Ok(activities)
    }
}
