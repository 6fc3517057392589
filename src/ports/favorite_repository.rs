//! Favorite repository port.

use crate::domain::engagement::Favorite;
use crate::domain::foundation::{ActivityId, DomainError, UserId};
use async_trait::async_trait;

/// Repository port for parent favorites.
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Add a favorite; adding an existing pair is a no-op.
    async fn add(&self, favorite: &Favorite) -> Result<(), DomainError>;

    /// Remove a favorite, returning whether one existed.
    async fn remove(&self, user_id: &UserId, activity_id: &ActivityId) -> Result<bool, DomainError>;

    /// Favorites of a user, most recent first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Favorite>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favorite_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn FavoriteRepository) {}
    }
}
