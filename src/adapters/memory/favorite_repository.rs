//! In-memory favorite repository.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::engagement::Favorite;
use crate::domain::foundation::{ActivityId, DomainError, UserId};
use crate::ports::FavoriteRepository;

use super::lock;

/// In-memory implementation of the FavoriteRepository port.
#[derive(Default)]
pub struct InMemoryFavoriteRepository {
    favorites: Mutex<Vec<Favorite>>,
}

impl InMemoryFavoriteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepository {
    async fn add(&self, favorite: &Favorite) -> Result<(), DomainError> {
        let mut favorites = lock(&self.favorites)?;
        let exists = favorites
            .iter()
            .any(|f| f.user_id == favorite.user_id && f.activity_id == favorite.activity_id);
        if !exists {
            favorites.push(favorite.clone());
        }
        Ok(())
    }

    async fn remove(&self, user_id: &UserId, activity_id: &ActivityId) -> Result<bool, DomainError> {
        let mut favorites = lock(&self.favorites)?;
        let before = favorites.len();
        favorites.retain(|f| !(&f.user_id == user_id && &f.activity_id == activity_id));
        Ok(favorites.len() != before)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Favorite>, DomainError> {
        let mut mine: Vec<Favorite> = lock(&self.favorites)?
            .iter()
            .filter(|f| &f.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine)
    }
}
