//! Parent favorites.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ActivityId, Timestamp, UserId};

/// A parent bookmarking a listing. Unique per `(user_id, activity_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub user_id: UserId,
    pub activity_id: ActivityId,
    pub created_at: Timestamp,
}

impl Favorite {
    pub fn new(user_id: UserId, activity_id: ActivityId) -> Self {
        Self {
            user_id,
            activity_id,
            created_at: Timestamp::now(),
        }
    }
}
