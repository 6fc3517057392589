//! Listing click analytics.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ActivityId, Timestamp, UserId};

/// A visitor opening a listing's outbound link. Anonymous visitors are
/// recorded without a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityClick {
    pub activity_id: ActivityId,
    pub user_id: Option<UserId>,
    pub occurred_at: Timestamp,
}

impl ActivityClick {
    pub fn new(activity_id: ActivityId, user_id: Option<UserId>) -> Self {
        Self {
            activity_id,
            user_id,
            occurred_at: Timestamp::now(),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }
}
