//! ListActivitiesHandler - Query handler for the public catalogue.

use std::sync::Arc;

use crate::domain::activity::{Activity, ActivityError, ActivityFilter};
use crate::ports::ActivityRepository;

/// Query for published listings.
#[derive(Debug, Clone, Default)]
pub struct ListActivitiesQuery {
    pub filter: ActivityFilter,
}

/// Handler for browsing the catalogue. No session required.
pub struct ListActivitiesHandler {
    activities: Arc<dyn ActivityRepository>,
}

impl ListActivitiesHandler {
    pub fn new(activities: Arc<dyn ActivityRepository>) -> Self {
        Self { activities }
    }

    pub async fn handle(&self, query: ListActivitiesQuery) -> Result<Vec<Activity>, ActivityError> {
        Ok(self.activities.list_published(&query.filter).await?)
    }
}
