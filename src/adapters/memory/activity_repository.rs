//! In-memory activity repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::activity::{Activity, ActivityFilter, PublicationStatus};
use crate::domain::foundation::{ActivityId, CompanyId, DomainError, ErrorCode, Timestamp};
use crate::ports::ActivityRepository;

use super::lock;

/// In-memory implementation of the ActivityRepository port.
#[derive(Default)]
pub struct InMemoryActivityRepository {
    activities: Mutex<HashMap<ActivityId, Activity>>,
}

impl InMemoryActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `activities`.
    pub fn with_activities(activities: impl IntoIterator<Item = Activity>) -> Self {
        Self {
            activities: Mutex::new(activities.into_iter().map(|a| (a.id, a)).collect()),
        }
    }

    /// Number of stored listings.
    pub fn len(&self) -> usize {
        self.activities.lock().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn newest_first(mut activities: Vec<Activity>) -> Vec<Activity> {
    activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    activities
}

fn not_found(id: &ActivityId) -> DomainError {
    DomainError::new(ErrorCode::ActivityNotFound, format!("Activity not found: {}", id))
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn find_by_id(&self, id: &ActivityId) -> Result<Option<Activity>, DomainError> {
        Ok(lock(&self.activities)?.get(id).cloned())
    }

    async fn find_owned(
        &self,
        company_id: &CompanyId,
        id: &ActivityId,
    ) -> Result<Option<Activity>, DomainError> {
        Ok(lock(&self.activities)?
            .get(id)
            .filter(|a| &a.company_id == company_id)
            .cloned())
    }

    async fn create(&self, activity: &Activity) -> Result<(), DomainError> {
        let mut activities = lock(&self.activities)?;
        if activities.contains_key(&activity.id) {
            return Err(DomainError::validation("id", "Activity already exists"));
        }
        activities.insert(activity.id, activity.clone());
        Ok(())
    }

    async fn update(&self, activity: &Activity) -> Result<(), DomainError> {
        let mut activities = lock(&self.activities)?;
        let stored = activities
            .get_mut(&activity.id)
            .ok_or_else(|| not_found(&activity.id))?;
        stored.details = activity.details.clone();
        stored.status = activity.status;
        stored.updated_at = activity.updated_at;
        Ok(())
    }

    async fn set_published(&self, id: &ActivityId, published: bool) -> Result<(), DomainError> {
        let mut activities = lock(&self.activities)?;
        let stored = activities.get_mut(id).ok_or_else(|| not_found(id))?;
        let status = PublicationStatus::from_published(published);
        if stored.status != status {
            stored.status = status;
            stored.updated_at = Timestamp::now();
        }
        Ok(())
    }

    async fn delete(&self, id: &ActivityId) -> Result<(), DomainError> {
        lock(&self.activities)?.remove(id);
        Ok(())
    }

    async fn list_published(&self, filter: &ActivityFilter) -> Result<Vec<Activity>, DomainError> {
        let matching = lock(&self.activities)?
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();

        Ok(newest_first(matching)
            .into_iter()
            .skip(filter.page_offset() as usize)
            .take(filter.page_size() as usize)
            .collect())
    }

    async fn list_published_by_ids(&self, ids: &[ActivityId]) -> Result<Vec<Activity>, DomainError> {
        let activities = lock(&self.activities)?;
        let found = ids
            .iter()
            .filter_map(|id| activities.get(id))
            .filter(|a| a.is_published())
            .cloned()
            .collect();
        Ok(newest_first(found))
    }

    async fn list_by_company(&self, company_id: &CompanyId) -> Result<Vec<Activity>, DomainError> {
        let owned = lock(&self.activities)?
            .values()
            .filter(|a| &a.company_id == company_id)
            .cloned()
            .collect();
        Ok(newest_first(owned))
    }
}
