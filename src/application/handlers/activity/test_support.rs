//! Fixtures shared by the lifecycle handler tests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::memory::{InMemoryActivityRepository, InMemoryCompanyRepository};
use crate::domain::activity::{Activity, ActivityDraft, ActivityFields, ActivityFilter};
use crate::domain::company::{Company, SubscriptionState};
use crate::domain::foundation::{
    ActivityId, AuthenticatedUser, CompanyId, DomainError, Role, Timestamp, UserId,
};
use crate::ports::ActivityRepository;

use super::ActivityAccess;

pub fn user(id: &str, role: Role) -> AuthenticatedUser {
    AuthenticatedUser::new(
        UserId::new(id).unwrap(),
        format!("{}@example.com", id),
        None,
        role,
    )
}

pub fn active_subscription() -> SubscriptionState {
    SubscriptionState {
        subscription_id: Some("sub_active".to_string()),
        current_period_end: Some(Timestamp::now().add_days(30)),
        price_id: Some("price_monthly".to_string()),
        customer_id: Some("cus_active".to_string()),
    }
}

pub fn expired_subscription() -> SubscriptionState {
    SubscriptionState {
        current_period_end: Some(Timestamp::now().minus_days(1)),
        ..active_subscription()
    }
}

pub fn company_for(user: &AuthenticatedUser, subscription: SubscriptionState) -> Company {
    Company::register(CompanyId::new(), user.id.clone(), "Test Company")
        .with_subscription(subscription)
}

pub fn chess_club_draft() -> ActivityDraft {
    ActivityDraft {
        title: Some("Chess Club".to_string()),
        description: Some("Weekly chess for beginners".to_string()),
        category: Some("Games".to_string()),
        age_min: Some(8.0.into()),
        age_max: Some(12.0.into()),
        price: Some(40.0.into()),
        address: Some("123 Main St".to_string()),
        city: Some("Montreal".to_string()),
        province: Some("QC".to_string()),
        postal_code: Some("H2X 1Y4".to_string()),
        ..ActivityDraft::default()
    }
}

pub fn listing_of(company: &Company, published: bool) -> Activity {
    let fields: ActivityFields = chess_club_draft().normalize().unwrap();
    Activity::create(ActivityId::new(), company.id, fields, published)
}

/// In-memory world with the given companies and listings.
pub struct World {
    pub companies: Arc<InMemoryCompanyRepository>,
    pub activities: Arc<InMemoryActivityRepository>,
}

impl World {
    pub fn new(companies: Vec<Company>, activities: Vec<Activity>) -> Self {
        Self {
            companies: Arc::new(InMemoryCompanyRepository::with_companies(companies)),
            activities: Arc::new(InMemoryActivityRepository::with_activities(activities)),
        }
    }

    pub fn access(&self) -> ActivityAccess {
        ActivityAccess::new(self.companies.clone(), self.activities.clone())
    }
}

/// Repository where every listing is deleted right after it is looked up,
/// as if another request removed it between the ownership check and the
/// write.
pub struct VanishingActivities(pub Arc<InMemoryActivityRepository>);

impl VanishingActivities {
    async fn vanish(&self, found: Option<Activity>) -> Result<Option<Activity>, DomainError> {
        if let Some(activity) = &found {
            self.0.delete(&activity.id).await?;
        }
        Ok(found)
    }
}

#[async_trait]
impl ActivityRepository for VanishingActivities {
    async fn find_by_id(&self, id: &ActivityId) -> Result<Option<Activity>, DomainError> {
        let found = self.0.find_by_id(id).await?;
        self.vanish(found).await
    }

    async fn find_owned(
        &self,
        company_id: &CompanyId,
        id: &ActivityId,
    ) -> Result<Option<Activity>, DomainError> {
        let found = self.0.find_owned(company_id, id).await?;
        self.vanish(found).await
    }

    async fn create(&self, activity: &Activity) -> Result<(), DomainError> {
        self.0.create(activity).await
    }

    async fn update(&self, activity: &Activity) -> Result<(), DomainError> {
        self.0.update(activity).await
    }

    async fn set_published(&self, id: &ActivityId, published: bool) -> Result<(), DomainError> {
        self.0.set_published(id, published).await
    }

    async fn delete(&self, id: &ActivityId) -> Result<(), DomainError> {
        self.0.delete(id).await
    }

    async fn list_published(&self, filter: &ActivityFilter) -> Result<Vec<Activity>, DomainError> {
        self.0.list_published(filter).await
    }

    async fn list_published_by_ids(&self, ids: &[ActivityId]) -> Result<Vec<Activity>, DomainError> {
        self.0.list_published_by_ids(ids).await
    }

    async fn list_by_company(&self, company_id: &CompanyId) -> Result<Vec<Activity>, DomainError> {
        self.0.list_by_company(company_id).await
    }
}

impl World {
    /// Lifecycle access and repository over [`VanishingActivities`].
    pub fn racing_delete(&self) -> (ActivityAccess, Arc<dyn ActivityRepository>) {
        let activities: Arc<dyn ActivityRepository> =
            Arc::new(VanishingActivities(self.activities.clone()));
        (
            ActivityAccess::new(self.companies.clone(), activities.clone()),
            activities,
        )
    }
}
