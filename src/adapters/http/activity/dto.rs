//! HTTP DTOs for listing endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::activity::Activity;
use crate::domain::foundation::{ActivityId, CompanyId, Timestamp};

/// Request to publish or unpublish a listing.
#[derive(Debug, Clone, Deserialize)]
pub struct SetPublishedRequest {
    pub published: bool,
}

/// A listing as returned to clients.
///
/// `price` is in currency units; `price_cents` is the stored exact amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub id: ActivityId,
    pub company_id: CompanyId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub age_min: i32,
    pub age_max: i32,
    pub price: f64,
    pub price_cents: i64,
    pub address: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub images: Vec<String>,
    pub published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        let published = activity.is_published();
        let d = activity.details;
        Self {
            id: activity.id,
            company_id: activity.company_id,
            title: d.title,
            description: d.description,
            category: d.category,
            age_min: d.age_min,
            age_max: d.age_max,
            price: d.price_cents as f64 / 100.0,
            price_cents: d.price_cents,
            address: d.address,
            city: d.city,
            province: d.province,
            postal_code: d.postal_code,
            latitude: d.latitude,
            longitude: d.longitude,
            images: d.images,
            published,
            created_at: activity.created_at,
            updated_at: activity.updated_at,
        }
    }
}

/// Page of listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityListResponse {
    pub activities: Vec<ActivityResponse>,
    pub count: usize,
}

impl From<Vec<Activity>> for ActivityListResponse {
    fn from(activities: Vec<Activity>) -> Self {
        let activities: Vec<ActivityResponse> =
            activities.into_iter().map(ActivityResponse::from).collect();
        Self {
            count: activities.len(),
            activities,
        }
    }
}
