//! Axum router configuration for listing endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{
    create_activity, delete_activity, get_activity, list_activities, list_company_activities,
    set_published, update_activity, ActivityAppState,
};

/// Create the listing API router.
///
/// # Routes
///
/// ## Public
/// - `GET /api/activities` - Published listings, filterable by `category`, `city`
/// - `GET /api/activities/:id` - Single listing (drafts only for owner/admin)
///
/// ## Company / Admin
/// - `POST /api/activities` - Create a listing
/// - `PUT /api/activities/:id` - Replace a listing
/// - `PATCH /api/activities/:id/publish` - Publish or unpublish
/// - `DELETE /api/activities/:id` - Delete a listing
/// - `GET /api/company/activities` - The caller's own listings
pub fn activity_routes() -> Router<ActivityAppState> {
    Router::new()
        .route("/api/activities", get(list_activities).post(create_activity))
        .route(
            "/api/activities/:id",
            get(get_activity).put(update_activity).delete(delete_activity),
        )
        .route("/api/activities/:id/publish", patch(set_published))
        .route("/api/company/activities", get(list_company_activities))
}
