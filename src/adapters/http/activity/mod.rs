//! HTTP adapter for listing endpoints.
//!
//! - `GET /api/activities` - Public catalogue
//! - `GET /api/activities/:id` - Single listing
//! - `POST /api/activities` - Create a listing
//! - `PUT /api/activities/:id` - Replace a listing
//! - `PATCH /api/activities/:id/publish` - Publish or unpublish
//! - `DELETE /api/activities/:id` - Delete a listing
//! - `GET /api/company/activities` - The caller's own listings

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ActivityListResponse, ActivityResponse, SetPublishedRequest};
pub use handlers::{ActivityApiError, ActivityAppState};
pub use routes::activity_routes;
