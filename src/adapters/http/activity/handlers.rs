//! HTTP handlers for listing endpoints.
//!
//! These handlers connect Axum routes to the listing lifecycle handlers.
//! Session extraction is optional here; the application layer decides when a
//! session is required, so every gate lives in one place.

use std::sync::Arc;

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::{internal_error, ErrorResponse};
use crate::adapters::http::extract::{BodyRejection, IdPath, JsonBody};
use crate::adapters::http::middleware::OptionalAuth;
use crate::application::handlers::activity::{
    ActivityAccess, CreateActivityCommand, CreateActivityHandler, DeleteActivityCommand,
    DeleteActivityHandler, GetActivityHandler, GetActivityQuery, ListActivitiesHandler,
    ListActivitiesQuery, ListCompanyActivitiesHandler, ListCompanyActivitiesQuery,
    SetPublishedCommand, SetPublishedHandler, UpdateActivityCommand, UpdateActivityHandler,
};
use crate::domain::activity::{ActivityDraft, ActivityError, ActivityFilter};
use crate::domain::foundation::{ActivityId, AuthenticatedUser};
use crate::ports::{ActivityRepository, CompanyRepository};

use super::dto::{ActivityListResponse, ActivityResponse, SetPublishedRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Dependencies of the listing endpoints.
#[derive(Clone)]
pub struct ActivityAppState {
    pub companies: Arc<dyn CompanyRepository>,
    pub activities: Arc<dyn ActivityRepository>,
}

impl ActivityAppState {
    fn access(&self) -> ActivityAccess {
        ActivityAccess::new(self.companies.clone(), self.activities.clone())
    }

    pub fn list_activities_handler(&self) -> ListActivitiesHandler {
        ListActivitiesHandler::new(self.activities.clone())
    }

    pub fn get_activity_handler(&self) -> GetActivityHandler {
        GetActivityHandler::new(self.access(), self.activities.clone())
    }

    pub fn list_company_activities_handler(&self) -> ListCompanyActivitiesHandler {
        ListCompanyActivitiesHandler::new(self.access(), self.activities.clone())
    }

    pub fn create_activity_handler(&self) -> CreateActivityHandler {
        CreateActivityHandler::new(self.access(), self.activities.clone())
    }

    pub fn update_activity_handler(&self) -> UpdateActivityHandler {
        UpdateActivityHandler::new(self.access(), self.activities.clone())
    }

    pub fn set_published_handler(&self) -> SetPublishedHandler {
        SetPublishedHandler::new(self.access(), self.activities.clone())
    }

    pub fn delete_activity_handler(&self) -> DeleteActivityHandler {
        DeleteActivityHandler::new(self.access(), self.activities.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/activities - Public catalogue of published listings
pub async fn list_activities(
    State(state): State<ActivityAppState>,
    Query(filter): Query<ActivityFilter>,
) -> Result<impl IntoResponse, ActivityApiError> {
    let result = state
        .list_activities_handler()
        .handle(ListActivitiesQuery { filter })
        .await?;

    Ok(Json(ActivityListResponse::from(result)))
}

/// GET /api/activities/:id - Single listing
pub async fn get_activity(
    State(state): State<ActivityAppState>,
    OptionalAuth(viewer): OptionalAuth,
    IdPath(activity_id): IdPath<ActivityId>,
) -> Result<impl IntoResponse, ActivityApiError> {
    let query = GetActivityQuery {
        viewer,
        activity_id,
    };

    let activity = state.get_activity_handler().handle(query).await?;

    Ok(Json(ActivityResponse::from(activity)))
}

/// GET /api/company/activities - All listings of the caller's company
pub async fn list_company_activities(
    State(state): State<ActivityAppState>,
    OptionalAuth(session): OptionalAuth,
) -> Result<impl IntoResponse, ActivityApiError> {
    let result = state
        .list_company_activities_handler()
        .handle(ListCompanyActivitiesQuery { session })
        .await?;

    Ok(Json(ActivityListResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/activities - Create a listing
pub async fn create_activity(
    State(state): State<ActivityAppState>,
    OptionalAuth(session): OptionalAuth,
    body: Result<JsonBody<ActivityDraft>, BodyRejection>,
) -> Result<impl IntoResponse, ActivityApiError> {
    let draft = read_body(&session, body)?;
    let cmd = CreateActivityCommand { session, draft };

    let activity = state.create_activity_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(ActivityResponse::from(activity))))
}

/// PUT /api/activities/:id - Replace a listing's content
pub async fn update_activity(
    State(state): State<ActivityAppState>,
    OptionalAuth(session): OptionalAuth,
    IdPath(activity_id): IdPath<ActivityId>,
    body: Result<JsonBody<ActivityDraft>, BodyRejection>,
) -> Result<impl IntoResponse, ActivityApiError> {
    let draft = read_body(&session, body)?;
    let cmd = UpdateActivityCommand {
        session,
        activity_id,
        draft,
    };

    let activity = state.update_activity_handler().handle(cmd).await?;

    Ok(Json(ActivityResponse::from(activity)))
}

/// PATCH /api/activities/:id/publish - Publish or unpublish
pub async fn set_published(
    State(state): State<ActivityAppState>,
    OptionalAuth(session): OptionalAuth,
    IdPath(activity_id): IdPath<ActivityId>,
    body: Result<JsonBody<SetPublishedRequest>, BodyRejection>,
) -> Result<impl IntoResponse, ActivityApiError> {
    let request = read_body(&session, body)?;
    let cmd = SetPublishedCommand {
        session,
        activity_id,
        published: request.published,
    };

    let activity = state.set_published_handler().handle(cmd).await?;

    Ok(Json(ActivityResponse::from(activity)))
}

/// DELETE /api/activities/:id - Delete a listing
pub async fn delete_activity(
    State(state): State<ActivityAppState>,
    OptionalAuth(session): OptionalAuth,
    IdPath(activity_id): IdPath<ActivityId>,
) -> Result<impl IntoResponse, ActivityApiError> {
    let cmd = DeleteActivityCommand {
        session,
        activity_id,
    };

    state.delete_activity_handler().handle(cmd).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Unwraps a mutation body once a session is known to be present, so an
/// anonymous caller gets 401 whatever it sent.
fn read_body<T>(
    session: &Option<AuthenticatedUser>,
    body: Result<JsonBody<T>, BodyRejection>,
) -> Result<T, ActivityError> {
    if session.is_none() {
        return Err(ActivityError::Unauthenticated);
    }
    body.map(|JsonBody(value)| value)
        .map_err(|rejection| ActivityError::validation("body", rejection.message()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts lifecycle errors to HTTP responses.
#[derive(Debug)]
pub struct ActivityApiError(ActivityError);

impl From<ActivityError> for ActivityApiError {
    fn from(err: ActivityError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ActivityApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match &err {
            ActivityError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ActivityError::Unauthorized | ActivityError::Forbidden(_) => StatusCode::FORBIDDEN,
            ActivityError::NotFound(_) | ActivityError::CompanyNotFound => StatusCode::NOT_FOUND,
            ActivityError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            ActivityError::Infrastructure(detail) => {
                return internal_error("activity", detail);
            }
        };

        let mut body = ErrorResponse::new(err.code(), err.message());
        match &err {
            ActivityError::Forbidden(reason) => {
                body = body.with_details(serde_json::json!({ "reason": reason.as_str() }));
            }
            ActivityError::ValidationFailed { field, .. } => {
                body = body.with_details(serde_json::json!({ "field": field }));
            }
            _ => {}
        }
        body.into_response_with(status)
    }
}
