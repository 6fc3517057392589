//! HTTP adapter for favorites and click tracking.
//!
//! - `POST /api/activities/:id/favorite` - Toggle a favorite (parents)
//! - `GET /api/favorites` - The caller's favorite listings (parents)
//! - `POST /api/activities/:id/click` - Record a listing click (anyone)

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::adapters::http::activity::ActivityListResponse;
use crate::adapters::http::error::{internal_error, ErrorResponse};
use crate::adapters::http::extract::IdPath;
use crate::adapters::http::middleware::{OptionalAuth, RequireAuth};
use crate::application::handlers::engagement::{
    ListFavoritesHandler, ListFavoritesQuery, RecordClickCommand, RecordClickHandler,
    ToggleFavoriteCommand, ToggleFavoriteHandler, ToggleFavoriteResult,
};
use crate::domain::engagement::EngagementError;
use crate::domain::foundation::ActivityId;
use crate::ports::{ActivityRepository, ClickRecorder, FavoriteRepository};

/// Dependencies of the engagement endpoints.
#[derive(Clone)]
pub struct EngagementAppState {
    pub activities: Arc<dyn ActivityRepository>,
    pub favorites: Arc<dyn FavoriteRepository>,
    pub clicks: Arc<dyn ClickRecorder>,
}

impl EngagementAppState {
    pub fn toggle_favorite_handler(&self) -> ToggleFavoriteHandler {
        ToggleFavoriteHandler::new(self.activities.clone(), self.favorites.clone())
    }

    pub fn list_favorites_handler(&self) -> ListFavoritesHandler {
        ListFavoritesHandler::new(self.activities.clone(), self.favorites.clone())
    }

    pub fn record_click_handler(&self) -> RecordClickHandler {
        RecordClickHandler::new(self.activities.clone(), self.clicks.clone())
    }
}

/// Favorite state after a toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteResponse {
    pub activity_id: ActivityId,
    pub favorited: bool,
}

impl From<ToggleFavoriteResult> for FavoriteResponse {
    fn from(result: ToggleFavoriteResult) -> Self {
        Self {
            activity_id: result.activity_id,
            favorited: result.favorited,
        }
    }
}

/// POST /api/activities/:id/favorite
pub async fn toggle_favorite(
    State(state): State<EngagementAppState>,
    RequireAuth(user): RequireAuth,
    IdPath(activity_id): IdPath<ActivityId>,
) -> Result<impl IntoResponse, EngagementApiError> {
    let cmd = ToggleFavoriteCommand {
        session: Some(user),
        activity_id,
    };

    let result = state.toggle_favorite_handler().handle(cmd).await?;

    Ok(Json(FavoriteResponse::from(result)))
}

/// GET /api/favorites
pub async fn list_favorites(
    State(state): State<EngagementAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, EngagementApiError> {
    let query = ListFavoritesQuery {
        session: Some(user),
    };

    let activities = state.list_favorites_handler().handle(query).await?;

    Ok(Json(ActivityListResponse::from(activities)))
}

/// POST /api/activities/:id/click
pub async fn record_click(
    State(state): State<EngagementAppState>,
    OptionalAuth(session): OptionalAuth,
    IdPath(activity_id): IdPath<ActivityId>,
) -> Result<impl IntoResponse, EngagementApiError> {
    let cmd = RecordClickCommand {
        session,
        activity_id,
    };

    state.record_click_handler().handle(cmd).await?;

    Ok(StatusCode::ACCEPTED)
}

/// Create the engagement router.
pub fn engagement_routes() -> Router<EngagementAppState> {
    Router::new()
        .route("/api/activities/:id/favorite", post(toggle_favorite))
        .route("/api/activities/:id/click", post(record_click))
        .route("/api/favorites", get(list_favorites))
}

/// API error type that converts engagement errors to HTTP responses.
#[derive(Debug)]
pub struct EngagementApiError(EngagementError);

impl From<EngagementError> for EngagementApiError {
    fn from(err: EngagementError) -> Self {
        Self(err)
    }
}

impl IntoResponse for EngagementApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match &err {
            EngagementError::Unauthenticated => StatusCode::UNAUTHORIZED,
            EngagementError::Unauthorized => StatusCode::FORBIDDEN,
            EngagementError::ActivityNotFound(_) => StatusCode::NOT_FOUND,
            EngagementError::Infrastructure(detail) => {
                return internal_error("engagement", detail)
            }
        };
        ErrorResponse::new(err.code(), err.message()).into_response_with(status)
    }
}
