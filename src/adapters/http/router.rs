//! Top-level router: merges the module routers and applies the shared layers.
//!
//! Layers, outermost first:
//!
//! 1. `SetRequestIdLayer` - assigns `x-request-id` when the client sent none
//! 2. `TraceLayer` - one span per request, tagged with the request id
//! 3. `PropagateRequestIdLayer` - echoes `x-request-id` on the response
//! 4. `CorsLayer`
//! 5. `TimeoutLayer` - `server.request_timeout_secs`
//! 6. `auth_middleware` - resolves the Bearer token into a session

use std::sync::Arc;

use axum::extract::Request;
use axum::http::{header, HeaderValue, Method};
use axum::{middleware, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ServerConfig;
use crate::domain::billing::StripeWebhookVerifier;
use crate::ports::{
    ActivityRepository, ClickRecorder, CompanyRepository, FavoriteRepository, SessionValidator,
};

use super::activity::{activity_routes, ActivityAppState};
use super::billing::{billing_routes, BillingAppState};
use super::company::{company_routes, CompanyAppState};
use super::engagement::{engagement_routes, EngagementAppState};
use super::health::health_routes;
use super::middleware::auth_middleware;

/// Everything the HTTP layer needs, already constructed.
#[derive(Clone)]
pub struct Dependencies {
    pub companies: Arc<dyn CompanyRepository>,
    pub activities: Arc<dyn ActivityRepository>,
    pub favorites: Arc<dyn FavoriteRepository>,
    pub clicks: Arc<dyn ClickRecorder>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub webhook_verifier: Arc<StripeWebhookVerifier>,
    pub default_trial_days: i64,
}

/// Builds the complete application router.
pub fn build_router(deps: Dependencies, config: &ServerConfig) -> Router {
    let activity_state = ActivityAppState {
        companies: deps.companies.clone(),
        activities: deps.activities.clone(),
    };
    let company_state = CompanyAppState {
        companies: deps.companies.clone(),
        default_trial_days: deps.default_trial_days,
    };
    let engagement_state = EngagementAppState {
        activities: deps.activities.clone(),
        favorites: deps.favorites,
        clicks: deps.clicks,
    };
    let billing_state = BillingAppState {
        verifier: deps.webhook_verifier,
        companies: deps.companies,
    };

    Router::new()
        .merge(health_routes())
        .merge(activity_routes().with_state(activity_state))
        .merge(company_routes().with_state(company_state))
        .merge(engagement_routes().with_state(engagement_state))
        .merge(billing_routes().with_state(billing_state))
        .layer(middleware::from_fn_with_state(
            deps.session_validator,
            auth_middleware,
        ))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(cors_layer(config))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id,
                )
            }),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// CORS from `server.allowed_origins`.
///
/// Without configured origins, development allows any origin and production
/// allows none.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        if config.is_production() {
            return CorsLayer::new();
        }
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
