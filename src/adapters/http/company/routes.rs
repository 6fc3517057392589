//! Axum router configuration for company and admin endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_entitlement, grant_trial, CompanyAppState};

/// Create the company API router.
///
/// # Routes
/// - `GET /api/company/entitlement` - Entitlement of the caller's company
/// - `POST /api/admin/companies/:id/trial` - Grant a trial (admin only)
pub fn company_routes() -> Router<CompanyAppState> {
    Router::new()
        .route("/api/company/entitlement", get(get_entitlement))
        .route("/api/admin/companies/:id/trial", post(grant_trial))
}
