//! HTTP handlers for company and admin endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::{internal_error, ErrorResponse};
use crate::adapters::http::extract::IdPath;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::company::{
    CheckEntitlementHandler, CheckEntitlementQuery, GrantTrialCommand, GrantTrialHandler,
};
use crate::domain::company::CompanyError;
use crate::domain::foundation::CompanyId;
use crate::ports::CompanyRepository;

use super::dto::{CompanyResponse, EntitlementResponse, GrantTrialRequest};

/// Dependencies of the company endpoints.
#[derive(Clone)]
pub struct CompanyAppState {
    pub companies: Arc<dyn CompanyRepository>,
    /// Trial length used when an admin grant omits `days`.
    pub default_trial_days: i64,
}

impl CompanyAppState {
    pub fn check_entitlement_handler(&self) -> CheckEntitlementHandler {
        CheckEntitlementHandler::new(self.companies.clone())
    }

    pub fn grant_trial_handler(&self) -> GrantTrialHandler {
        GrantTrialHandler::new(self.companies.clone(), self.default_trial_days)
    }
}

/// GET /api/company/entitlement - Entitlement of the caller's company
pub async fn get_entitlement(
    State(state): State<CompanyAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, CompanyApiError> {
    let query = CheckEntitlementQuery {
        session: Some(user),
    };

    let result = state.check_entitlement_handler().handle(query).await?;

    Ok(Json(EntitlementResponse::from(result)))
}

/// POST /api/admin/companies/:id/trial - Grant a trial period (admin only)
pub async fn grant_trial(
    State(state): State<CompanyAppState>,
    RequireAuth(user): RequireAuth,
    IdPath(company_id): IdPath<CompanyId>,
    request: Option<Json<GrantTrialRequest>>,
) -> Result<impl IntoResponse, CompanyApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let cmd = GrantTrialCommand {
        session: Some(user),
        company_id,
        days: request.days,
    };

    let company = state.grant_trial_handler().handle(cmd).await?;

    Ok(Json(CompanyResponse::from(company)))
}

/// API error type that converts company errors to HTTP responses.
#[derive(Debug)]
pub struct CompanyApiError(CompanyError);

impl From<CompanyError> for CompanyApiError {
    fn from(err: CompanyError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CompanyApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match &err {
            CompanyError::Unauthenticated => StatusCode::UNAUTHORIZED,
            CompanyError::Unauthorized => StatusCode::FORBIDDEN,
            CompanyError::NotFound(_) | CompanyError::NotFoundForUser(_) => StatusCode::NOT_FOUND,
            CompanyError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            CompanyError::Infrastructure(detail) => return internal_error("company", detail),
        };

        let mut body = ErrorResponse::new(err.code(), err.message());
        if let CompanyError::ValidationFailed { field, .. } = &err {
            body = body.with_details(serde_json::json!({ "field": field }));
        }
        body.into_response_with(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (CompanyError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (CompanyError::Unauthorized, StatusCode::FORBIDDEN),
            (CompanyError::not_found(CompanyId::new()), StatusCode::NOT_FOUND),
            (CompanyError::validation("days", "too long"), StatusCode::BAD_REQUEST),
            (
                CompanyError::infrastructure("disk full"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(CompanyApiError(err).into_response().status(), expected);
        }
    }
}
