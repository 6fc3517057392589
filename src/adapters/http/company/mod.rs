//! HTTP adapter for company and admin endpoints.
//!
//! - `GET /api/company/entitlement` - Entitlement of the caller's company
//! - `POST /api/admin/companies/:id/trial` - Grant a trial period

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{CompanyResponse, EntitlementResponse, GrantTrialRequest};
pub use handlers::{CompanyApiError, CompanyAppState};
pub use routes::company_routes;
