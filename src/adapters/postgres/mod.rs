//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresActivityRepository` - Listings
//! - `PostgresCompanyRepository` - Companies and their subscription snapshot
//! - `PostgresFavoriteRepository` / `PostgresClickRecorder` - Parent engagement

mod activity_repository;
mod company_repository;
mod engagement_repository;

pub use activity_repository::PostgresActivityRepository;
pub use company_repository::PostgresCompanyRepository;
pub use engagement_repository::{PostgresClickRecorder, PostgresFavoriteRepository};
