//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `ActivityRepository` - Listings, with the company-scoped `find_owned`
//! - `CompanyRepository` - Companies and their subscription snapshot
//! - `FavoriteRepository` - Parent favorites
//! - `ClickRecorder` - Best-effort click analytics
//!
//! ## Identity Ports
//!
//! - `SessionValidator` - Bearer token validation

mod activity_repository;
mod click_recorder;
mod company_repository;
mod favorite_repository;
mod session_validator;

pub use activity_repository::ActivityRepository;
pub use click_recorder::ClickRecorder;
pub use company_repository::CompanyRepository;
pub use favorite_repository::FavoriteRepository;
pub use session_validator::SessionValidator;
