//! Activity domain module.
//!
//! Listings, their content rules and publication lifecycle.
//!
//! # Module Structure
//!
//! - `aggregate` - Activity aggregate entity
//! - `fields` - Draft normalization and validated content
//! - `status` - PublicationStatus (draft or published)
//! - `filter` - Public catalogue filter
//! - `errors` - Lifecycle errors

mod aggregate;
mod errors;
mod fields;
mod filter;
mod status;

pub use aggregate::Activity;
pub use errors::ActivityError;
pub use fields::{ActivityDraft, ActivityFields, NumericInput, MAX_AGE, MIN_AGE};
pub use filter::{ActivityFilter, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use status::PublicationStatus;
