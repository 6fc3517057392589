//! Listing lifecycle handlers.
//!
//! ## Commands
//! - Create, update, publish/unpublish and delete listings
//!
//! ## Queries
//! - Public catalogue, single listing, a company's own listings

mod access;
mod create_activity;
mod delete_activity;
mod get_activity;
mod list_activities;
mod list_company_activities;
mod set_published;
mod update_activity;

#[cfg(test)]
pub(crate) mod test_support;

pub use access::{ActivityAccess, ListingManager};

// Commands
pub use create_activity::{CreateActivityCommand, CreateActivityHandler};
pub use delete_activity::{DeleteActivityCommand, DeleteActivityHandler};
pub use set_published::{SetPublishedCommand, SetPublishedHandler};
pub use update_activity::{UpdateActivityCommand, UpdateActivityHandler};

// Queries
pub use get_activity::{GetActivityHandler, GetActivityQuery};
pub use list_activities::{ListActivitiesHandler, ListActivitiesQuery};
pub use list_company_activities::{ListCompanyActivitiesHandler, ListCompanyActivitiesQuery};
