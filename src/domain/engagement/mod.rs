//! Engagement domain module.
//!
//! Parent favorites and listing click analytics.

mod click;
mod errors;
mod favorite;

pub use click::ActivityClick;
pub use errors::EngagementError;
pub use favorite::Favorite;
