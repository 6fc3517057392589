//! Parent engagement handlers: favorites and click tracking.

mod list_favorites;
mod record_click;
mod toggle_favorite;

pub use list_favorites::{ListFavoritesHandler, ListFavoritesQuery};
pub use record_click::{RecordClickCommand, RecordClickHandler};
pub use toggle_favorite::{ToggleFavoriteCommand, ToggleFavoriteHandler, ToggleFavoriteResult};
