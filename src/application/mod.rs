//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::activity::{
    ActivityAccess, CreateActivityCommand, CreateActivityHandler, DeleteActivityCommand,
    DeleteActivityHandler, GetActivityHandler, GetActivityQuery, ListActivitiesHandler,
    ListActivitiesQuery, ListCompanyActivitiesHandler, ListCompanyActivitiesQuery,
    SetPublishedCommand, SetPublishedHandler, UpdateActivityCommand, UpdateActivityHandler,
};
pub use handlers::company::{
    CheckEntitlementHandler, CheckEntitlementQuery, CheckEntitlementResult, GrantTrialCommand,
    GrantTrialHandler, HandleBillingWebhookCommand, HandleBillingWebhookHandler, WebhookOutcome,
};
pub use handlers::engagement::{
    ListFavoritesHandler, ListFavoritesQuery, RecordClickCommand, RecordClickHandler,
    ToggleFavoriteCommand, ToggleFavoriteHandler, ToggleFavoriteResult,
};
