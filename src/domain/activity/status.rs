//! Publication status of a listing.

use serde::{Deserialize, Serialize};

/// Whether a listing is visible in the public catalogue.
///
/// ```text
/// Draft <──> Published
/// ```
///
/// Re-applying the current status is an accepted no-op, so publish and
/// unpublish requests are idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    #[default]
    Draft,
    Published,
}

impl PublicationStatus {
    /// Maps the wire-level `published` flag to a status.
    pub fn from_published(published: bool) -> Self {
        if published {
            PublicationStatus::Published
        } else {
            PublicationStatus::Draft
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, PublicationStatus::Published)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationStatus::Draft => "draft",
            PublicationStatus::Published => "published",
        }
    }
}
