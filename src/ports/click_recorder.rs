//! Click recording port.
//!
//! A single best-effort insert; there is no read side in this service.

use crate::domain::engagement::ActivityClick;
use crate::domain::foundation::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait ClickRecorder: Send + Sync {
    async fn record(&self, click: &ActivityClick) -> Result<(), DomainError>;
}
