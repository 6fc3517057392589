//! In-memory click recorder.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::engagement::ActivityClick;
use crate::domain::foundation::DomainError;
use crate::ports::ClickRecorder;

use super::lock;

/// In-memory implementation of the ClickRecorder port.
#[derive(Default)]
pub struct InMemoryClickRecorder {
    clicks: Mutex<Vec<ActivityClick>>,
}

impl InMemoryClickRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded clicks.
    pub fn clicks(&self) -> Vec<ActivityClick> {
        self.clicks.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ClickRecorder for InMemoryClickRecorder {
    async fn record(&self, click: &ActivityClick) -> Result<(), DomainError> {
        lock(&self.clicks)?.push(click.clone());
        Ok(())
    }
}
