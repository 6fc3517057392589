//! HTTP listener settings for the marketplace API.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

/// Longest request deadline accepted. Webhook senders give up well before.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Listener, logging and browser-access settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the API binds to, e.g. `0.0.0.0:8080`.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    #[serde(default)]
    pub environment: Environment,

    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Comma-separated origins of the web front-ends allowed to call the API.
    #[serde(default)]
    pub allowed_origins: String,
}

/// Deployment flavour. Production switches to JSON logs and stricter checks.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl ServerConfig {
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured front-end origins, blanks skipped.
    pub fn allowed_origins(&self) -> Vec<&str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .collect()
    }

    /// Production must name its front-end origins; development falls back to
    /// permissive CORS.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.listen_addr.port() == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.is_production() && self.allowed_origins().is_empty() {
            return Err(ValidationError::MissingRequired("SERVER__ALLOWED_ORIGINS"));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            environment: Environment::default(),
            log_filter: default_log_filter(),
            request_timeout_secs: default_request_timeout_secs(),
            allowed_origins: String::new(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_log_filter() -> String {
    "info,activity_hub=debug,sqlx=warn".to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}
