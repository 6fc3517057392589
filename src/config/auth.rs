//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Shortest signing secret accepted in production, in bytes.
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Authentication configuration (HS256 access tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 signing secret
    pub jwt_secret: String,

    /// Expected `iss` claim
    pub jwt_issuer: String,

    /// Expected `aud` claim
    #[serde(default = "default_audience")]
    pub jwt_audience: String,

    /// Clock skew tolerated on `exp`, in seconds
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// In production, requires an HTTPS issuer and a long secret.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_SECRET"));
        }
        if self.jwt_issuer.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_ISSUER"));
        }
        if self.jwt_audience.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_AUDIENCE"));
        }

        if *environment == Environment::Production {
            if !self.jwt_issuer.starts_with("https://") {
                return Err(ValidationError::AuthorityMustBeHttps);
            }
            if self.jwt_secret.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(ValidationError::WeakJwtSecret(MIN_PRODUCTION_SECRET_LEN));
            }
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_issuer: String::new(),
            jwt_audience: default_audience(),
            leeway_secs: default_leeway(),
        }
    }
}

fn default_audience() -> String {
    "activity-hub-api".to_string()
}

fn default_leeway() -> u64 {
    30
}
