//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe API key, for tooling that talks to Stripe directly
    #[serde(default)]
    pub stripe_api_key: Option<String>,

    /// Stripe webhook signing secret
    pub stripe_webhook_secret: String,

    /// Length of an admin-granted trial when the request names none
    #[serde(default = "default_trial_days")]
    pub default_trial_days: i64,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key
            .as_deref()
            .is_some_and(|key| key.starts_with("sk_test_"))
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
        }
        if !self.stripe_webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }
        if let Some(key) = &self.stripe_api_key {
            if !key.starts_with("sk_") && !key.starts_with("rk_") {
                return Err(ValidationError::InvalidStripeKey);
            }
        }
        if !(1..=365).contains(&self.default_trial_days) {
            return Err(ValidationError::InvalidTrialDays(self.default_trial_days));
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_api_key: None,
            stripe_webhook_secret: String::new(),
            default_trial_days: default_trial_days(),
        }
    }
}

fn default_trial_days() -> i64 {
    14
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> PaymentConfig {
        PaymentConfig {
            stripe_webhook_secret: "whsec_xyz789".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = PaymentConfig::default();
        assert_eq!(config.default_trial_days, 14);
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_is_test_mode() {
        let config = PaymentConfig {
            stripe_api_key: Some("sk_test_xxx".to_string()),
            ..valid()
        };
        assert!(config.is_test_mode());
    }

    #[test]
    fn test_validation_missing_webhook_secret() {
        assert!(PaymentConfig::default().validate().is_err());
    }

    #[test]
    fn test_validation_invalid_webhook_secret_prefix() {
        let config = PaymentConfig {
            stripe_webhook_secret: "secret_xxx".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_api_key_prefix() {
        let config = PaymentConfig {
            stripe_api_key: Some("pk_test_xxx".to_string()),
            ..valid()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_trial_days_bounds() {
        for days in [0, 366] {
            let config = PaymentConfig {
                default_trial_days: days,
                ..valid()
            };
            assert!(matches!(
                config.validate(),
                Err(ValidationError::InvalidTrialDays(_))
            ));
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid().validate().is_ok());
    }
}
