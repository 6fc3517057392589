//! HS256 JWT adapter for session validation.
//!
//! Validates access tokens signed with the identity service's shared secret:
//!
//! 1. Verifying the HMAC-SHA256 signature
//! 2. Validating issuer, audience and expiry claims
//! 3. Mapping claims, including the marketplace role, to `AuthenticatedUser`
//!
//! # Example
//!
//! ```ignore
//! use activity_hub::adapters::auth::{JwtConfig, JwtSessionValidator};
//!
//! let validator = JwtSessionValidator::new(JwtConfig::new(
//!     secret,
//!     "https://auth.activityhub.example",
//!     "activity-hub-api",
//! ));
//! let user = validator.validate("eyJ...").await?;
//! ```

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, TokenData, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, Role, UserId};
use crate::ports::SessionValidator;

/// Configuration for the JWT adapter.
pub struct JwtConfig {
    /// Shared HS256 signing secret.
    pub secret: SecretString,

    /// Expected `iss` claim.
    pub issuer: String,

    /// Expected `aud` claim.
    pub audience: String,

    /// Allowed clock skew in seconds when checking `exp`.
    pub leeway_secs: u64,
}

impl JwtConfig {
    pub fn new(
        secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
            issuer: issuer.into(),
            audience: audience.into(),
            leeway_secs: 30,
        }
    }

    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }
}

/// Claims carried by marketplace access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject - the user ID
    pub sub: String,

    pub iss: String,

    /// Audience - array or single string
    #[serde(default)]
    pub aud: Audience,

    /// Expiry timestamp (Unix epoch seconds)
    pub exp: i64,

    #[serde(default)]
    pub iat: Option<i64>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// Marketplace role: `PARENT`, `COMPANY` or `ADMIN`.
    #[serde(default)]
    pub role: Option<String>,
}

/// Audience can be a single string or array of strings in JWTs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    #[default]
    None,
    Single(String),
    Multiple(Vec<String>),
}

/// Session validator for HS256 access tokens.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.leeway = config.leeway_secs;
        validation.validate_exp = true;

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.expose_secret().as_bytes()),
            validation,
        }
    }

    fn decode_claims(&self, token: &str) -> Result<TokenData<AccessClaims>, AuthError> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Invalid issuer in token");
                    AuthError::InvalidToken
                }
                ErrorKind::InvalidAudience => {
                    tracing::warn!("Invalid audience in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.decode_claims(token)?.claims;

        let role_claim = claims.role.unwrap_or_default();
        let role: Role = role_claim.parse().map_err(|_| {
            tracing::warn!(role = %role_claim, "Token carries unknown role");
            AuthError::InvalidRole(role_claim.clone())
        })?;

        let email = claims.email.ok_or_else(|| {
            tracing::warn!("Token missing email claim");
            AuthError::InvalidToken
        })?;

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", claims.sub);
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(user_id, email, claims.name, role))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("iss", &self.validation.iss)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-signing-secret";
    const ISSUER: &str = "https://auth.activityhub.example";
    const AUDIENCE: &str = "activity-hub-api";

    fn validator() -> JwtSessionValidator {
        JwtSessionValidator::new(JwtConfig::new(SECRET, ISSUER, AUDIENCE).with_leeway(0))
    }

    fn claims(role: Option<&str>, exp_offset: i64) -> AccessClaims {
        AccessClaims {
            sub: "user-42".to_string(),
            iss: ISSUER.to_string(),
            aud: Audience::Single(AUDIENCE.to_string()),
            exp: chrono::Utc::now().timestamp() + exp_offset,
            iat: None,
            email: Some("owner@chessclub.example".to_string()),
            name: Some("Chess Club".to_string()),
            role: role.map(str::to_string),
        }
    }

    fn sign(claims: &AccessClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn valid_token_maps_to_user_with_role() {
        let token = sign(&claims(Some("COMPANY"), 3600), SECRET);

        let user = validator().validate(&token).await.unwrap();

        assert_eq!(user.id.as_str(), "user-42");
        assert_eq!(user.email, "owner@chessclub.example");
        assert_eq!(user.display_name.as_deref(), Some("Chess Club"));
        assert_eq!(user.role, Role::Company);
    }

    #[tokio::test]
    async fn audience_array_is_accepted() {
        let mut c = claims(Some("parent"), 3600);
        c.aud = Audience::Multiple(vec!["other".to_string(), AUDIENCE.to_string()]);

        let user = validator().validate(&sign(&c, SECRET)).await.unwrap();

        assert_eq!(user.role, Role::Parent);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let token = sign(&claims(Some("ADMIN"), -3600), SECRET);

        let err = validator().validate(&token).await.unwrap_err();

        assert_eq!(err, AuthError::TokenExpired);
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let token = sign(&claims(Some("ADMIN"), 3600), "another-secret");

        let err = validator().validate(&token).await.unwrap_err();

        assert_eq!(err, AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn wrong_issuer_is_rejected() {
        let mut c = claims(Some("ADMIN"), 3600);
        c.iss = "https://evil.example".to_string();

        let err = validator().validate(&sign(&c, SECRET)).await.unwrap_err();

        assert_eq!(err, AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn missing_role_is_rejected() {
        let token = sign(&claims(None, 3600), SECRET);

        let err = validator().validate(&token).await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidRole(_)));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let err = validator().validate("not-a-jwt").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }
}
