//! JWT Token handling

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Session token lifetime in hours
    pub expiration_hours: i64,
    /// Password reset token lifetime in minutes
    pub reset_expiration_minutes: i64,
    /// Issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::from(&SecurityConfig::default())
    }
}

impl From<&SecurityConfig> for JwtConfig {
    fn from(cfg: &SecurityConfig) -> Self {
        Self {
            secret: cfg.jwt_secret.clone(),
            expiration_hours: cfg.jwt_expiration_hours,
            reset_expiration_minutes: cfg.reset_token_minutes,
            issuer: "music-catalog".to_string(),
        }
    }
}

/// What a token may be used for. A reset token never authenticates a request
/// and a session token never resets a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    Session,
    PasswordReset,
}

/// JWT TokenClaims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    pub purpose: TokenPurpose,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    pub fn new(user_id: &str, purpose: TokenPurpose, ttl: Duration, config: &JwtConfig) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id.to_string(),
            purpose,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

fn sign(claims: &TokenClaims, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Create a session token for a user
pub fn create_session_token(
    user_id: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let ttl = Duration::hours(config.expiration_hours);
    sign(&TokenClaims::new(user_id, TokenPurpose::Session, ttl, config), config)
}

/// Create a short-lived password reset token for a user
pub fn create_reset_token(
    user_id: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let ttl = Duration::minutes(config.reset_expiration_minutes);
    sign(
        &TokenClaims::new(user_id, TokenPurpose::PasswordReset, ttl, config),
        config,
    )
}

/// Verify signature, issuer, expiry and purpose of a token
pub fn verify_token(
    token: &str,
    purpose: TokenPurpose,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    if token_data.claims.purpose != purpose {
        return Err(ErrorKind::InvalidToken.into());
    }

    Ok(token_data.claims)
}
