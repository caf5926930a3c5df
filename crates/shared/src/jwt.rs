//! JWT token generation and validation.
//!
//! Signature, expiry and scope are verified here without touching the store.
//! Revocation of refresh tokens is a store concern and lives elsewhere.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::auth::{Claims, TokenScope};
use crate::config::JwtConfig;
use crate::error::AppError;

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,

    /// Token was issued for a different purpose.
    #[error("expected {expected} token, got {found} token")]
    WrongScope {
        /// Scope the operation requires.
        expected: TokenScope,
        /// Scope carried by the token.
        found: TokenScope,
    },
}

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::EncodingError(msg) => Self::Internal(msg),
            JwtError::Expired => Self::Unauthorized("Token has expired".to_string()),
            JwtError::WrongScope { expected, .. } => {
                Self::Unauthorized(format!("A valid {expected} token is required"))
            }
            JwtError::DecodingError(_) => {
                Self::Unauthorized("Invalid or malformed token".to_string())
            }
        }
    }
}

/// JWT service for token operations.
#[derive(Clone)]
pub struct JwtService {
    client_key: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("client_key", &"[hidden]")
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Creates a new JWT service with the given configuration.
    #[must_use]
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            client_key: config.client_key.clone(),
            access_ttl: ttl(config.access_token_expiry_secs),
            refresh_ttl: ttl(config.refresh_token_expiry_secs),
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    /// Generates an access token for a user.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn generate_access_token(&self, username: &str) -> Result<String, JwtError> {
        let claims = Claims::access(username, &self.client_key, Utc::now() + self.access_ttl);
        self.sign(&claims)
    }

    /// Generates a refresh token for a user.
    ///
    /// Returns the raw token together with its claims so the caller can
    /// persist the identifier and expiry.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn generate_refresh_token(&self, username: &str) -> Result<(String, Claims), JwtError> {
        let claims = Claims::refresh(username, Utc::now() + self.refresh_ttl);
        let token = self.sign(&claims)?;
        Ok((token, claims))
    }

    fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates and decodes a token of any scope.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired.
    /// Returns `JwtError::DecodingError` if the token is malformed or forged.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::default();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }

    /// Validates a token and requires it to carry the given scope.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::WrongScope` when the token is valid but was issued
    /// for the other purpose, plus everything `validate_token` returns.
    pub fn validate_scoped(&self, token: &str, scope: TokenScope) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        if claims.typ == scope {
            Ok(claims)
        } else {
            Err(JwtError::WrongScope {
                expected: scope,
                found: claims.typ,
            })
        }
    }
}

fn ttl(secs: u64) -> Duration {
    Duration::try_seconds(i64::try_from(secs).unwrap_or(i64::MAX)).unwrap_or(Duration::MAX)
}
