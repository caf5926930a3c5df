//! Authentication types for JWT and tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a token may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenScope {
    /// Short-lived, authorizes general API calls.
    Access,
    /// Long-lived, store-tracked, only mints new access tokens.
    Refresh,
}

impl std::fmt::Display for TokenScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access => write!(f, "access"),
            Self::Refresh => write!(f, "refresh"),
        }
    }
}

/// JWT claims shared by access and refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username).
    pub sub: String,
    /// Token scope.
    pub typ: TokenScope,
    /// Unique token identifier.
    pub jti: Uuid,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
    /// Username, repeated for downstream consumers (access tokens only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Opaque client key (access tokens only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Claims {
    /// Creates access-scoped claims carrying the extra identity claims.
    #[must_use]
    pub fn access(username: &str, client_key: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            username: Some(username.to_string()),
            key: Some(client_key.to_string()),
            ..Self::base(username, TokenScope::Access, expires_at)
        }
    }

    /// Creates refresh-scoped claims.
    #[must_use]
    pub fn refresh(username: &str, expires_at: DateTime<Utc>) -> Self {
        Self::base(username, TokenScope::Refresh, expires_at)
    }

    fn base(username: &str, typ: TokenScope, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: username.to_string(),
            typ,
            jti: Uuid::new_v4(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
            username: None,
            key: None,
        }
    }

    /// Returns the identity (username) the token was issued to.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.sub
    }

    /// Returns the expiry as a timestamp.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }
}

/// Token pair returned after successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access token (short-lived).
    pub access_token: String,
    /// Refresh token (long-lived).
    pub refresh_token: String,
}

/// Response of a successful refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    /// Newly minted access token.
    pub access_token: String,
}

/// Plain message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a new message response.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Login request payload.
///
/// Missing fields deserialize as empty strings so they are reported as
/// validation errors rather than body rejections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    /// Username.
    #[serde(default)]
    pub username: String,
    /// Plaintext password.
    #[serde(default)]
    pub password: String,
}

/// Registration request payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    #[serde(default)]
    pub username: String,
    /// Plaintext password.
    #[serde(default)]
    pub password: String,
}
