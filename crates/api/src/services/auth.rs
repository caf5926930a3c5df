//! Token lifecycle: register, login, refresh, logout and account deletion.
//!
//! Signature, expiry and scope checks are stateless. Refresh tokens are
//! additionally checked against the store, and a token the store has never
//! seen is treated as revoked.

use std::sync::Arc;

use peachtree_core::auth::{hash_password, validate_credentials, verify_password};
use peachtree_db::{Store, StoreError};
use peachtree_shared::{AppError, AppResult, JwtService, TokenPair, TokenScope};
use tracing::{info, warn};

/// Token authority over the credential store.
#[derive(Debug, Clone)]
pub struct AuthService {
    store: Store,
    jwt: Arc<JwtService>,
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".to_string())
}

fn username_taken() -> AppError {
    AppError::Conflict("Username already exists".to_string())
}

impl AuthService {
    /// Creates a new auth service.
    #[must_use]
    pub const fn new(store: Store, jwt: Arc<JwtService>) -> Self {
        Self { store, jwt }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the username is taken
    /// - `Validation` if either field is empty
    pub async fn register(&self, username: &str, password: &str) -> AppResult<()> {
        let users = self.store.users();

        if users.username_exists(username).await? {
            return Err(username_taken());
        }
        validate_credentials(username, password)?;

        let password_hash = hash_password(password)?;
        users
            .create(username, &password_hash)
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation(_) => username_taken(),
                other => other.into(),
            })?;

        info!(username, "User registered");
        Ok(())
    }

    /// Verifies credentials and issues an access/refresh token pair.
    ///
    /// The refresh token is recorded in the store as not revoked.
    ///
    /// # Errors
    ///
    /// - `Validation` if either field is empty
    /// - `Unauthorized` if the user is unknown or the password is wrong
    pub async fn login(&self, username: &str, password: &str) -> AppResult<TokenPair> {
        validate_credentials(username, password)?;

        let Some(user) = self.store.users().find_by_username(username).await? else {
            warn!(username, "Login attempt for unknown user");
            return Err(invalid_credentials());
        };

        if !verify_password(password, &user.password)? {
            warn!(username, "Failed login attempt - invalid password");
            return Err(invalid_credentials());
        }

        let access_token = self.jwt.generate_access_token(&user.username)?;
        let (refresh_token, claims) = self.jwt.generate_refresh_token(&user.username)?;

        self.store
            .refresh_tokens()
            .store(&user.username, &refresh_token, claims.jti, claims.expires_at())
            .await?;

        info!(username, user_id = user.id, "User logged in");
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Mints a new access token from a stored, unrevoked refresh token.
    ///
    /// The refresh token itself is not rotated.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the token is invalid, expired, not
    /// refresh-scoped, unknown to the store, or revoked.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        let claims = self
            .jwt
            .validate_scoped(refresh_token, TokenScope::Refresh)?;

        if self.store.refresh_tokens().is_revoked(refresh_token).await? {
            warn!(username = claims.identity(), jti = %claims.jti, "Refresh with revoked token");
            return Err(AppError::Unauthorized("Token has been revoked".to_string()));
        }

        Ok(self.jwt.generate_access_token(claims.identity())?)
    }

    /// Revokes a refresh token.
    ///
    /// Unknown and already revoked tokens are accepted silently.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the token is invalid, expired or not
    /// refresh-scoped.
    pub async fn logout(&self, refresh_token: &str) -> AppResult<()> {
        let claims = self
            .jwt
            .validate_scoped(refresh_token, TokenScope::Refresh)?;

        let found = self
            .store
            .refresh_tokens()
            .revoke_by_token(refresh_token)
            .await?;

        info!(username = claims.identity(), found, "User logged out");
        Ok(())
    }

    /// Deletes the account of the given identity.
    ///
    /// Refresh tokens issued to the account stay in the store.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user no longer exists.
    pub async fn delete_account(&self, username: &str) -> AppResult<()> {
        if !self.store.users().delete_by_username(username).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        info!(username, "User deleted");
        Ok(())
    }
}
