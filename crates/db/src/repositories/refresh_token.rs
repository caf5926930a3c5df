//! Refresh token repository.
//!
//! Tokens are stored as SHA-256 digests and looked up by the exact token
//! string presented. A token with no row is treated as revoked.

use std::time::Duration;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    sea_query::Expr,
};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::entities::refresh_tokens;
use crate::error::{StoreError, bounded};

/// Repository for issued refresh tokens.
#[derive(Debug, Clone)]
pub struct RefreshTokenRepository {
    db: DatabaseConnection,
    timeout: Duration,
}

impl RefreshTokenRepository {
    /// Creates a new refresh token repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    /// Hashes a refresh token for storage.
    #[must_use]
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Records a newly issued refresh token as not revoked.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails or times out.
    pub async fn store(
        &self,
        username: &str,
        token: &str,
        jti: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<refresh_tokens::Model, StoreError> {
        bounded(self.timeout, async {
            let record = refresh_tokens::ActiveModel {
                username: Set(username.to_string()),
                jti: Set(jti.to_string()),
                token_hash: Set(Self::hash_token(token)),
                revoked: Set(false),
                issued_at: Set(Utc::now().into()),
                expires_at: Set(expires_at.into()),
                ..Default::default()
            };

            Ok(record.insert(&self.db).await?)
        })
        .await
    }

    /// Finds the record for a token, revoked or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or times out.
    pub async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<refresh_tokens::Model>, StoreError> {
        let token_hash = Self::hash_token(token);

        bounded(self.timeout, async {
            Ok(refresh_tokens::Entity::find()
                .filter(refresh_tokens::Column::TokenHash.eq(token_hash))
                .one(&self.db)
                .await?)
        })
        .await
    }

    /// Returns whether a token may no longer be used.
    ///
    /// Unknown tokens count as revoked.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or times out.
    pub async fn is_revoked(&self, token: &str) -> Result<bool, StoreError> {
        Ok(self
            .find_by_token(token)
            .await?
            .is_none_or(|record| record.revoked))
    }

    /// Marks a token as revoked. Returns whether a record was found.
    ///
    /// Revoking an already revoked token is a no-op that still returns `true`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails or times out.
    pub async fn revoke_by_token(&self, token: &str) -> Result<bool, StoreError> {
        let token_hash = Self::hash_token(token);

        bounded(self.timeout, async {
            let result = refresh_tokens::Entity::update_many()
                .col_expr(refresh_tokens::Column::Revoked, Expr::value(true))
                .filter(refresh_tokens::Column::TokenHash.eq(token_hash))
                .exec(&self.db)
                .await?;
            Ok(result.rows_affected > 0)
        })
        .await
    }
}
