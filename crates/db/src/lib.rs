//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the credential and ledger stores
//! - Repository abstractions for data access
//! - Database migrations
//! - A [`Store`] handle that bounds every call with a timeout

pub mod entities;
pub mod error;
pub mod migration;
pub mod repositories;

use std::time::Duration;

pub use error::StoreError;
pub use repositories::{
    CreateTransactionInput, RefreshTokenRepository, ReferenceRepository, TransactionDetail,
    TransactionError, TransactionRepository, UserRepository,
};

use peachtree_shared::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Pooled store client.
///
/// Cloning is cheap; every clone shares the same connection pool. Each
/// repository call acquires a connection (or a transaction) for the duration
/// of one logical operation and releases it on every exit path.
#[derive(Debug, Clone)]
pub struct Store {
    db: DatabaseConnection,
    timeout: Duration,
}

impl Store {
    /// Wraps an existing connection pool.
    #[must_use]
    pub const fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// User records.
    #[must_use]
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.db.clone(), self.timeout)
    }

    /// Issued refresh tokens and their revocation state.
    #[must_use]
    pub fn refresh_tokens(&self) -> RefreshTokenRepository {
        RefreshTokenRepository::new(self.db.clone(), self.timeout)
    }

    /// Contractors, statuses and system accounts.
    #[must_use]
    pub fn reference(&self) -> ReferenceRepository {
        ReferenceRepository::new(self.db.clone(), self.timeout)
    }

    /// Ledger transactions.
    #[must_use]
    pub fn transactions(&self) -> TransactionRepository {
        TransactionRepository::new(self.db.clone(), self.timeout)
    }

    /// Checks that the database answers within the timeout.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Timeout` or `StoreError::Unavailable` when the
    /// database cannot be reached.
    pub async fn ping(&self) -> Result<(), StoreError> {
        error::bounded(self.timeout, async { Ok(self.db.ping().await?) }).await
    }
}

/// Establishes a connection pool to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<Store, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.timeout())
        .acquire_timeout(config.timeout())
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    Ok(Store::new(db, config.timeout()))
}
