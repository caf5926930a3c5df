//! Store errors and the per-call timeout bound.

use std::{future::Future, time::Duration};

use peachtree_shared::AppError;
use sea_orm::{DbErr, RuntimeErr, SqlErr};
use thiserror::Error;

/// Errors raised by the store client.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The call did not finish within the configured timeout.
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    /// No connection could be acquired from the pool.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A unique constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Any other database error.
    #[error("database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            return Self::UniqueViolation(detail);
        }
        if is_lock_contention(&err) {
            return Self::Unavailable(err.to_string());
        }
        match err {
            DbErr::ConnectionAcquire(e) => Self::Unavailable(e.to_string()),
            DbErr::Conn(e) => Self::Unavailable(e.to_string()),
            other => Self::Database(other),
        }
    }
}

/// `SQLITE_BUSY` / `SQLITE_LOCKED` (any extended code): the writer lock was
/// not granted in time.
fn is_lock_contention(err: &DbErr) -> bool {
    let (DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e))) = err
    else {
        return false;
    };
    e.as_database_error()
        .and_then(|db| db.code())
        .and_then(|code| code.parse::<i32>().ok())
        .is_some_and(|code| matches!(code & 0xff, 5 | 6))
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Timeout(_) | StoreError::Unavailable(_) => {
                Self::Unavailable(err.to_string())
            }
            StoreError::UniqueViolation(detail) => {
                tracing::debug!(constraint = %detail, "Unique constraint violated");
                Self::Conflict("Resource already exists".to_string())
            }
            StoreError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Runs a store call, failing with [`StoreError::Timeout`] once `limit` elapses.
///
/// Dropping the timed-out future releases its connection and rolls back any
/// open transaction.
pub(crate) async fn bounded<T, E, F>(limit: Duration, call: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<StoreError>,
{
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or_else(|_| Err(StoreError::Timeout(limit).into()))
}
