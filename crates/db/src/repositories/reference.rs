//! Read-only access to reference data.

use std::time::Duration;

use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::entities::{contractors, system_accounts, transaction_statuses};
use crate::error::{StoreError, bounded};

/// Repository for contractors, statuses and system accounts.
#[derive(Debug, Clone)]
pub struct ReferenceRepository {
    db: DatabaseConnection,
    timeout: Duration,
}

impl ReferenceRepository {
    /// Creates a new reference repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    /// Lists all contractors ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or times out.
    pub async fn list_contractors(&self) -> Result<Vec<contractors::Model>, StoreError> {
        bounded(self.timeout, async {
            Ok(contractors::Entity::find()
                .order_by_asc(contractors::Column::Id)
                .all(&self.db)
                .await?)
        })
        .await
    }

    /// Lists all transaction statuses ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or times out.
    pub async fn list_statuses(&self) -> Result<Vec<transaction_statuses::Model>, StoreError> {
        bounded(self.timeout, async {
            Ok(transaction_statuses::Entity::find()
                .order_by_asc(transaction_statuses::Column::Id)
                .all(&self.db)
                .await?)
        })
        .await
    }

    /// Lists all system accounts ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or times out.
    pub async fn list_accounts(&self) -> Result<Vec<system_accounts::Model>, StoreError> {
        bounded(self.timeout, async {
            Ok(system_accounts::Entity::find()
                .order_by_asc(system_accounts::Column::Id)
                .all(&self.db)
                .await?)
        })
        .await
    }
}
