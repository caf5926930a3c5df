//! User repository for database operations.

use std::time::Duration;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::entities::users;
use crate::error::{StoreError, bounded};

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
    timeout: Duration,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    /// Finds a user by exact username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or times out.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<users::Model>, StoreError> {
        bounded(self.timeout, async {
            Ok(users::Entity::find()
                .filter(users::Column::Username.eq(username))
                .one(&self.db)
                .await?)
        })
        .await
    }

    /// Returns whether a username is taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or times out.
    pub async fn username_exists(&self, username: &str) -> Result<bool, StoreError> {
        bounded(self.timeout, async {
            let count = users::Entity::find()
                .filter(users::Column::Username.eq(username))
                .count(&self.db)
                .await?;
            Ok(count > 0)
        })
        .await
    }

    /// Creates a new user with an already hashed password.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UniqueViolation` if the username was taken
    /// concurrently, or another error if the insert fails.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<users::Model, StoreError> {
        bounded(self.timeout, async {
            let user = users::ActiveModel {
                username: Set(username.to_string()),
                password: Set(password_hash.to_string()),
                created_at: Set(chrono::Utc::now().into()),
                ..Default::default()
            };

            Ok(user.insert(&self.db).await?)
        })
        .await
    }

    /// Deletes a user by username. Returns whether a row was removed.
    ///
    /// Issued refresh tokens are left in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails or times out.
    pub async fn delete_by_username(&self, username: &str) -> Result<bool, StoreError> {
        bounded(self.timeout, async {
            let result = users::Entity::delete_many()
                .filter(users::Column::Username.eq(username))
                .exec(&self.db)
                .await?;
            Ok(result.rows_affected > 0)
        })
        .await
    }
}
