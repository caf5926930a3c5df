//! Seeds the fixed set of transaction statuses.
//!
//! `sent` must exist before any transaction can be created.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(SEED_STATUSES_SQL)
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(DROP_STATUSES_SQL)
            .await?;
        Ok(())
    }
}

const SEED_STATUSES_SQL: &str = r"
INSERT INTO transaction_statuses (name, color) VALUES
    ('sent', '#1180aa'),
    ('received', '#fbbb1b'),
    ('paid', '#c12020');
";

const DROP_STATUSES_SQL: &str = r"
DELETE FROM transaction_statuses WHERE name IN ('sent', 'received', 'paid');
";
