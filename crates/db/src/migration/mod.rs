//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration and use the portable schema
//! builder, so the same set runs against `PostgreSQL` and `SQLite`.

pub use sea_orm_migration::prelude::*;

mod m20261016_000001_credentials;
mod m20261016_000002_ledger;
mod m20261016_000003_seed_statuses;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261016_000001_credentials::Migration),
            Box::new(m20261016_000002_ledger::Migration),
            Box::new(m20261016_000003_seed_statuses::Migration),
        ]
    }
}
