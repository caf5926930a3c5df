//! Ledger store: system accounts, contractors, statuses and transactions.

use sea_orm_migration::prelude::*;

use crate::entities::contractors::DEFAULT_IMAGE_URL;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SystemAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemAccounts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SystemAccounts::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(SystemAccounts::Balance)
                            .decimal_len(15, 2)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Contractors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contractors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Contractors::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Contractors::ImageUrl)
                            .string_len(512)
                            .not_null()
                            .default(DEFAULT_IMAGE_URL),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransactionStatuses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TransactionStatuses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TransactionStatuses::Name)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(TransactionStatuses::Color)
                            .string_len(20)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(Transactions::Date)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Transactions::ContractorId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Type).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Transactions::Amount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::StatusId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_contractor")
                            .from(Transactions::Table, Transactions::ContractorId)
                            .to(Contractors::Table, Contractors::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_status")
                            .from(Transactions::Table, Transactions::StatusId)
                            .to(TransactionStatuses::Table, TransactionStatuses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Default listing order
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_date")
                    .table(Transactions::Table)
                    .col(Transactions::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TransactionStatuses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contractors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SystemAccounts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SystemAccounts {
    Table,
    Id,
    Name,
    Balance,
}

#[derive(DeriveIden)]
enum Contractors {
    Table,
    Id,
    Name,
    ImageUrl,
}

#[derive(DeriveIden)]
enum TransactionStatuses {
    Table,
    Id,
    Name,
    Color,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    UserId,
    Date,
    ContractorId,
    Type,
    Amount,
    StatusId,
}
