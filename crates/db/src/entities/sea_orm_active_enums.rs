//! `SeaORM` active enums.

use peachtree_core::ledger::TransactionType as DomainTransactionType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of transfer, stored as its snake-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    #[sea_orm(string_value = "card_payment")]
    CardPayment,
    #[sea_orm(string_value = "online_transfer")]
    OnlineTransfer,
    #[sea_orm(string_value = "transaction")]
    Transaction,
}

impl From<DomainTransactionType> for TransactionType {
    fn from(value: DomainTransactionType) -> Self {
        match value {
            DomainTransactionType::CardPayment => Self::CardPayment,
            DomainTransactionType::OnlineTransfer => Self::OnlineTransfer,
            DomainTransactionType::Transaction => Self::Transaction,
        }
    }
}

impl From<TransactionType> for DomainTransactionType {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::CardPayment => Self::CardPayment,
            TransactionType::OnlineTransfer => Self::OnlineTransfer,
            TransactionType::Transaction => Self::Transaction,
        }
    }
}
