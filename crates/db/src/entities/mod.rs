//! `SeaORM` entity definitions.

pub mod prelude;

pub mod contractors;
pub mod refresh_tokens;
pub mod sea_orm_active_enums;
pub mod system_accounts;
pub mod transaction_statuses;
pub mod transactions;
pub mod users;
