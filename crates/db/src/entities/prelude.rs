//! Entity re-exports.

pub use super::contractors::Entity as Contractors;
pub use super::refresh_tokens::Entity as RefreshTokens;
pub use super::system_accounts::Entity as SystemAccounts;
pub use super::transaction_statuses::Entity as TransactionStatuses;
pub use super::transactions::Entity as Transactions;
pub use super::users::Entity as Users;
