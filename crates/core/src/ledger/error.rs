//! Ledger error types.

use peachtree_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by ledger rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Amount is zero or negative.
    #[error("Amount must be positive")]
    NonPositiveAmount,

    /// Amount has more precision than the ledger stores.
    #[error("Amount must have at most 2 decimal places")]
    TooPrecise,

    /// Amount exceeds the largest storable value.
    #[error("Amount must not exceed {0}")]
    TooLarge(Decimal),

    /// Balance does not cover the amount.
    #[error("Insufficient balance: balance {balance}, requested {amount}")]
    InsufficientFunds {
        /// Current account balance.
        balance: Decimal,
        /// Requested debit.
        amount: Decimal,
    },

    /// Transaction type string is not recognised.
    #[error("Unknown transaction type: {0}")]
    UnknownTransactionType(String),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds { .. } => {
                Self::InsufficientFunds("Insufficient balance".to_string())
            }
            other => Self::Validation(other.to_string()),
        }
    }
}
