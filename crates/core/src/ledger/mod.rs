//! Ledger rules for system-account transfers.
//!
//! This module implements the pure part of the transaction engine:
//! - Transaction type classification
//! - Amount validation and the balance-checked debit
//! - Sort and search options for listing
//! - The status transition policy
//!
//! Persistence and atomicity live in the db crate; everything here is
//! deterministic and store-free.

pub mod error;
pub mod status;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::LedgerError;
pub use status::{INITIAL_STATUS, StatusPolicy};
pub use types::{ListQuery, SortKey, SortOrder, TransactionType};
pub use validation::{MAX_AMOUNT, debit, validate_amount};
