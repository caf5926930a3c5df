//! Ledger domain types for transaction creation and listing.

use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Transaction type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Payment made with a card.
    CardPayment,
    /// Online bank transfer.
    OnlineTransfer,
    /// Generic transaction.
    Transaction,
}

impl TransactionType {
    /// All variants, in declaration order.
    pub const ALL: [Self; 3] = [Self::CardPayment, Self::OnlineTransfer, Self::Transaction];

    /// Returns the wire/storage name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CardPayment => "card_payment",
            Self::OnlineTransfer => "online_transfer",
            Self::Transaction => "transaction",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| LedgerError::UnknownTransactionType(s.to_string()))
    }
}

/// Column a transaction listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Transaction date.
    #[default]
    Date,
    /// Contractor name.
    Contractor,
    /// Transaction amount.
    Amount,
}

impl SortKey {
    /// Parses a query value; unknown values fall back to the default.
    #[must_use]
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("contractor") => Self::Contractor,
            Some("amount") => Self::Amount,
            _ => Self::Date,
        }
    }
}

/// Direction of a transaction listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

impl SortOrder {
    /// Parses a query value; unknown values fall back to the default.
    #[must_use]
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }
}

/// Normalised listing options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Sort column.
    pub sort_by: SortKey,
    /// Sort direction.
    pub sort_order: SortOrder,
    /// Case-insensitive contractor-name substring, if any.
    pub search: Option<String>,
}

impl ListQuery {
    /// Builds listing options from raw query parameters.
    ///
    /// Blank search text means no filter.
    #[must_use]
    pub fn from_params(sort_by: Option<&str>, sort_order: Option<&str>, search: Option<&str>) -> Self {
        Self {
            sort_by: SortKey::parse_or_default(sort_by),
            sort_order: SortOrder::parse_or_default(sort_order),
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string),
        }
    }
}
