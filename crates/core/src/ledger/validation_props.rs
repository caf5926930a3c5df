//! Property-based tests for amount validation and debits.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::validation::{debit, validate_amount};

/// Strategy to generate a valid positive amount (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a non-negative balance (0.00 to 1,000,000.00).
fn balance() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every two-decimal positive amount below the cap is accepted.
    #[test]
    fn prop_positive_amounts_valid(amount in positive_amount()) {
        prop_assert!(validate_amount(amount).is_ok());
    }

    /// Zero and negative amounts are always rejected.
    #[test]
    fn prop_non_positive_rejected(cents in -100_000_000i64..=0i64) {
        prop_assert_eq!(
            validate_amount(Decimal::new(cents, 2)),
            Err(LedgerError::NonPositiveAmount)
        );
    }

    /// A successful debit reduces the balance by exactly the amount and
    /// never leaves it negative.
    #[test]
    fn prop_debit_exact_and_non_negative(balance in balance(), amount in positive_amount()) {
        match debit(balance, amount) {
            Ok(remaining) => {
                prop_assert!(amount <= balance);
                prop_assert_eq!(remaining + amount, balance);
                prop_assert!(remaining >= Decimal::ZERO);
            }
            Err(err) => {
                prop_assert!(amount > balance);
                prop_assert_eq!(err, LedgerError::InsufficientFunds { balance, amount });
            }
        }
    }

    /// Applying a sequence of debits in order only succeeds for a prefix
    /// whose running total fits the starting balance, and the balance stays
    /// non-negative throughout.
    #[test]
    fn prop_sequential_debits_never_overdraw(
        start in balance(),
        amounts in proptest::collection::vec(positive_amount(), 1..20),
    ) {
        let mut current = start;
        let mut spent = Decimal::ZERO;

        for amount in amounts {
            if let Ok(next) = debit(current, amount) {
                spent += amount;
                current = next;
            }
            prop_assert!(current >= Decimal::ZERO);
        }

        prop_assert_eq!(current + spent, start);
    }
}
