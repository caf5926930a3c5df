//! Amount validation and the balance-checked debit.

use rust_decimal::Decimal;

use super::error::LedgerError;

/// Largest amount a single transaction may carry (`DECIMAL(10, 2)`).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Validates a transaction amount.
///
/// # Errors
///
/// Returns an error if the amount is not positive, has more than two decimal
/// places, or exceeds [`MAX_AMOUNT`].
pub fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount);
    }
    if amount.normalize().scale() > 2 {
        return Err(LedgerError::TooPrecise);
    }
    if amount > MAX_AMOUNT {
        return Err(LedgerError::TooLarge(MAX_AMOUNT));
    }
    Ok(())
}

/// Debits `amount` from `balance` and returns the new balance.
///
/// The balance never goes negative: an amount larger than the balance is
/// rejected and the caller must leave the account untouched.
///
/// # Errors
///
/// Returns `LedgerError::InsufficientFunds` if `balance < amount`, or an
/// amount validation error.
pub fn debit(balance: Decimal, amount: Decimal) -> Result<Decimal, LedgerError> {
    validate_amount(amount)?;

    if balance < amount {
        return Err(LedgerError::InsufficientFunds { balance, amount });
    }

    Ok(balance - amount)
}
