//! Cash adjustment arithmetic.

use crate::domain::ledger::errors::LedgerError;
use crate::domain::ledger::value_objects::BalanceMode;
use crate::domain::shared::{DomainError, Money};

/// Signed balance change for a cash adjustment.
///
/// # Errors
///
/// Returns `InsufficientBalance` when a withdrawal exceeds the balance and
/// `InvalidInput` when a deposit would push it out of the decimal range.
pub fn plan_adjustment(
    mode: BalanceMode,
    balance: Money,
    amount: Money,
) -> Result<Money, LedgerError> {
    match mode {
        BalanceMode::Rem if balance < amount => Err(LedgerError::InsufficientBalance {
            required: amount,
            available: balance,
        }),
        BalanceMode::Add if balance.checked_add(amount).is_none() => {
            Err(DomainError::out_of_range("amount").into())
        }
        _ => Ok(mode.delta(balance, amount)),
    }
}
