//! Account aggregate.
//!
//! An account owns the cash balance shared by all of its positions. It is
//! created once at registration and never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::shared::{AccountId, DomainError, Money};

/// A ledger owner with a cash balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    name: String,
    balance: Money,
    created_at: DateTime<Utc>,
}

impl Account {
    /// Open an account with an opening cash balance.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if the name is blank or the balance is negative.
    pub fn open(
        id: AccountId,
        name: impl Into<String>,
        opening_balance: Money,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::InvalidValue {
                field: "name".to_string(),
                message: "Account name cannot be empty".to_string(),
            });
        }
        opening_balance.ensure_non_negative("balance")?;

        Ok(Self {
            id,
            name,
            balance: opening_balance,
            created_at: now,
        })
    }

    /// Account identifier.
    #[must_use]
    pub const fn id(&self) -> AccountId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current cash balance.
    #[must_use]
    pub const fn balance(&self) -> Money {
        self.balance
    }

    /// When the account was opened.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Apply a signed change to the balance and return the new balance.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if the result would be negative and
    /// `InvalidValue` if it leaves the decimal range. The balance is left
    /// untouched in both cases.
    pub fn apply_delta(&mut self, delta: Money) -> Result<Money, DomainError> {
        let next = self
            .balance
            .checked_add(delta)
            .ok_or_else(|| DomainError::out_of_range("balance"))?;
        if next.is_negative() {
            return Err(DomainError::InvariantViolation {
                aggregate: "Account".to_string(),
                invariant: "balance >= 0".to_string(),
                state: format!("balance={}, delta={delta}", self.balance),
            });
        }
        self.balance = next;
        Ok(next)
    }
}
