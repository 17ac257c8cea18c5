//! Cash adjustment mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::shared::{DomainError, Money};

/// How a direct cash adjustment changes the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceMode {
    /// Deposit: balance += amount.
    Add,
    /// Withdrawal: balance -= amount, never below zero.
    Rem,
    /// Set: balance = amount.
    Mod,
}

impl BalanceMode {
    /// Signed balance change this mode applies to `current` for `amount`.
    #[must_use]
    pub fn delta(&self, current: Money, amount: Money) -> Money {
        match self {
            Self::Add => amount,
            Self::Rem => -amount,
            Self::Mod => amount - current,
        }
    }

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Rem => "rem",
            Self::Mod => "mod",
        }
    }
}

impl FromStr for BalanceMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Self::Add),
            "rem" => Ok(Self::Rem),
            "mod" => Ok(Self::Mod),
            other => Err(DomainError::InvalidValue {
                field: "mode".to_string(),
                message: format!("'{other}' is not one of add, rem, mod"),
            }),
        }
    }
}

impl fmt::Display for BalanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(BalanceMode::Add, 500, 200, 200)]
    #[test_case(BalanceMode::Rem, 500, 200, -200)]
    #[test_case(BalanceMode::Mod, 500, 200, -300)]
    #[test_case(BalanceMode::Mod, 0, 750, 750)]
    fn delta(mode: BalanceMode, current: i64, amount: i64, expected: i64) {
        assert_eq!(
            mode.delta(Money::from_i64(current), Money::from_i64(amount)),
            Money::from_i64(expected)
        );
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!("ADD".parse::<BalanceMode>().unwrap(), BalanceMode::Add);
        assert_eq!("Mod".parse::<BalanceMode>().unwrap(), BalanceMode::Mod);
        assert!("withdraw".parse::<BalanceMode>().is_err());
    }
}
