//! Money value object for cash amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::domain::shared::DomainError;

/// A monetary amount in the account currency.
///
/// Represented as a Decimal for precise financial calculations. The ledger is
/// single-currency, so no currency code is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a new Money value from a Decimal.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a Money value from a whole amount.
    #[must_use]
    pub fn from_i64(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if this amount is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if this amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns true if this amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == Decimal::ZERO
    }

    /// Get the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Round to 2 decimal places.
    #[must_use]
    pub fn round(&self) -> Self {
        Self(self.0.round_dp(2))
    }

    /// Checked addition. `None` when the sum leaves the Decimal range.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Checked subtraction. `None` when the difference leaves the Decimal range.
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Checked scaling. `None` when the product leaves the Decimal range.
    #[must_use]
    pub fn checked_mul(self, rhs: Decimal) -> Option<Self> {
        self.0.checked_mul(rhs).map(Self)
    }

    /// Require a strictly positive amount.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` naming `field` if the amount is zero or negative.
    pub fn ensure_positive(&self, field: &str) -> Result<(), DomainError> {
        if self.is_positive() {
            return Ok(());
        }
        Err(DomainError::InvalidValue {
            field: field.to_string(),
            message: "must be greater than zero".to_string(),
        })
    }

    /// Require a non-negative amount.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` naming `field` if the amount is negative.
    pub fn ensure_non_negative(&self, field: &str) -> Result<(), DomainError> {
        if self.is_negative() {
            return Err(DomainError::InvalidValue {
                field: field.to_string(),
                message: "cannot be negative".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

// Operators saturate at the edge of the Decimal range. Ledger writes go
// through the checked forms and reject overflow instead.

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_display_two_places() {
        assert_eq!(format!("{}", Money::new(dec!(150.5))), "150.50");
        assert_eq!(format!("{}", Money::from_i64(800_000)), "800000.00");
    }

    #[test]
    fn money_zero() {
        assert!(Money::ZERO.is_zero());
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::ZERO.is_negative());
    }

    #[test]
    fn money_round() {
        let m = Money::new(dec!(150.555));
        assert_eq!(m.round().amount(), dec!(150.56));
    }

    #[test]
    fn money_arithmetic() {
        let a = Money::from_i64(100);
        let b = Money::from_i64(50);

        assert_eq!(a + b, Money::from_i64(150));
        assert_eq!(a - b, Money::from_i64(50));
        assert_eq!(-a, Money::from_i64(-100));
        assert_eq!(a * dec!(2.5), Money::from_i64(250));

        let mut c = a;
        c += b;
        c -= Money::from_i64(25);
        assert_eq!(c, Money::from_i64(125));
    }

    #[test]
    fn money_checked_arithmetic_reports_overflow() {
        let max = Money::new(Decimal::MAX);
        assert_eq!(max.checked_add(Money::from_i64(1)), None);
        assert_eq!(Money::new(Decimal::MIN).checked_sub(Money::from_i64(1)), None);
        assert_eq!(max.checked_mul(dec!(2)), None);
        assert_eq!(
            Money::from_i64(2).checked_add(Money::from_i64(3)),
            Some(Money::from_i64(5))
        );
        assert_eq!(Money::from_i64(4).checked_mul(dec!(0.5)), Some(Money::from_i64(2)));
    }

    #[test]
    fn money_operators_saturate_instead_of_panicking() {
        let max = Money::new(Decimal::MAX);
        assert_eq!(max + Money::from_i64(1), max);
        assert_eq!(-max - Money::from_i64(1), Money::new(Decimal::MIN));
        assert_eq!(max * dec!(10), max);
        let total: Money = [max, max].into_iter().sum();
        assert_eq!(total, max);
    }

    #[test]
    fn money_sum() {
        let total: Money = [1, 2, 3].into_iter().map(Money::from_i64).sum();
        assert_eq!(total, Money::from_i64(6));

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn money_ensure_positive() {
        assert!(Money::from_i64(1).ensure_positive("amount").is_ok());
        let err = Money::ZERO.ensure_positive("amount").unwrap_err();
        assert!(err.to_string().contains("amount"));
        assert!(Money::from_i64(-1).ensure_positive("amount").is_err());
    }

    #[test]
    fn money_ensure_non_negative() {
        assert!(Money::ZERO.ensure_non_negative("fee").is_ok());
        assert!(Money::from_i64(-5).ensure_non_negative("fee").is_err());
    }

    #[test]
    fn money_serde_as_string() {
        let m = Money::new(dec!(197000));
        let json = serde_json::to_string(&m).unwrap();
        let parsed: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, m);
    }
}
