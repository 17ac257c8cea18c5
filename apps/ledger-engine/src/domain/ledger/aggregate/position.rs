//! Position aggregate.
//!
//! One position per (owner, ticker) tracks the units held and the remaining
//! cost basis under the average-cost method. A position that reaches zero
//! units is deleted by the store rather than kept at zero, so
//! `invested_total == 0` exactly when `total_quantity == 0` never has to be
//! observed on a live row.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ledger::value_objects::{AssetClass, PositionDirection};
use crate::domain::shared::{AccountId, DomainError, Money, Quantity, Ticker};

/// An account's current holding in one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    owner: AccountId,
    ticker: Ticker,
    total_quantity: Quantity,
    invested_total: Money,
    asset_class: AssetClass,
    direction: PositionDirection,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Position {
    /// Open a position from its first buy.
    ///
    /// `units` is already lot-scaled.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if `units` or `consideration` is not positive.
    pub fn open(
        owner: AccountId,
        ticker: Ticker,
        units: Quantity,
        consideration: Money,
        asset_class: AssetClass,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        units.validate_for_order()?;
        consideration.ensure_positive("consideration")?;

        Ok(Self {
            owner,
            ticker,
            total_quantity: units,
            invested_total: consideration,
            asset_class,
            direction: PositionDirection::default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Owner of the position.
    #[must_use]
    pub const fn owner(&self) -> AccountId {
        self.owner
    }

    /// Ticker held.
    #[must_use]
    pub const fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Units held.
    #[must_use]
    pub const fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    /// Remaining cost basis.
    #[must_use]
    pub const fn invested_total(&self) -> Money {
        self.invested_total
    }

    /// Asset class recorded at open.
    #[must_use]
    pub const fn asset_class(&self) -> AssetClass {
        self.asset_class
    }

    /// Long/short tag.
    #[must_use]
    pub const fn direction(&self) -> PositionDirection {
        self.direction
    }

    /// When the position was opened.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the position last changed.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Average cost per unit, or zero for an empty position or one whose unit
    /// cost is not representable.
    #[must_use]
    pub fn average_cost(&self) -> Money {
        if self.total_quantity.is_zero() {
            return Money::ZERO;
        }
        self.invested_total
            .amount()
            .checked_div(self.total_quantity.amount())
            .map_or(Money::ZERO, Money::new)
    }

    /// True once every unit has been sold.
    #[must_use]
    pub fn is_liquidated(&self) -> bool {
        self.total_quantity <= Quantity::ZERO
    }

    /// Add a buy to the running (invested, quantity) pair.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if `units` or `consideration` is not positive,
    /// or if either running total would leave the decimal range. The
    /// position is unchanged on error.
    pub fn accumulate(
        &mut self,
        units: Quantity,
        consideration: Money,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        units.validate_for_order()?;
        consideration.ensure_positive("consideration")?;

        let total_quantity = self
            .total_quantity
            .checked_add(units)
            .ok_or_else(|| DomainError::out_of_range("quantity"))?;
        let invested_total = self
            .invested_total
            .checked_add(consideration)
            .ok_or_else(|| DomainError::out_of_range("consideration"))?;

        self.total_quantity = total_quantity;
        self.invested_total = invested_total;
        self.updated_at = now;
        Ok(())
    }

    /// Remove `units` from the position and return the cost basis removed.
    ///
    /// Selling the whole position removes the entire remaining basis exactly,
    /// so no rounding residue survives a full close-out.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` for a non-positive quantity and
    /// `InvariantViolation` when more units are requested than held.
    pub fn reduce(&mut self, units: Quantity, now: DateTime<Utc>) -> Result<Money, DomainError> {
        units.validate_for_order()?;
        if units > self.total_quantity {
            return Err(DomainError::InvariantViolation {
                aggregate: "Position".to_string(),
                invariant: "sell quantity <= total quantity".to_string(),
                state: format!("held={}, requested={units}", self.total_quantity),
            });
        }

        let removed = if units >= self.total_quantity {
            self.invested_total
        } else {
            let invested: Decimal = self.invested_total.amount();
            let held: Decimal = self.total_quantity.amount();
            // Fall back to the share of basis when the unit cost itself overflows.
            let basis = invested
                .checked_div(held)
                .and_then(|per_unit| per_unit.checked_mul(units.amount()))
                .map_or_else(|| self.invested_total * (units.amount() / held), Money::new);
            basis.min(self.invested_total)
        };

        self.invested_total -= removed;
        self.total_quantity -= units;
        self.updated_at = now;
        Ok(removed)
    }
}
