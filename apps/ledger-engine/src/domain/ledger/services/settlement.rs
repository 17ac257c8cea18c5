//! Settlement arithmetic.
//!
//! Pure planning for buy and sell orders. A plan describes the balance delta,
//! the position change and the log entry that one atomic scope must apply.
//! Nothing here touches storage.

use chrono::{DateTime, Utc};

use crate::domain::ledger::aggregate::{NewTransaction, Position, trade_note};
use crate::domain::ledger::errors::LedgerError;
use crate::domain::ledger::value_objects::{AssetClass, OrderDirection};
use crate::domain::shared::{AccountId, DomainError, Money, Quantity, Ticker};

/// A validated order ready for settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementOrder {
    /// Owner placing the order.
    pub owner: AccountId,
    /// Ticker traded.
    pub ticker: Ticker,
    /// Buy or sell.
    pub direction: OrderDirection,
    /// Quantity as ordered (lots for stocks).
    pub quantity: Quantity,
    /// Total consideration for the whole order.
    pub consideration: Money,
    /// Fee charged on top.
    pub fee: Money,
    /// Asset class, drives lot scaling.
    pub asset_class: AssetClass,
}

impl SettlementOrder {
    /// Order quantity converted to held units.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if lot scaling overflows.
    pub fn units(&self) -> Result<Quantity, DomainError> {
        self.asset_class.to_units(self.quantity)
    }

    fn note(&self) -> String {
        trade_note(
            self.direction,
            self.quantity,
            self.asset_class,
            &self.ticker,
            self.consideration,
        )
    }
}

/// Effect of a settlement on the stored position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionChange {
    /// First buy of the ticker.
    Insert(Position),
    /// Existing position changed but is still held.
    Update(Position),
    /// Position fully liquidated.
    Delete(Ticker),
}

/// Everything one settlement writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementPlan {
    /// Signed balance change.
    pub balance_delta: Money,
    /// Position write.
    pub position: PositionChange,
    /// Log entry to append.
    pub entry: NewTransaction,
}

/// Plan an order against the current balance and stored position.
///
/// # Errors
///
/// See [`plan_buy`] and [`plan_sell`].
pub fn plan_settlement(
    order: &SettlementOrder,
    balance: Money,
    existing: Option<Position>,
    now: DateTime<Utc>,
) -> Result<SettlementPlan, LedgerError> {
    match order.direction {
        OrderDirection::Buy => plan_buy(order, balance, existing, now),
        OrderDirection::Sell => plan_sell(order, balance, existing, now),
    }
}

/// Plan a buy: debit consideration plus fee, open or grow the position.
///
/// # Errors
///
/// - `InsufficientBalance` if `balance < consideration + fee`
/// - `MismatchedInfo` if the stored position belongs to someone else
/// - `InvalidInput` for a non-positive quantity or consideration, or for
///   amounts whose sum leaves the decimal range
pub fn plan_buy(
    order: &SettlementOrder,
    balance: Money,
    existing: Option<Position>,
    now: DateTime<Utc>,
) -> Result<SettlementPlan, LedgerError> {
    let required = order
        .consideration
        .checked_add(order.fee)
        .ok_or_else(|| DomainError::out_of_range("fee"))?;
    if balance < required {
        return Err(LedgerError::InsufficientBalance {
            required,
            available: balance,
        });
    }

    let units = order.units()?;
    let position = match existing {
        None => PositionChange::Insert(Position::open(
            order.owner,
            order.ticker.clone(),
            units,
            order.consideration,
            order.asset_class,
            now,
        )?),
        Some(mut position) => {
            ensure_owner(&position, order)?;
            position.accumulate(units, order.consideration, now)?;
            PositionChange::Update(position)
        }
    };

    Ok(SettlementPlan {
        balance_delta: -required,
        position,
        entry: NewTransaction::buy(
            order.owner,
            &order.ticker,
            units,
            order.consideration,
            order.fee,
            order.note(),
        ),
    })
}

/// Plan a sell: remove proportional cost basis, credit consideration less fee.
///
/// # Errors
///
/// - `InsufficientAmount` if nothing is held or fewer units than requested
/// - `MismatchedInfo` if the stored position belongs to someone else
/// - `InsufficientBalance` if the fee exceeds consideration by more than the
///   balance can absorb
/// - `InvalidInput` if the credited balance would leave the decimal range
pub fn plan_sell(
    order: &SettlementOrder,
    balance: Money,
    existing: Option<Position>,
    now: DateTime<Utc>,
) -> Result<SettlementPlan, LedgerError> {
    let units = order.units()?;
    let held = existing
        .as_ref()
        .map_or(Quantity::ZERO, Position::total_quantity);
    let Some(mut position) = existing.filter(|_| held >= units) else {
        return Err(LedgerError::InsufficientAmount {
            ticker: order.ticker.clone(),
            requested: units,
            held,
        });
    };
    ensure_owner(&position, order)?;

    let credit = order.consideration - order.fee;
    let after = balance
        .checked_add(credit)
        .ok_or_else(|| DomainError::out_of_range("consideration"))?;
    if after.is_negative() {
        return Err(LedgerError::InsufficientBalance {
            required: -credit,
            available: balance,
        });
    }

    let removed_basis = position.reduce(units, now)?;
    let change = if position.is_liquidated() {
        PositionChange::Delete(order.ticker.clone())
    } else {
        PositionChange::Update(position)
    };

    Ok(SettlementPlan {
        balance_delta: credit,
        position: change,
        entry: NewTransaction::sell(
            order.owner,
            &order.ticker,
            units,
            order.consideration,
            removed_basis,
            order.fee,
            order.note(),
        ),
    })
}

fn ensure_owner(position: &Position, order: &SettlementOrder) -> Result<(), LedgerError> {
    if position.owner() == order.owner {
        return Ok(());
    }
    Err(LedgerError::MismatchedInfo {
        ticker: order.ticker.clone(),
        position_owner: position.owner(),
        order_owner: order.owner,
    })
}
