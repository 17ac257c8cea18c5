//! Portfolio valuation.
//!
//! Marks stored positions to oracle prices. Tickers without a price are
//! valued at zero so a partial oracle outage never fails the read.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ledger::aggregate::Position;
use crate::domain::ledger::value_objects::{AssetClass, PositionDirection};
use crate::domain::shared::{Money, Quantity, Ticker};

/// One position marked to market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionValuation {
    /// Ticker.
    pub ticker: Ticker,
    /// Asset class.
    pub asset_class: AssetClass,
    /// Long/short tag.
    pub direction: PositionDirection,
    /// Units held.
    pub total_quantity: Quantity,
    /// Remaining cost basis.
    pub invested_total: Money,
    /// Unit price used, zero when the oracle had none.
    pub current_price: Money,
    /// `current_price * total_quantity`.
    pub current_value: Money,
    /// `current_value - invested_total`.
    pub unrealized_pnl: Money,
    /// Unrealized P&L as a percentage of cost basis.
    pub pnl_percentage: Decimal,
}

/// Aggregate valuation of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioValuation {
    /// Cash balance.
    pub balance: Money,
    /// Per-position lines, in stored order.
    pub positions: Vec<PositionValuation>,
    /// Cash plus the market value of every position.
    pub total_equity: Money,
}

/// Mark a single position at `price`.
#[must_use]
pub fn value_position(position: &Position, price: Money) -> PositionValuation {
    let current_value = price * position.total_quantity().amount();
    let unrealized_pnl = current_value - position.invested_total();
    let pnl_percentage = unrealized_pnl
        .amount()
        .checked_div(position.invested_total().amount())
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO);

    PositionValuation {
        ticker: position.ticker().clone(),
        asset_class: position.asset_class(),
        direction: position.direction(),
        total_quantity: position.total_quantity(),
        invested_total: position.invested_total(),
        current_price: price,
        current_value,
        unrealized_pnl,
        pnl_percentage,
    }
}

/// Value every position and compute total equity.
#[must_use]
pub fn valuate(
    balance: Money,
    positions: &[Position],
    prices: &HashMap<Ticker, Money>,
) -> PortfolioValuation {
    let lines: Vec<PositionValuation> = positions
        .iter()
        .map(|p| value_position(p, prices.get(p.ticker()).copied().unwrap_or(Money::ZERO)))
        .collect();
    let market_value: Money = lines.iter().map(|l| l.current_value).sum();

    PortfolioValuation {
        balance,
        total_equity: balance + market_value,
        positions: lines,
    }
}
