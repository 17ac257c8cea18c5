//! Ledger DTOs
//!
//! Request DTOs carry raw caller input and validate it into domain commands;
//! response DTOs flatten aggregates for the HTTP boundary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ledger::aggregate::cashflow_note;
use crate::domain::ledger::services::{PositionValuation, SettlementOrder, TransactionView};
use crate::domain::ledger::{
    Account, AssetClass, BalanceMode, LedgerError, OrderDirection, Position, PositionDirection,
};
use crate::domain::shared::{AccountId, DomainError, Money, Quantity, Ticker};

/// Notes must be shorter than this many characters.
pub const MAX_NOTE_CHARS: usize = 50;

/// Bank sources must be shorter than this many characters.
pub const MAX_BANK_SOURCE_CHARS: usize = 18;

fn default_asset_class() -> String {
    AssetClass::default().as_str().to_string()
}

/// Request to settle a buy or sell order. The direction comes from the route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettleOrderRequestDto {
    /// Ticker to trade.
    pub ticker: String,
    /// Quantity as ordered (lots for stocks).
    pub quantity: Decimal,
    /// Total consideration for the whole order.
    #[serde(alias = "price")]
    pub consideration: Decimal,
    /// Fee on top of the consideration.
    #[serde(default)]
    pub fee: Decimal,
    /// `stocks`, `crypto` or `futures`.
    #[serde(default = "default_asset_class", alias = "position_type")]
    pub asset_class: String,
}

impl SettleOrderRequestDto {
    /// Validate and build a settlement order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending field.
    pub fn into_order(
        self,
        owner: AccountId,
        direction: OrderDirection,
    ) -> Result<SettlementOrder, LedgerError> {
        let ticker = Ticker::new(self.ticker);
        ticker.validate()?;
        let asset_class: AssetClass = self.asset_class.parse()?;
        let quantity = Quantity::new(self.quantity);
        quantity.validate_for_order()?;
        let consideration = Money::new(self.consideration);
        consideration.ensure_positive("consideration")?;
        let fee = Money::new(self.fee);
        fee.ensure_non_negative("fee")?;

        Ok(SettlementOrder {
            owner,
            ticker,
            direction,
            quantity,
            consideration,
            fee,
            asset_class,
        })
    }
}

/// A validated cash adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceAdjustment {
    /// Account to adjust.
    pub owner: AccountId,
    /// Amount of the adjustment.
    pub amount: Money,
    /// Fee recorded on the entry.
    pub fee: Money,
    /// How the amount applies.
    pub mode: BalanceMode,
    /// Note for the log entry, defaulted from the requested mode.
    pub notes: String,
    /// Bank source tag stored as the entry ticker.
    pub bank_source: String,
}

/// Request to add, remove or set cash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustBalanceRequestDto {
    /// Amount, strictly positive.
    pub amount: Decimal,
    /// Fee, non-negative.
    #[serde(default)]
    pub fee: Decimal,
    /// `add`, `rem` or `mod`.
    pub mode: String,
    /// Optional note.
    #[serde(default)]
    pub note: Option<String>,
    /// Bank the cash moved through.
    #[serde(alias = "bank_src")]
    pub bank_source: String,
}

impl AdjustBalanceRequestDto {
    /// Validate and build an adjustment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending field.
    pub fn into_adjustment(self, owner: AccountId) -> Result<BalanceAdjustment, LedgerError> {
        let amount = Money::new(self.amount);
        amount.ensure_positive("amount")?;
        let fee = Money::new(self.fee);
        fee.ensure_non_negative("fee")?;
        // The logged price is delta + fee, bounded above by amount + fee.
        if amount.checked_add(fee).is_none() {
            return Err(DomainError::out_of_range("fee").into());
        }
        let mode: BalanceMode = self.mode.parse()?;

        if let Some(note) = &self.note
            && note.chars().count() >= MAX_NOTE_CHARS
        {
            return Err(LedgerError::invalid(
                "note",
                format!("must be shorter than {MAX_NOTE_CHARS} characters"),
            ));
        }

        let bank_source = self.bank_source.trim().to_string();
        let bank_len = bank_source.chars().count();
        if bank_len == 0 || bank_len >= MAX_BANK_SOURCE_CHARS {
            return Err(LedgerError::invalid(
                "bank_source",
                format!("must be 1 to {} characters", MAX_BANK_SOURCE_CHARS - 1),
            ));
        }

        Ok(BalanceAdjustment {
            owner,
            amount,
            fee,
            mode,
            notes: cashflow_note(self.mode.trim(), self.note.as_deref()),
            bank_source,
        })
    }
}

/// Request to open an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAccountRequestDto {
    /// Account id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Opening cash balance.
    #[serde(default)]
    pub balance: Decimal,
}

/// A stored position without pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionDto {
    /// Ticker.
    pub ticker: Ticker,
    /// Units held.
    pub total_quantity: Quantity,
    /// Remaining cost basis.
    pub invested_total: Money,
    /// Average cost per unit.
    pub average_cost: Money,
    /// Asset class.
    pub asset_class: AssetClass,
    /// Long/short tag.
    pub direction: PositionDirection,
    /// Opened at.
    pub created_at: DateTime<Utc>,
    /// Last changed at.
    pub updated_at: DateTime<Utc>,
}

impl From<&Position> for PositionDto {
    fn from(position: &Position) -> Self {
        Self {
            ticker: position.ticker().clone(),
            total_quantity: position.total_quantity(),
            invested_total: position.invested_total(),
            average_cost: position.average_cost(),
            asset_class: position.asset_class(),
            direction: position.direction(),
            created_at: position.created_at(),
            updated_at: position.updated_at(),
        }
    }
}

/// Account summary returned after opening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDto {
    /// Account id.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Cash balance.
    pub balance: Money,
    /// Opened at.
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountDto {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id(),
            name: account.name().to_string(),
            balance: account.balance(),
            created_at: account.created_at(),
        }
    }
}

/// Account profile with marked-to-market positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfileDto {
    /// Account id.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Cash balance.
    pub balance: Money,
    /// Cash plus market value of all positions.
    pub total_equity: Money,
    /// Per-position valuation. Empty, never absent.
    pub positions: Vec<PositionValuation>,
}

/// Outcome of a settled order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResponseDto {
    /// Balance after settlement.
    pub balance: Money,
    /// Position after settlement; absent once fully sold.
    pub position: Option<PositionDto>,
    /// Log entry written.
    pub transaction: TransactionView,
}

/// Outcome of a cash adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustBalanceResponseDto {
    /// Balance after the adjustment.
    pub balance: Money,
    /// Log entry written.
    pub transaction: TransactionView,
}

/// Current price of a ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteDto {
    /// Ticker.
    pub ticker: Ticker,
    /// Unit price.
    pub price: Money,
}
