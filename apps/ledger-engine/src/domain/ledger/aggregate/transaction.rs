//! Transaction log entry.
//!
//! Entries are append-only. A [`NewTransaction`] is built by the engines and
//! handed to the store, which assigns the id and insertion timestamp and
//! returns the immutable [`Transaction`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ledger::value_objects::{AssetClass, OrderDirection, TransactionKind};
use crate::domain::shared::{AccountId, Money, Quantity, Ticker, TransactionId};

/// A transaction not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// Owner of the entry.
    pub owner: AccountId,
    /// Ticker for trades, bank source for cash entries.
    pub ticker: String,
    /// Entry kind.
    pub kind: TransactionKind,
    /// Units traded (lot-scaled); zero for cash entries.
    pub quantity: Quantity,
    /// Cost basis for trades, signed balance delta for cash entries.
    pub base_price: Money,
    /// Gross amount.
    pub price: Money,
    /// Fee charged.
    pub fee: Money,
    /// Free-form note.
    pub notes: String,
}

impl NewTransaction {
    /// Entry for a settled buy. `price` is the total cash debited.
    #[must_use]
    pub fn buy(
        owner: AccountId,
        ticker: &Ticker,
        units: Quantity,
        consideration: Money,
        fee: Money,
        notes: String,
    ) -> Self {
        Self {
            owner,
            ticker: ticker.to_string(),
            kind: TransactionKind::Buy,
            quantity: units,
            base_price: consideration,
            price: consideration + fee,
            fee,
            notes,
        }
    }

    /// Entry for a settled sell. `base_price` is the cost basis removed.
    #[must_use]
    pub fn sell(
        owner: AccountId,
        ticker: &Ticker,
        units: Quantity,
        consideration: Money,
        removed_basis: Money,
        fee: Money,
        notes: String,
    ) -> Self {
        Self {
            owner,
            ticker: ticker.to_string(),
            kind: TransactionKind::Sell,
            quantity: units,
            base_price: removed_basis,
            price: consideration,
            fee,
            notes,
        }
    }

    /// Entry for a direct cash adjustment of `delta`.
    #[must_use]
    pub fn cashflow(
        owner: AccountId,
        bank_source: impl Into<String>,
        delta: Money,
        fee: Money,
        notes: String,
    ) -> Self {
        Self {
            owner,
            ticker: bank_source.into(),
            kind: TransactionKind::Cashflow,
            quantity: Quantity::ZERO,
            base_price: delta,
            price: delta + fee,
            fee,
            notes,
        }
    }
}

/// Note generated for a settled trade, e.g. `Bought 1 lot of BBRI for 800000.00`.
///
/// `order_quantity` is the quantity as ordered, before lot scaling.
#[must_use]
pub fn trade_note(
    direction: OrderDirection,
    order_quantity: Quantity,
    asset_class: AssetClass,
    ticker: &Ticker,
    consideration: Money,
) -> String {
    let verb = match direction {
        OrderDirection::Buy => "Bought",
        OrderDirection::Sell => "Sold",
    };
    format!(
        "{verb} {order_quantity} {} of {ticker} for {consideration}",
        asset_class.unit_label()
    )
}

/// Note used for a cash adjustment, falling back to `<mode> Cash` with the
/// mode spelled as the caller sent it.
#[must_use]
pub fn cashflow_note(requested_mode: &str, note: Option<&str>) -> String {
    match note.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => format!("{requested_mode} Cash"),
    }
}

/// A persisted, immutable transaction log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    owner: AccountId,
    ticker: String,
    kind: TransactionKind,
    quantity: Quantity,
    base_price: Money,
    price: Money,
    fee: Money,
    notes: String,
    created_at: DateTime<Utc>,
}

impl Transaction {
    /// Materialize a new entry with its store-assigned id and timestamp.
    #[must_use]
    pub fn record(id: TransactionId, entry: NewTransaction, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            owner: entry.owner,
            ticker: entry.ticker,
            kind: entry.kind,
            quantity: entry.quantity,
            base_price: entry.base_price,
            price: entry.price,
            fee: entry.fee,
            notes: entry.notes,
            created_at,
        }
    }

    /// Entry id.
    #[must_use]
    pub const fn id(&self) -> TransactionId {
        self.id
    }

    /// Owner.
    #[must_use]
    pub const fn owner(&self) -> AccountId {
        self.owner
    }

    /// Ticker or bank source.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Entry kind.
    #[must_use]
    pub const fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Units traded.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Cost basis or cash delta.
    #[must_use]
    pub const fn base_price(&self) -> Money {
        self.base_price
    }

    /// Gross amount.
    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    /// Fee.
    #[must_use]
    pub const fn fee(&self) -> Money {
        self.fee
    }

    /// Note.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Insertion timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_price_includes_fee() {
        let tx = NewTransaction::buy(
            AccountId::new(1),
            &Ticker::new("BBRI"),
            Quantity::from_i64(100),
            Money::from_i64(800_000),
            Money::from_i64(3_000),
            String::new(),
        );
        assert_eq!(tx.kind, TransactionKind::Buy);
        assert_eq!(tx.price, Money::from_i64(803_000));
        assert_eq!(tx.base_price, Money::from_i64(800_000));
    }

    #[test]
    fn sell_base_price_is_removed_basis() {
        let tx = NewTransaction::sell(
            AccountId::new(1),
            &Ticker::new("BBRI"),
            Quantity::from_i64(100),
            Money::from_i64(850_000),
            Money::from_i64(800_000),
            Money::from_i64(3_000),
            String::new(),
        );
        assert_eq!(tx.price, Money::from_i64(850_000));
        assert_eq!(tx.base_price, Money::from_i64(800_000));
    }

    #[test]
    fn cashflow_carries_delta() {
        let tx = NewTransaction::cashflow(
            AccountId::new(1),
            "BCA",
            Money::from_i64(-250),
            Money::from_i64(5),
            "rem Cash".to_string(),
        );
        assert_eq!(tx.ticker, "BCA");
        assert!(tx.quantity.is_zero());
        assert_eq!(tx.price, Money::from_i64(-245));
    }

    #[test]
    fn trade_notes_use_order_quantity_and_unit() {
        let note = trade_note(
            OrderDirection::Buy,
            Quantity::from_i64(1),
            AssetClass::Stocks,
            &Ticker::new("bbri"),
            Money::from_i64(800_000),
        );
        assert_eq!(note, "Bought 1 lot of BBRI for 800000.00");

        let note = trade_note(
            OrderDirection::Sell,
            Quantity::from_i64(2),
            AssetClass::Crypto,
            &Ticker::new("BTC-USD"),
            Money::from_i64(10),
        );
        assert_eq!(note, "Sold 2 unit of BTC-USD for 10.00");
    }

    #[test]
    fn cashflow_note_defaults_on_blank() {
        assert_eq!(cashflow_note("add", None), "add Cash");
        assert_eq!(cashflow_note("Mod", Some("  ")), "Mod Cash");
        assert_eq!(cashflow_note("rem", Some("rent")), "rent");
    }

    #[test]
    fn record_assigns_id_and_time() {
        let now = Utc::now();
        let entry = NewTransaction::cashflow(
            AccountId::new(4),
            "BNI",
            Money::from_i64(10),
            Money::ZERO,
            "add Cash".to_string(),
        );
        let tx = Transaction::record(TransactionId::new(7), entry, now);
        assert_eq!(tx.id(), TransactionId::new(7));
        assert_eq!(tx.owner(), AccountId::new(4));
        assert_eq!(tx.created_at(), now);
        assert_eq!(tx.kind(), TransactionKind::Cashflow);
    }
}
