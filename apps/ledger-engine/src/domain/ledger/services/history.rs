//! Transaction history projection.
//!
//! Derives per-unit price and realized P&L from stored log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ledger::aggregate::Transaction;
use crate::domain::ledger::value_objects::TransactionKind;
use crate::domain::shared::{Money, Quantity, TransactionId};

/// Display form of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionView {
    /// Entry id.
    pub id: TransactionId,
    /// Ticker or bank source.
    pub ticker: String,
    /// Entry kind.
    pub kind: TransactionKind,
    /// Units traded.
    pub quantity: Quantity,
    /// Cost basis or cash delta.
    pub base_price: Money,
    /// Gross amount.
    pub price: Money,
    /// Fee.
    pub fee: Money,
    /// `base_price / quantity`; zero for cash entries.
    pub price_per_unit: Money,
    /// `price - base_price - fee` for sells; zero otherwise.
    pub realized_pnl: Money,
    /// Note.
    pub notes: String,
    /// Insertion time.
    pub created_at: DateTime<Utc>,
}

impl From<&Transaction> for TransactionView {
    fn from(tx: &Transaction) -> Self {
        let price_per_unit = if tx.kind() == TransactionKind::Cashflow || tx.quantity().is_zero() {
            Money::ZERO
        } else {
            tx.base_price()
                .amount()
                .checked_div(tx.quantity().amount())
                .map_or(Money::ZERO, Money::new)
        };
        let realized_pnl = if tx.kind() == TransactionKind::Sell {
            tx.price() - tx.base_price() - tx.fee()
        } else {
            Money::ZERO
        };

        Self {
            id: tx.id(),
            ticker: tx.ticker().to_string(),
            kind: tx.kind(),
            quantity: tx.quantity(),
            base_price: tx.base_price(),
            price: tx.price(),
            fee: tx.fee(),
            price_per_unit,
            realized_pnl,
            notes: tx.notes().to_string(),
            created_at: tx.created_at(),
        }
    }
}

/// Project entries in their stored order.
#[must_use]
pub fn project(transactions: &[Transaction]) -> Vec<TransactionView> {
    transactions.iter().map(TransactionView::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::aggregate::NewTransaction;
    use crate::domain::shared::{AccountId, Ticker};

    fn record(id: u64, entry: NewTransaction) -> Transaction {
        Transaction::record(TransactionId::new(id), entry, Utc::now())
    }

    #[test]
    fn sell_realizes_pnl() {
        let tx = record(
            2,
            NewTransaction::sell(
                AccountId::new(1),
                &Ticker::new("BBRI"),
                Quantity::from_i64(100),
                Money::from_i64(850_000),
                Money::from_i64(800_000),
                Money::from_i64(3_000),
                String::new(),
            ),
        );
        let view = TransactionView::from(&tx);
        assert_eq!(view.realized_pnl, Money::from_i64(47_000));
        assert_eq!(view.price_per_unit, Money::from_i64(8_000));
    }

    #[test]
    fn buy_and_cashflow_have_no_realized_pnl() {
        let rows = project(&[
            record(
                1,
                NewTransaction::buy(
                    AccountId::new(1),
                    &Ticker::new("BBRI"),
                    Quantity::from_i64(100),
                    Money::from_i64(800_000),
                    Money::from_i64(3_000),
                    String::new(),
                ),
            ),
            record(
                2,
                NewTransaction::cashflow(
                    AccountId::new(1),
                    "BCA",
                    Money::from_i64(5_000),
                    Money::ZERO,
                    "add Cash".to_string(),
                ),
            ),
        ]);
        assert_eq!(rows[0].realized_pnl, Money::ZERO);
        assert_eq!(rows[0].price_per_unit, Money::from_i64(8_000));
        assert_eq!(rows[1].price_per_unit, Money::ZERO);
        assert_eq!(rows[1].realized_pnl, Money::ZERO);
        assert_eq!(rows[1].id, TransactionId::new(2));
    }
}
