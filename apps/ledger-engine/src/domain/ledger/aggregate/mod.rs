//! Ledger aggregates.

mod account;
mod position;
mod transaction;

pub use account::Account;
pub use position::Position;
pub use transaction::{NewTransaction, Transaction, cashflow_note, trade_note};
