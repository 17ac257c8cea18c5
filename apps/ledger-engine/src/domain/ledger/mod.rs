//! Ledger Bounded Context
//!
//! Cash balances, positions and the append-only transaction log.
//!
//! # Invariants
//!
//! - An owner's cash balance is never negative after a committed operation.
//! - At most one position per (owner, ticker); a position that reaches zero
//!   units is deleted.
//! - A position's remaining cost basis equals its buy contributions minus the
//!   basis removed by sells; a full sell removes the basis exactly.
//! - Balance, position and log entry of one operation commit together or not
//!   at all.

pub mod aggregate;
pub mod errors;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{Account, NewTransaction, Position, Transaction};
pub use errors::LedgerError;
pub use repository::{LedgerScope, LedgerSnapshot, LedgerStore, StoreError};
pub use value_objects::{
    AssetClass, BalanceMode, OrderDirection, PositionDirection, STOCK_LOT_SIZE, TransactionKind,
};
