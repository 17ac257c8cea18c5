//! Shared Domain Types
//!
//! Value objects and errors shared across the ledger.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::{AccountId, Money, Quantity, Ticker, TransactionId};
