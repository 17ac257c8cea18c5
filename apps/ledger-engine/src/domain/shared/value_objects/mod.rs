//! Shared Value Objects
//!
//! Immutable domain types used across the ledger.
//! Value objects are compared by value, not identity.

mod identifiers;
mod money;
mod quantity;
mod ticker;

pub use identifiers::{AccountId, TransactionId};
pub use money::Money;
pub use quantity::Quantity;
pub use ticker::{MAX_TICKER_LEN, MIN_TICKER_LEN, Ticker};
