//! Persistence Adapters
//!
//! Implementations of the ledger store traits.

pub mod in_memory;

pub use in_memory::InMemoryLedgerStore;
