//! Application Ports (Driver and Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! - **Driven Ports** (Secondary/Outbound): How our application uses external systems
//!
//! The ledger store abstraction lives with the domain
//! ([`crate::domain::ledger::repository`]); the price oracle is the only
//! application-level driven port.

mod price_oracle_port;

pub use price_oracle_port::{PriceOracleError, PriceOraclePort};
