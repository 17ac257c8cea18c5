//! Price Oracle Adapters
//!
//! Implementations of `PriceOraclePort`.

pub mod fixed;
pub mod yahoo;

pub use fixed::StaticPriceOracle;
pub use yahoo::{YahooOracleConfig, YahooPriceOracle};
