//! Application Layer
//!
//! Orchestrates the ledger domain through use cases:
//!
//! - **Ports**: The price oracle the use cases depend on
//! - **Use Cases**: Settlement, cash adjustments, valuation, history, quotes
//! - **DTOs**: Request validation and response shapes for driver adapters

pub mod dto;
pub mod ports;
pub mod use_cases;

pub use dto::*;
pub use ports::*;
pub use use_cases::*;
