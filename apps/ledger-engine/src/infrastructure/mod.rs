//! Infrastructure Layer
//!
//! This module contains all adapters (implementations) for the ports defined
//! in the application and domain layers. Following hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**: Implement ports for external systems
//!   - `persistence/`: Ledger store adapters (in-memory)
//!   - `price_oracle/`: Market price adapters (Yahoo Finance, static table)
//!
//! - **Driver Adapters (Inbound)**: Expose application to external world
//!   - `http/`: REST API controllers

pub mod http;
pub mod persistence;
pub mod price_oracle;
