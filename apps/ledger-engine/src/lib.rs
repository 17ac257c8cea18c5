// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Ledger Engine - Rust Core Library
//!
//! Position settlement and balance ledger for a portfolio tracker.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects, pure services)
//!   - `ledger`: Account, Position and Transaction aggregates, settlement and
//!     valuation arithmetic, the `LedgerStore` / `LedgerScope` traits
//!   - `shared`: Money, Quantity, Ticker and identifiers
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `PriceOraclePort`
//!   - `use_cases`: `SettleOrder`, `AdjustBalance`, `ValuatePortfolio`,
//!     `ProjectHistory`, `QuoteTicker`, `OpenAccount`
//!   - `dto`: Request and response shapes
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: In-memory ledger store with per-owner scopes
//!   - `price_oracle`: Yahoo Finance and static price tables
//!   - `http`: axum REST API

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// YAML configuration loading.
pub mod config;

/// Caller-facing error codes.
pub mod error;

/// Prometheus metrics.
pub mod observability;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::ledger::{
    Account, AssetClass, BalanceMode, LedgerError, LedgerScope, LedgerSnapshot, LedgerStore,
    OrderDirection, Position, PositionDirection, StoreError, Transaction, TransactionKind,
};
pub use domain::shared::{AccountId, Money, Quantity, Ticker, TransactionId};

// Application re-exports
pub use application::ports::{PriceOracleError, PriceOraclePort};
pub use application::use_cases::{
    AdjustBalanceUseCase, OpenAccountUseCase, ProjectHistoryUseCase, QuoteTickerUseCase,
    SettleOrderUseCase, ValuatePortfolioUseCase,
};

// Infrastructure re-exports
pub use error::{ErrorBody, ErrorCode};
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::persistence::InMemoryLedgerStore;
pub use infrastructure::price_oracle::{StaticPriceOracle, YahooOracleConfig, YahooPriceOracle};
