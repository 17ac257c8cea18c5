//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.
//! Mutating use cases run inside a single ledger scope; read-only ones run
//! outside any scope.

mod adjust_balance;
mod open_account;
mod pricing;
mod project_history;
mod quote_ticker;
mod scope;
mod settle_order;
mod valuate_portfolio;

pub use adjust_balance::AdjustBalanceUseCase;
pub use open_account::OpenAccountUseCase;
pub use pricing::{DEFAULT_BATCH_TIMEOUT, DEFAULT_PRICE_TIMEOUT};
pub use project_history::ProjectHistoryUseCase;
pub use quote_ticker::QuoteTickerUseCase;
pub use settle_order::SettleOrderUseCase;
pub use valuate_portfolio::ValuatePortfolioUseCase;
