//! Ledger domain services.
//!
//! Stateless computations over aggregates. The application layer runs them
//! inside a store scope and applies the result.

mod balance;
mod history;
mod settlement;
mod valuation;

pub use balance::plan_adjustment;
pub use history::{TransactionView, project};
pub use settlement::{
    PositionChange, SettlementOrder, SettlementPlan, plan_buy, plan_sell, plan_settlement,
};
pub use valuation::{PortfolioValuation, PositionValuation, valuate, value_position};
