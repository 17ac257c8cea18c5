//! Ledger value objects.

mod asset_class;
mod balance_mode;
mod order_direction;
mod position_direction;
mod transaction_kind;

pub use asset_class::{AssetClass, STOCK_LOT_SIZE};
pub use balance_mode::BalanceMode;
pub use order_direction::OrderDirection;
pub use position_direction::PositionDirection;
pub use transaction_kind::TransactionKind;
