//! Transaction log entry kind.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::OrderDirection;

/// Kind of a transaction log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Settled buy order.
    Buy,
    /// Settled sell order.
    Sell,
    /// Direct cash adjustment.
    Cashflow,
}

impl TransactionKind {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Cashflow => "cashflow",
        }
    }
}

impl From<OrderDirection> for TransactionKind {
    fn from(direction: OrderDirection) -> Self {
        match direction {
            OrderDirection::Buy => Self::Buy,
            OrderDirection::Sell => Self::Sell,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_direction() {
        assert_eq!(TransactionKind::from(OrderDirection::Buy), TransactionKind::Buy);
        assert_eq!(TransactionKind::from(OrderDirection::Sell), TransactionKind::Sell);
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::Cashflow).unwrap(),
            "\"cashflow\""
        );
    }
}
