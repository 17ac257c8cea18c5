//! Asset class of a position.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::shared::{DomainError, Quantity};

/// Board-lot size applied to stock order quantities.
pub const STOCK_LOT_SIZE: u32 = 100;

/// Asset class of a holding. Determines lot scaling of order quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    /// Exchange-listed equities, traded in board lots.
    #[default]
    Stocks,
    /// Crypto assets, traded in units.
    Crypto,
    /// Futures contracts, traded in units.
    Futures,
}

impl AssetClass {
    /// Units per order quantity for this asset class.
    #[must_use]
    pub const fn lot_multiplier(&self) -> u32 {
        match self {
            Self::Stocks => STOCK_LOT_SIZE,
            Self::Crypto | Self::Futures => 1,
        }
    }

    /// Convert an order quantity into held units.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` for `quantity` if lot scaling overflows.
    pub fn to_units(&self, quantity: Quantity) -> Result<Quantity, DomainError> {
        quantity
            .checked_scaled_by(self.lot_multiplier())
            .ok_or_else(|| DomainError::out_of_range("quantity"))
    }

    /// Unit noun used in generated transaction notes.
    #[must_use]
    pub const fn unit_label(&self) -> &'static str {
        match self {
            Self::Stocks => "lot",
            Self::Crypto | Self::Futures => "unit",
        }
    }

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stocks => "stocks",
            Self::Crypto => "crypto",
            Self::Futures => "futures",
        }
    }
}

impl FromStr for AssetClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stocks" => Ok(Self::Stocks),
            "crypto" => Ok(Self::Crypto),
            "futures" => Ok(Self::Futures),
            other => Err(DomainError::InvalidValue {
                field: "asset_class".to_string(),
                message: format!("'{other}' is not one of stocks, crypto, futures"),
            }),
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
