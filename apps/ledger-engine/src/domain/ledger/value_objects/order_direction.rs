//! Order direction (buy or sell).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a settlement order.
///
/// Parsing is deliberately lenient: anything that is not recognizably `sell`
/// settles as a buy. Use [`OrderDirection::parse_lenient`] at the boundary so
/// the fallback stays visible at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    /// Acquire units, debiting cash.
    #[default]
    Buy,
    /// Dispose of units, crediting cash.
    Sell,
}

impl OrderDirection {
    /// Parse a direction, falling back to [`OrderDirection::Buy`] for any
    /// unrecognized input.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        Self::parse_strict(raw).unwrap_or_default()
    }

    /// Parse a direction case-insensitively, returning `None` when the input
    /// is neither `buy` nor `sell`.
    #[must_use]
    pub fn parse_strict(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "buy" => Some(Self::Buy),
            "sell" => Some(Self::Sell),
            _ => None,
        }
    }

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
