//! Ticker value object for instrument identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// Minimum ticker length accepted at the boundary.
pub const MIN_TICKER_LEN: usize = 4;

/// Maximum ticker length accepted at the boundary.
pub const MAX_TICKER_LEN: usize = 10;

/// A trading ticker.
///
/// Tickers are case-insensitive identity keys, so the value is normalized to
/// uppercase on construction.
///
/// Examples: "BBRI", "TLKM", "BTC-USD"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Create a new Ticker, trimming whitespace and normalizing to uppercase.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_uppercase())
    }

    /// Get the ticker string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate the ticker.
    ///
    /// # Errors
    ///
    /// Returns error if the ticker is empty, shorter than four or longer than
    /// ten characters, or contains characters other than ASCII letters,
    /// digits, `-` and `.`.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            return Err(DomainError::InvalidValue {
                field: "ticker".to_string(),
                message: "Ticker cannot be empty".to_string(),
            });
        }

        if self.0.len() < MIN_TICKER_LEN {
            return Err(DomainError::InvalidValue {
                field: "ticker".to_string(),
                message: format!("Ticker must be at least {MIN_TICKER_LEN} characters"),
            });
        }

        if self.0.len() > MAX_TICKER_LEN {
            return Err(DomainError::InvalidValue {
                field: "ticker".to_string(),
                message: format!("Ticker exceeds maximum length of {MAX_TICKER_LEN}"),
            });
        }

        if !self
            .0
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
        {
            return Err(DomainError::InvalidValue {
                field: "ticker".to_string(),
                message: "Ticker contains invalid characters".to_string(),
            });
        }

        Ok(())
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Ticker {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Ticker {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_normalizes_case() {
        assert_eq!(Ticker::new("bbri").as_str(), "BBRI");
        assert_eq!(Ticker::new(" tlkm ").as_str(), "TLKM");
    }

    #[test]
    fn ticker_case_insensitive_identity() {
        assert_eq!(Ticker::new("bbri"), Ticker::new("BBRI"));
    }

    #[test]
    fn ticker_validate_ok() {
        assert!(Ticker::new("BBRI").validate().is_ok());
        assert!(Ticker::new("BTC-USD").validate().is_ok());
        assert!(Ticker::new("BRK.B").validate().is_ok());
    }

    #[test]
    fn ticker_validate_empty() {
        assert!(Ticker::new("  ").validate().is_err());
    }

    #[test]
    fn ticker_validate_too_short() {
        assert!(Ticker::new("BRI").validate().is_err());
        assert!(Ticker::new("ABCD").validate().is_ok());
    }

    #[test]
    fn ticker_validate_too_long() {
        assert!(Ticker::new("ABCDEFGHIJK").validate().is_err());
    }

    #[test]
    fn ticker_validate_invalid_chars() {
        assert!(Ticker::new("BB RI").validate().is_err());
        assert!(Ticker::new("BBRI$").validate().is_err());
    }

    #[test]
    fn ticker_serde_normalizes() {
        let t: Ticker = serde_json::from_str("\"bbca\"").unwrap();
        assert_eq!(t.as_str(), "BBCA");
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"BBCA\"");
    }
}
