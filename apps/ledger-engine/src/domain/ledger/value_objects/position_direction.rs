//! Position direction tag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Long/short tag carried on a position. No short-selling mechanics hang off
/// it; every settled position is currently long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionDirection {
    /// Long holding.
    #[default]
    Long,
    /// Short holding.
    Short,
}

impl fmt::Display for PositionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "LONG"),
            Self::Short => write!(f, "SHORT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_long() {
        assert_eq!(PositionDirection::default(), PositionDirection::Long);
    }

    #[test]
    fn serde_uppercase() {
        assert_eq!(
            serde_json::to_string(&PositionDirection::Short).unwrap(),
            "\"SHORT\""
        );
        let parsed: PositionDirection = serde_json::from_str("\"LONG\"").unwrap();
        assert_eq!(parsed, PositionDirection::Long);
    }
}
