//! Strongly-typed identifiers for domain entities.
//!
//! These prevent mixing up IDs from different contexts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create a new identifier from its numeric value.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Get the inner numeric value.
            #[must_use]
            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self)
            }
        }
    };
}

define_id!(AccountId, "Unique identifier for an account (the ledger owner).");
define_id!(
    TransactionId,
    "Identifier of a transaction log entry, assigned in insertion order."
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_display() {
        let id = AccountId::new(42);
        assert_eq!(format!("{id}"), "42");
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn account_id_parse() {
        let id: AccountId = " 7 ".parse().unwrap();
        assert_eq!(id, AccountId::new(7));
        assert!("abc".parse::<AccountId>().is_err());
    }

    #[test]
    fn transaction_ids_order_by_value() {
        assert!(TransactionId::new(1) < TransactionId::new(2));
    }

    #[test]
    fn id_serde_is_transparent() {
        let json = serde_json::to_string(&AccountId::new(9)).unwrap();
        assert_eq!(json, "9");
        let parsed: TransactionId = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, TransactionId::new(12));
    }
}
