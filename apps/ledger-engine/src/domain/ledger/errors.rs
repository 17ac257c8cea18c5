//! Ledger errors.
//!
//! The caller-facing taxonomy for every ledger operation. Business-rule
//! violations abort the enclosing scope with one of these variants; store
//! failures are folded into [`LedgerError::Internal`].

use thiserror::Error;

use super::repository::StoreError;
use crate::domain::shared::{AccountId, DomainError, Money, Quantity, Ticker};

/// Errors returned by settlement, balance adjustment, valuation and history.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Request failed boundary validation.
    #[error("invalid {field}: {message}")]
    InvalidInput {
        /// Offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// The price oracle does not know the ticker.
    #[error("item not found: {ticker}")]
    ItemNotFound {
        /// Unknown ticker.
        ticker: String,
    },

    /// Sell quantity exceeds the held quantity (or nothing is held).
    #[error("insufficient amount of {ticker}: requested {requested}, held {held}")]
    InsufficientAmount {
        /// Ticker being sold.
        ticker: Ticker,
        /// Units requested (after lot scaling).
        requested: Quantity,
        /// Units currently held.
        held: Quantity,
    },

    /// Cash balance cannot cover the operation.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Cash the operation needs.
        required: Money,
        /// Cash on hand.
        available: Money,
    },

    /// Stored position belongs to a different owner than the order.
    #[error("mismatched info for {ticker}: position owned by {position_owner}, order from {order_owner}")]
    MismatchedInfo {
        /// Ticker of the position.
        ticker: Ticker,
        /// Owner recorded on the position.
        position_owner: AccountId,
        /// Owner placing the order.
        order_owner: AccountId,
    },

    /// No account exists for the owner.
    #[error("account not found: {owner}")]
    AccountNotFound {
        /// Requested owner.
        owner: AccountId,
    },

    /// An account with this id already exists.
    #[error("account already exists: {owner}")]
    AlreadyExists {
        /// Duplicate owner id.
        owner: AccountId,
    },

    /// Store or collaborator failure, surfaced verbatim.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Build an [`LedgerError::InvalidInput`].
    #[must_use]
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the error is a business-rule rejection rather than a fault.
    #[must_use]
    pub const fn is_business_rule(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AccountNotFound(owner) => Self::AccountNotFound { owner },
            StoreError::AlreadyExists(owner) => Self::AlreadyExists { owner },
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<DomainError> for LedgerError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidValue { field, message } => Self::InvalidInput { field, message },
            invariant @ DomainError::InvariantViolation { .. } => {
                Self::Internal(invariant.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_account_not_found_stays_distinct() {
        let err = LedgerError::from(StoreError::AccountNotFound(AccountId::new(3)));
        assert_eq!(
            err,
            LedgerError::AccountNotFound {
                owner: AccountId::new(3)
            }
        );
    }

    #[test]
    fn store_backend_becomes_internal() {
        let err = LedgerError::from(StoreError::Backend("disk full".to_string()));
        assert!(matches!(err, LedgerError::Internal(ref msg) if msg.contains("disk full")));
        assert!(!err.is_business_rule());
    }

    #[test]
    fn domain_invalid_value_becomes_invalid_input() {
        let err = LedgerError::from(DomainError::InvalidValue {
            field: "fee".to_string(),
            message: "cannot be negative".to_string(),
        });
        assert_eq!(err.to_string(), "invalid fee: cannot be negative");
    }

    #[test]
    fn insufficient_balance_display() {
        let err = LedgerError::InsufficientBalance {
            required: Money::from_i64(803_000),
            available: Money::from_i64(500_000),
        };
        assert_eq!(
            err.to_string(),
            "insufficient balance: required 803000.00, available 500000.00"
        );
    }
}
