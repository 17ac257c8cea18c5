//! Caller-facing error codes for the ledger engine.
//!
//! Every [`LedgerError`] maps to a stable [`ErrorCode`] whose reason string
//! is part of the API contract, and to an HTTP status.
//!
//! # HTTP Status Codes
//!
//! | Code | Status | Usage |
//! |------|--------|-------|
//! | `INVALID_INPUT` | 400 | Malformed or out-of-range request field |
//! | `ITEM_NOT_FOUND` | 404 | Ticker unknown to the price oracle |
//! | `ACCOUNT_NOT_FOUND` | 404 | No account for the owner |
//! | `ALREADY_EXISTS` | 409 | Duplicate account id |
//! | `MISMATCHED_INFO` | 409 | Position owned by another account |
//! | `INSUFFICIENT_AMOUNT` | 422 | Selling more than held |
//! | `INSUFFICIENT_BALANCE` | 422 | Cash cannot cover the operation |
//! | `INTERNAL_ERROR` | 500 | Store or oracle failure |

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::ledger::LedgerError;

/// Error codes for the ledger engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request failed validation.
    InvalidInput,
    /// Ticker unknown to the oracle.
    ItemNotFound,
    /// Account does not exist.
    AccountNotFound,
    /// Account id already taken.
    AlreadyExists,
    /// Position owner does not match the order owner.
    MismatchedInfo,
    /// Not enough units held.
    InsufficientAmount,
    /// Not enough cash.
    InsufficientBalance,
    /// Unexpected failure.
    InternalError,
}

impl ErrorCode {
    /// HTTP status for this error.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::ItemNotFound | Self::AccountNotFound => StatusCode::NOT_FOUND,
            Self::AlreadyExists | Self::MismatchedInfo => StatusCode::CONFLICT,
            Self::InsufficientAmount | Self::InsufficientBalance => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::ItemNotFound => "ITEM_NOT_FOUND",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::MismatchedInfo => "MISMATCHED_INFO",
            Self::InsufficientAmount => "INSUFFICIENT_AMOUNT",
            Self::InsufficientBalance => "INSUFFICIENT_BALANCE",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Lowercase label for metrics.
    #[must_use]
    pub const fn metric_label(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::ItemNotFound => "item_not_found",
            Self::AccountNotFound => "account_not_found",
            Self::AlreadyExists => "already_exists",
            Self::MismatchedInfo => "mismatched_info",
            Self::InsufficientAmount => "insufficient_amount",
            Self::InsufficientBalance => "insufficient_balance",
            Self::InternalError => "internal_error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

impl From<&LedgerError> for ErrorCode {
    fn from(err: &LedgerError) -> Self {
        match err {
            LedgerError::InvalidInput { .. } => Self::InvalidInput,
            LedgerError::ItemNotFound { .. } => Self::ItemNotFound,
            LedgerError::InsufficientAmount { .. } => Self::InsufficientAmount,
            LedgerError::InsufficientBalance { .. } => Self::InsufficientBalance,
            LedgerError::MismatchedInfo { .. } => Self::MismatchedInfo,
            LedgerError::AccountNotFound { .. } => Self::AccountNotFound,
            LedgerError::AlreadyExists { .. } => Self::AlreadyExists,
            LedgerError::Internal(_) => Self::InternalError,
        }
    }
}

/// JSON error body returned by the HTTP adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

impl From<&LedgerError> for ErrorBody {
    fn from(err: &LedgerError) -> Self {
        Self {
            code: ErrorCode::from(err),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::{AccountId, Money};

    #[test]
    fn reason_matches_serde_name() {
        let json = serde_json::to_string(&ErrorCode::InsufficientBalance).unwrap();
        assert_eq!(json, format!("\"{}\"", ErrorCode::InsufficientBalance.reason()));
    }

    #[test]
    fn status_mapping() {
        assert_eq!(ErrorCode::InvalidInput.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::ItemNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::InsufficientAmount.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn body_from_ledger_error() {
        let err = LedgerError::InsufficientBalance {
            required: Money::from_i64(10),
            available: Money::from_i64(5),
        };
        let body = ErrorBody::from(&err);
        assert_eq!(body.code, ErrorCode::InsufficientBalance);
        assert!(body.message.contains("insufficient balance"));

        let body = ErrorBody::from(&LedgerError::AccountNotFound {
            owner: AccountId::new(9),
        });
        assert_eq!(body.code.http_status(), StatusCode::NOT_FOUND);
    }
}
