//! HTTP request parsing.
//!
//! Path segments arrive as raw strings so malformed values surface as
//! `INVALID_INPUT` bodies instead of axum's plain-text rejections.

use axum::Json;
use axum::extract::rejection::JsonRejection;

use crate::domain::ledger::{LedgerError, OrderDirection};
use crate::domain::shared::AccountId;

/// Parse the `{owner}` path segment.
///
/// # Errors
///
/// Returns `InvalidInput` if the segment is not an unsigned integer.
pub fn parse_owner(raw: &str) -> Result<AccountId, LedgerError> {
    raw.parse::<AccountId>()
        .map_err(|_| LedgerError::invalid("owner", format!("'{raw}' is not a valid account id")))
}

/// Parse the `{direction}` path segment.
///
/// Anything other than `sell` settles as a buy.
#[must_use]
pub fn parse_direction(raw: &str) -> OrderDirection {
    OrderDirection::parse_lenient(raw)
}

/// Unwrap a JSON body, mapping extractor rejections to `InvalidInput`.
///
/// # Errors
///
/// Returns `InvalidInput` carrying the rejection text.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, LedgerError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| LedgerError::invalid("body", rejection.body_text()))
}
