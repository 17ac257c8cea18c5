//! Errors raised by value objects and aggregates when a rule is broken.

use thiserror::Error;

/// A value or aggregate rule failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A field value is out of range or malformed.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name as seen by the caller.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// A state transition would break an aggregate invariant.
    #[error("Invariant violation in {aggregate}: {invariant} (state: {state})")]
    InvariantViolation {
        /// Aggregate name.
        aggregate: String,
        /// The invariant that would break.
        invariant: String,
        /// Relevant state at the time.
        state: String,
    },
}

impl DomainError {
    /// Shorthand for [`DomainError::InvalidValue`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// A value whose arithmetic would leave the representable decimal range.
    pub fn out_of_range(field: impl Into<String>) -> Self {
        Self::invalid(field, "out of representable range")
    }
}
