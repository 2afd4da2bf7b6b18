//! Error types for time and interval operations.
//!
//! This module provides:
//! - `TimeError`: Errors from instant construction and parsing
//! - `IntervalError`: Errors from duration-string parsing

use thiserror::Error;

/// Time-related errors.
///
/// # Variants
/// - `InvalidEpoch`: Epoch seconds outside the representable range
/// - `ParseError`: Failed to parse a timestamp string
///
/// # Examples
/// ```
/// use contract_core::types::TimeError;
///
/// let err = TimeError::InvalidEpoch(i64::MAX);
/// assert!(format!("{}", err).contains("out of range"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// Epoch seconds outside the representable range.
    #[error("epoch seconds out of range: {0}")]
    InvalidEpoch(i64),

    /// Failed to parse a timestamp string.
    #[error("timestamp parse error: {0}")]
    ParseError(String),
}

/// Interval-related errors.
///
/// # Variants
/// - `InvalidDuration`: A duration string such as `"5t"` or `"3h"` could not
///   be parsed
///
/// # Examples
/// ```
/// use contract_core::types::IntervalError;
///
/// let err = IntervalError::InvalidDuration("5x".to_string());
/// assert_eq!(format!("{}", err), "invalid duration: 5x");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    /// The supplied duration string is not of the form `<amount><unit>`.
    #[error("invalid duration: {0}")]
    InvalidDuration(String),
}
