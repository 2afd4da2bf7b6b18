//! Error types for contract construction and the shortcode codec.

use thiserror::Error;

use contract_core::types::{IntervalError, TimeError};

/// Categorised contract errors.
///
/// # Variants
/// - `MissingCurrency`: Decode was called without a currency
/// - `UnknownContractType`: Explicit construction named a type the catalog
///   does not carry
/// - `MissingField`: A required construction field could not be resolved
/// - `MalformedField`: A shape-matched shortcode field failed numeric parsing
/// - `MissingBarrier`: A two-barrier contract was encoded without both barriers
/// - `NegativePayout`: Payout was supplied as a negative number
/// - `InvalidDuration`: The duration string could not be parsed
/// - `Time`: An instant was out of range
///
/// # Examples
/// ```
/// use contract_model::error::ContractError;
///
/// let err = ContractError::MissingCurrency;
/// assert_eq!(
///     format!("{}", err),
///     "currency is required to decode a shortcode"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    /// Decode was called without a currency. Never recovered internally.
    #[error("currency is required to decode a shortcode")]
    MissingCurrency,

    /// Explicit construction named a contract type the catalog does not carry.
    #[error("unknown contract type: {0}")]
    UnknownContractType(String),

    /// A required construction field could not be resolved.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A shortcode field matched its grammar shape but failed numeric parsing.
    #[error("malformed {field} field: {value}")]
    MalformedField {
        /// Name of the offending field.
        field: &'static str,
        /// The raw token as it appeared in the shortcode.
        value: String,
    },

    /// A two-barrier contract was encoded without both barriers.
    #[error("two-barrier contract is missing its {0} barrier")]
    MissingBarrier(&'static str),

    /// Payout was supplied as a negative number.
    #[error("payout must be non-negative, got {0}")]
    NegativePayout(f64),

    /// The supplied duration string could not be parsed.
    #[error(transparent)]
    InvalidDuration(#[from] IntervalError),

    /// An instant was out of range or unparseable.
    #[error(transparent)]
    Time(#[from] TimeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_currency_display() {
        assert_eq!(
            format!("{}", ContractError::MissingCurrency),
            "currency is required to decode a shortcode"
        );
    }

    #[test]
    fn test_unknown_contract_type_display() {
        let err = ContractError::UnknownContractType("WIDGET".to_string());
        assert_eq!(format!("{}", err), "unknown contract type: WIDGET");
    }

    #[test]
    fn test_malformed_field_display() {
        let err = ContractError::MalformedField {
            field: "payout",
            value: "12..5".to_string(),
        };
        assert_eq!(format!("{}", err), "malformed payout field: 12..5");
    }

    #[test]
    fn test_invalid_duration_passes_through() {
        let inner = IntervalError::InvalidDuration("5x".to_string());
        let err: ContractError = inner.clone().into();
        assert_eq!(format!("{}", err), format!("{}", inner));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = ContractError::MissingCurrency;
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_clone_and_equality() {
        let err1 = ContractError::MissingBarrier("high");
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
