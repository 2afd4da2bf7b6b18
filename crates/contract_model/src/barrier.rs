//! Barrier transform between shortcode and numeric forms.
//!
//! Shortcodes store purely numeric barriers scaled up by a fixed
//! 1,000,000 multiplier so that forex pips survive as integers in the
//! compact string form. Relative-form tokens such as `S10P` carry their
//! own encoding and pass through unscaled, as do all barriers on
//! digit-type contracts (where the barrier is a digit prediction, not a
//! price).
//!
//! The two directions are exact inverses:
//! `to_shortcode(&from_shortcode(s, t), t) == s` for every numeric token
//! `s` and type code `t`.
//!
//! # Examples
//!
//! ```
//! use contract_model::barrier::{self, BarrierValue};
//!
//! // Numeric barriers on non-digit types are scaled down on decode
//! let value = barrier::from_shortcode("1234500", "CALL");
//! assert_eq!(value, BarrierValue::Numeric(1.2345));
//! assert_eq!(barrier::to_shortcode(&value, "CALL"), "1234500");
//!
//! // Digit predictions are never scaled
//! let digit = barrier::from_shortcode("7", "DIGITOVER");
//! assert_eq!(digit, BarrierValue::Numeric(7.0));
//!
//! // Relative forms pass through untouched
//! let relative = barrier::from_shortcode("S0P", "CALL");
//! assert_eq!(barrier::to_shortcode(&relative, "CALL"), "S0P");
//! ```

/// Fixed scaling multiplier between numeric and shortcode barrier forms.
pub const BARRIER_SCALE: f64 = 1_000_000.0;

/// A barrier in its numeric-or-opaque form.
///
/// # Variants
/// - `Numeric`: A purely numeric barrier, subject to scaling
/// - `Relative`: A relative-form or otherwise opaque token, never scaled
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum BarrierValue {
    /// A purely numeric barrier.
    Numeric(f64),
    /// A relative-form token (e.g. `S10P`) or other opaque barrier string.
    Relative(String),
}

impl BarrierValue {
    /// Classifies a barrier string without applying any scaling.
    ///
    /// Decimal-shaped tokens become [`BarrierValue::Numeric`]; everything
    /// else is carried as an opaque [`BarrierValue::Relative`] string.
    pub fn classify(raw: &str) -> Self {
        if is_decimal_token(raw) {
            if let Ok(value) = raw.parse::<f64>() {
                return BarrierValue::Numeric(value);
            }
        }
        BarrierValue::Relative(raw.to_string())
    }

    /// Returns the numeric value, if this barrier is numeric.
    #[inline]
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            BarrierValue::Numeric(value) => Some(*value),
            BarrierValue::Relative(_) => None,
        }
    }

    /// Returns the barrier in its supplied (unscaled) textual form.
    pub fn to_supplied_string(&self) -> String {
        match self {
            BarrierValue::Numeric(value) => format_decimal(*value),
            BarrierValue::Relative(token) => token.clone(),
        }
    }
}

/// Converts a shortcode barrier token to its numeric form.
///
/// Purely numeric tokens are divided by [`BARRIER_SCALE`] unless the type
/// code starts with `DIGIT`. Non-numeric tokens pass through unchanged.
pub fn from_shortcode(raw: &str, contract_type_code: &str) -> BarrierValue {
    match BarrierValue::classify(raw) {
        BarrierValue::Numeric(value) if scaling_applies(contract_type_code) => {
            BarrierValue::Numeric(value / BARRIER_SCALE)
        }
        other => other,
    }
}

/// Converts a numeric barrier back to its shortcode token. Inverse of
/// [`from_shortcode`].
pub fn to_shortcode(value: &BarrierValue, contract_type_code: &str) -> String {
    match value {
        BarrierValue::Numeric(numeric) if scaling_applies(contract_type_code) => {
            format_decimal(numeric * BARRIER_SCALE)
        }
        BarrierValue::Numeric(numeric) => format_decimal(*numeric),
        BarrierValue::Relative(token) => token.clone(),
    }
}

/// Returns whether a token is a relative-form barrier (`S-?\d+P`).
pub fn is_relative_token(token: &str) -> bool {
    let Some(inner) = token.strip_prefix('S').and_then(|t| t.strip_suffix('P')) else {
        return false;
    };
    let digits = inner.strip_prefix('-').unwrap_or(inner);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Returns whether barrier scaling applies for the given type code.
fn scaling_applies(contract_type_code: &str) -> bool {
    !contract_type_code.starts_with("DIGIT")
}

/// Returns whether a token has plain signed-decimal shape.
fn is_decimal_token(token: &str) -> bool {
    let unsigned = token
        .strip_prefix('-')
        .or_else(|| token.strip_prefix('+'))
        .unwrap_or(token);
    !unsigned.is_empty()
        && unsigned.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && unsigned.bytes().filter(|&b| b == b'.').count() <= 1
        && unsigned.bytes().any(|b| b.is_ascii_digit())
}

/// Formats a decimal rounded to six places with trailing zeros trimmed.
pub(crate) fn format_decimal(value: f64) -> String {
    let mut formatted = format!("{:.6}", value);
    while formatted.ends_with('0') {
        formatted.pop();
    }
    if formatted.ends_with('.') {
        formatted.pop();
    }
    formatted
}
