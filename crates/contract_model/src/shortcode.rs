//! Shortcode codec.
//!
//! A shortcode is the canonical delimited string encoding of a contract:
//! fields joined by `_`, upper-cased. Two grammars are in circulation,
//! tried in order:
//!
//! ```text
//! TYPE_SYMBOL_PAYOUT_STARTEPOCH[F]_EXPIRY[F|T]_BARRIER1_BARRIER2   // barriered
//! TYPE_SYMBOL_PAYOUT_STARTEPOCH_COUNT[T]                           // barrierless
//! ```
//!
//! `F` on the start epoch marks a forward-starting contract; `F` on the
//! expiry marks a fixed (absolute-date) expiry; `T` marks a tick count
//! instead of an expiry timestamp. Underlying symbols may themselves
//! contain `_` (e.g. volatility indices), so grammars anchor their fixed
//! fields from both ends of the token list and give the symbol whatever
//! remains in the middle.
//!
//! Shortcodes that fit neither grammar, name an unknown type, or carry the
//! old `_<digits>H<digits>` session marker decode to a fixed legacy
//! placeholder record rather than an error, so historical contracts stay
//! representable for auditing and display.
//!
//! # Examples
//!
//! ```
//! use contract_model::shortcode;
//!
//! let params = shortcode::decode("CALL_frxUSDJPY_100_1000F_2000_S0P_0", "USD").unwrap();
//! assert_eq!(params.code, "CALL");
//! assert!(params.starts_as_forward_starting);
//! assert_eq!(params.date_start.unwrap().epoch(), 1000);
//!
//! let legacy = shortcode::decode("UNKNOWNTYPE_frxUSDJPY_100_123_456", "USD").unwrap();
//! assert!(legacy.is_legacy());
//! ```

use std::fmt;

use tracing::debug;

use contract_core::types::Instant;

use crate::barrier::{self, BarrierValue};
use crate::catalog;
use crate::contract::Contract;
use crate::error::ContractError;

/// Type code of the legacy placeholder record.
pub const LEGACY_TYPE_CODE: &str = "Invalid";

/// Underlying symbol of the legacy placeholder record.
pub const LEGACY_UNDERLYING_SYMBOL: &str = "config";

/// How the monetary amount of a contract is quoted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AmountType {
    /// The amount is the payout on a win. Shortcodes always quote payout.
    #[default]
    Payout,
    /// The amount is the stake paid up front.
    Stake,
}

impl fmt::Display for AmountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountType::Payout => write!(f, "payout"),
            AmountType::Stake => write!(f, "stake"),
        }
    }
}

/// Contract construction parameters, as produced by [`decode`].
///
/// This record feeds contract construction; it is not itself the contract.
/// Unrecognised shortcodes produce the legacy placeholder (check with
/// [`ContractParams::is_legacy`]) instead of failing.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractParams {
    /// Canonical contract type code, or `Invalid` for the legacy placeholder.
    pub code: String,
    /// Underlying asset symbol.
    pub underlying_symbol: String,
    /// Payment currency. Always present.
    pub currency: String,
    /// How `amount` is quoted.
    pub amount_type: AmountType,
    /// The quoted amount.
    pub amount: Option<f64>,
    /// Contract start instant.
    pub date_start: Option<Instant>,
    /// Contract expiry instant, for timestamp-expiry contracts.
    pub date_expiry: Option<Instant>,
    /// Whether the expiry was quoted as an absolute date.
    pub fixed_expiry: bool,
    /// Whether the contract expires after a tick count.
    pub tick_expiry: bool,
    /// Number of ticks to expiry, for tick-expiry contracts.
    pub tick_count: Option<u32>,
    /// Whether the shortcode carried the forward-starting marker.
    pub starts_as_forward_starting: bool,
    /// Single barrier, in numeric form.
    pub barrier: Option<BarrierValue>,
    /// High barrier, in numeric form.
    pub high_barrier: Option<BarrierValue>,
    /// Low barrier, in numeric form.
    pub low_barrier: Option<BarrierValue>,
}

impl ContractParams {
    /// The fixed placeholder record for unrecognised or legacy shortcodes.
    pub fn legacy(currency: &str) -> Self {
        ContractParams {
            code: LEGACY_TYPE_CODE.to_string(),
            underlying_symbol: LEGACY_UNDERLYING_SYMBOL.to_string(),
            currency: currency.to_string(),
            ..Default::default()
        }
    }

    /// Returns whether this record is the legacy placeholder.
    ///
    /// Downstream code must check this before relying on full contract
    /// semantics.
    #[inline]
    pub fn is_legacy(&self) -> bool {
        self.code == LEGACY_TYPE_CODE
    }
}

/// Resolves deprecated type codes to their canonical equivalents.
fn canonical_type_code(code: &str) -> &str {
    match code {
        "INTRADU" | "FLASHU" | "DOUBLEUP" => "CALL",
        "INTRADD" | "FLASHD" | "DOUBLEDOWN" => "PUT",
        other => other,
    }
}

/// Detects the `_<digits>H<digits>` marker used by pre-epoch shortcodes.
fn has_legacy_hour_marker(shortcode: &str) -> bool {
    let bytes = shortcode.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'_' {
            continue;
        }
        let mut j = i + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j == i + 1 || j >= bytes.len() || bytes[j] != b'H' {
            continue;
        }
        let mut k = j + 1;
        while k < bytes.len() && bytes[k].is_ascii_digit() {
            k += 1;
        }
        if k > j + 1 {
            return true;
        }
    }
    false
}

/// Expiry field of a barriered shortcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExpiryField {
    /// Expiry timestamp, optionally marked fixed.
    Epoch {
        /// Seconds since the Unix epoch.
        epoch: i64,
        /// Whether the `F` fixed-expiry marker was present.
        fixed: bool,
    },
    /// Tick count with the `T` marker.
    Ticks(u32),
}

/// Fields captured by the barriered grammar.
#[derive(Debug, Clone, PartialEq)]
struct BarrieredFields {
    symbol: String,
    payout: f64,
    start_epoch: i64,
    forward_start: bool,
    expiry: ExpiryField,
    barrier1: String,
    barrier2: String,
}

/// Fields captured by the barrierless grammar.
#[derive(Debug, Clone, PartialEq)]
struct BarrierlessFields {
    symbol: String,
    payout: f64,
    start_epoch: i64,
    /// Tick count when the trailing field carried the `T` marker; `None`
    /// when the field was untagged (validated but inert).
    ticks: Option<u32>,
}

/// Result of the ordered grammar dispatch.
#[derive(Debug, Clone, PartialEq)]
enum GrammarMatch {
    Barriered(BarrieredFields),
    Barrierless(BarrierlessFields),
}

/// Returns whether a token has unsigned decimal shape (`\d*\.?\d*` with at
/// least one digit).
fn is_unsigned_decimal(token: &str) -> bool {
    !token.is_empty()
        && token.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && token.bytes().filter(|&b| b == b'.').count() <= 1
        && token.bytes().any(|b| b.is_ascii_digit())
}

/// Splits a token into leading digits and an optional single-letter suffix.
/// Returns `None` if the token has any other shape.
fn split_digits_suffix(token: &str) -> Option<(&str, Option<u8>)> {
    let bytes = token.as_bytes();
    let digits_end = bytes
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(bytes.len());
    if digits_end == 0 {
        return None;
    }
    match bytes.len() - digits_end {
        0 => Some((token, None)),
        1 => Some((&token[..digits_end], Some(bytes[digits_end]))),
        _ => None,
    }
}

fn parse_epoch(digits: &str, field: &'static str) -> Result<i64, ContractError> {
    digits.parse().map_err(|_| ContractError::MalformedField {
        field,
        value: digits.to_string(),
    })
}

fn parse_ticks(digits: &str) -> Result<u32, ContractError> {
    digits.parse().map_err(|_| ContractError::MalformedField {
        field: "tick_count",
        value: digits.to_string(),
    })
}

fn parse_payout(token: &str) -> Result<f64, ContractError> {
    token.parse().map_err(|_| ContractError::MalformedField {
        field: "payout",
        value: token.to_string(),
    })
}

/// Matches the barriered grammar. Fixed fields anchor from both ends of
/// the token list; the symbol takes the remainder.
fn match_barriered(tokens: &[&str]) -> Result<Option<GrammarMatch>, ContractError> {
    let n = tokens.len();
    if n < 7 {
        return Ok(None);
    }
    let payout_token = tokens[n - 5];
    let start_token = tokens[n - 4];
    let expiry_token = tokens[n - 3];
    let barrier1 = tokens[n - 2];
    let barrier2 = tokens[n - 1];

    if !is_unsigned_decimal(payout_token) || barrier1.is_empty() || barrier2.is_empty() {
        return Ok(None);
    }
    let Some((start_digits, start_suffix)) = split_digits_suffix(start_token) else {
        return Ok(None);
    };
    let forward_start = match start_suffix {
        None => false,
        Some(b'F') => true,
        Some(_) => return Ok(None),
    };
    let Some((expiry_digits, expiry_suffix)) = split_digits_suffix(expiry_token) else {
        return Ok(None);
    };
    let expiry = match expiry_suffix {
        None => ExpiryField::Epoch {
            epoch: parse_epoch(expiry_digits, "date_expiry")?,
            fixed: false,
        },
        Some(b'F') => ExpiryField::Epoch {
            epoch: parse_epoch(expiry_digits, "date_expiry")?,
            fixed: true,
        },
        Some(b'T') => ExpiryField::Ticks(parse_ticks(expiry_digits)?),
        Some(_) => return Ok(None),
    };

    Ok(Some(GrammarMatch::Barriered(BarrieredFields {
        symbol: tokens[1..n - 5].join("_"),
        payout: parse_payout(payout_token)?,
        start_epoch: parse_epoch(start_digits, "date_start")?,
        forward_start,
        expiry,
        barrier1: barrier1.to_string(),
        barrier2: barrier2.to_string(),
    })))
}

/// Matches the barrierless grammar. The trailing untagged field is
/// validated but carries no meaning.
fn match_barrierless(tokens: &[&str]) -> Result<Option<GrammarMatch>, ContractError> {
    let n = tokens.len();
    if n < 5 {
        return Ok(None);
    }
    let payout_token = tokens[n - 3];
    let start_token = tokens[n - 2];
    let trailing_token = tokens[n - 1];

    if !is_unsigned_decimal(payout_token) {
        return Ok(None);
    }
    if !start_token.bytes().all(|b| b.is_ascii_digit()) || start_token.is_empty() {
        return Ok(None);
    }
    let Some((trailing_digits, trailing_suffix)) = split_digits_suffix(trailing_token) else {
        return Ok(None);
    };
    let ticks = match trailing_suffix {
        None => {
            // Format validation only; the untagged value is inert.
            parse_epoch(trailing_digits, "expiry_field")?;
            None
        }
        Some(b'T') => Some(parse_ticks(trailing_digits)?),
        Some(_) => return Ok(None),
    };

    Ok(Some(GrammarMatch::Barrierless(BarrierlessFields {
        symbol: tokens[1..n - 3].join("_"),
        payout: parse_payout(payout_token)?,
        start_epoch: parse_epoch(start_token, "date_start")?,
        ticks,
    })))
}

/// Ordered grammar dispatch: barriered first, then barrierless.
fn match_grammar(shortcode: &str) -> Result<Option<GrammarMatch>, ContractError> {
    let tokens: Vec<&str> = shortcode.split('_').collect();
    if tokens.len() < 2 || tokens[0].is_empty() || tokens[1..].iter().any(|t| t.is_empty()) {
        return Ok(None);
    }
    if let Some(matched) = match_barriered(&tokens)? {
        return Ok(Some(matched));
    }
    match_barrierless(&tokens)
}

/// Decodes a shortcode into contract construction parameters.
///
/// # Arguments
/// * `shortcode` - The delimited contract encoding
/// * `currency` - Payment currency; must be non-empty
///
/// # Returns
/// The decoded [`ContractParams`], or the legacy placeholder when the
/// shortcode names an unknown type or fits no grammar. Fails with
/// [`ContractError::MissingCurrency`] when `currency` is empty, and with
/// [`ContractError::MalformedField`] when a shape-matched numeric field
/// cannot be parsed.
///
/// # Examples
///
/// ```
/// use contract_model::shortcode;
///
/// let params = shortcode::decode("DIGITOVER_R_50_10_5T", "USD").unwrap();
/// assert!(params.tick_expiry);
/// assert_eq!(params.tick_count, Some(5));
/// ```
pub fn decode(shortcode: &str, currency: &str) -> Result<ContractParams, ContractError> {
    if currency.is_empty() {
        return Err(ContractError::MissingCurrency);
    }

    let leading = shortcode.split('_').next().unwrap_or("");
    let canonical = canonical_type_code(leading);

    if catalog::lookup(canonical).is_none() || has_legacy_hour_marker(shortcode) {
        debug!("unrecognised shortcode '{}', using legacy placeholder", shortcode);
        return Ok(ContractParams::legacy(currency));
    }

    let Some(matched) = match_grammar(shortcode)? else {
        debug!("no grammar matched '{}', using legacy placeholder", shortcode);
        return Ok(ContractParams::legacy(currency));
    };

    match matched {
        GrammarMatch::Barriered(fields) => barriered_params(fields, canonical, currency),
        GrammarMatch::Barrierless(fields) => barrierless_params(fields, canonical, currency),
    }
}

fn barriered_params(
    fields: BarrieredFields,
    canonical: &str,
    currency: &str,
) -> Result<ContractParams, ContractError> {
    let mut params = ContractParams {
        code: canonical.to_string(),
        underlying_symbol: fields.symbol,
        currency: currency.to_string(),
        amount_type: AmountType::Payout,
        amount: Some(fields.payout),
        date_start: Some(Instant::from_epoch(fields.start_epoch)?),
        starts_as_forward_starting: fields.forward_start,
        ..Default::default()
    };

    match fields.expiry {
        ExpiryField::Ticks(count) => {
            params.tick_expiry = true;
            params.tick_count = Some(count);
        }
        ExpiryField::Epoch { epoch, fixed } => {
            params.date_expiry = Some(Instant::from_epoch(epoch)?);
            params.fixed_expiry = fixed;
        }
    }

    // A literal `0` second barrier is the filler the encoder writes for
    // single-barrier contracts.
    if fields.barrier2 != "0" {
        params.high_barrier = Some(barrier::from_shortcode(&fields.barrier1, canonical));
        params.low_barrier = Some(barrier::from_shortcode(&fields.barrier2, canonical));
    } else {
        params.barrier = Some(barrier::from_shortcode(&fields.barrier1, canonical));
    }

    Ok(params)
}

fn barrierless_params(
    fields: BarrierlessFields,
    canonical: &str,
    currency: &str,
) -> Result<ContractParams, ContractError> {
    let mut params = ContractParams {
        code: canonical.to_string(),
        underlying_symbol: fields.symbol,
        currency: currency.to_string(),
        amount_type: AmountType::Payout,
        amount: Some(fields.payout),
        date_start: Some(Instant::from_epoch(fields.start_epoch)?),
        ..Default::default()
    };

    if let Some(count) = fields.ticks {
        params.tick_expiry = true;
        params.tick_count = Some(count);
    }

    Ok(params)
}

/// Encodes a contract into its canonical shortcode.
///
/// # Returns
/// The upper-cased, `_`-joined encoding. Fails with
/// [`ContractError::MissingBarrier`] if a two-barrier contract is missing
/// either barrier.
///
/// # Examples
///
/// ```
/// use contract_core::clock::FixedClock;
/// use contract_core::types::Instant;
/// use contract_model::contract::ContractBuilder;
/// use contract_model::shortcode;
///
/// let clock = FixedClock::new(Instant::from_epoch(1_000).unwrap());
/// let contract = ContractBuilder::new()
///     .contract_type("CALL")
///     .underlying_symbol("frxUSDJPY")
///     .currency("USD")
///     .payout(100.0)
///     .duration("5t")
///     .barrier("S0P")
///     .build_with_clock(&clock)
///     .unwrap();
///
/// assert_eq!(
///     shortcode::encode(&contract).unwrap(),
///     "CALL_FRXUSDJPY_100_1000_5T_S0P_0"
/// );
/// ```
pub fn encode(contract: &Contract) -> Result<String, ContractError> {
    let meta = contract.metadata();

    let forward = contract.is_forward_starting() || contract.starts_as_forward_starting();
    let start_field = format!(
        "{}{}",
        contract.date_start().epoch(),
        if forward { "F" } else { "" }
    );

    let expiry_field = if contract.is_tick_expiry() {
        let count = contract
            .tick_count()
            .ok_or(ContractError::MissingField("tick_count"))?;
        format!("{}T", count)
    } else {
        let expiry = contract
            .date_expiry()
            .ok_or(ContractError::MissingField("date_expiry"))?;
        format!(
            "{}{}",
            expiry.epoch(),
            if contract.fixed_expiry() { "F" } else { "" }
        )
    };

    let mut fields = vec![
        contract.contract_type_code().to_string(),
        contract.underlying_symbol().to_string(),
        barrier::format_decimal(contract.payout().unwrap_or(0.0)),
        start_field,
        expiry_field,
    ];

    if meta.two_barriers() {
        let high = contract
            .supplied_high_barrier()
            .ok_or(ContractError::MissingBarrier("high"))?;
        let low = contract
            .supplied_low_barrier()
            .ok_or(ContractError::MissingBarrier("low"))?;
        fields.push(barrier::to_shortcode(&BarrierValue::classify(high), meta.code));
        fields.push(barrier::to_shortcode(&BarrierValue::classify(low), meta.code));
    } else if let Some(single) = contract.supplied_barrier() {
        if meta.barrier_at_start {
            fields.push(barrier::to_shortcode(&BarrierValue::classify(single), meta.code));
            fields.push("0".to_string());
        }
    }

    Ok(fields.join("_").to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_currency_is_fatal() {
        let result = decode("CALL_frxUSDJPY_100_1000_2000_S0P_0", "");
        assert_eq!(result.unwrap_err(), ContractError::MissingCurrency);
    }

    #[test]
    fn test_unknown_type_yields_legacy_placeholder() {
        let params = decode("UNKNOWNTYPE_frxUSDJPY_100_123_456", "USD").unwrap();
        assert!(params.is_legacy());
        assert_eq!(params.code, "Invalid");
        assert_eq!(params.underlying_symbol, "config");
        assert_eq!(params.currency, "USD");
    }

    #[test]
    fn test_hour_marker_yields_legacy_placeholder() {
        let params = decode("CALL_frxUSDJPY_100_1Jan07_10H11", "USD").unwrap();
        assert!(params.is_legacy());
    }

    #[test]
    fn test_no_grammar_match_yields_legacy_placeholder() {
        // Known type, but too few fields for either grammar
        let params = decode("CALL_frxUSDJPY_100", "USD").unwrap();
        assert!(params.is_legacy());
    }

    #[test]
    fn test_legacy_aliases_resolve() {
        for (alias, canonical) in [
            ("INTRADU", "CALL"),
            ("INTRADD", "PUT"),
            ("FLASHU", "CALL"),
            ("FLASHD", "PUT"),
            ("DOUBLEUP", "CALL"),
            ("DOUBLEDOWN", "PUT"),
        ] {
            let shortcode = format!("{}_frxUSDJPY_100_1000_2000_S0P_0", alias);
            let params = decode(&shortcode, "USD").unwrap();
            assert_eq!(params.code, canonical, "{}", alias);
            assert!(!params.is_legacy());
        }
    }

    #[test]
    fn test_barriered_decode() {
        let params = decode("CALL_frxUSDJPY_100_1000F_2000_S0P_0", "USD").unwrap();
        assert_eq!(params.code, "CALL");
        assert_eq!(params.underlying_symbol, "frxUSDJPY");
        assert_eq!(params.amount_type, AmountType::Payout);
        assert_eq!(params.amount, Some(100.0));
        assert_eq!(params.date_start.unwrap().epoch(), 1000);
        assert_eq!(params.date_expiry.unwrap().epoch(), 2000);
        assert!(params.starts_as_forward_starting);
        assert!(!params.fixed_expiry);
        assert_eq!(params.barrier, Some(BarrierValue::Relative("S0P".to_string())));
        assert!(params.high_barrier.is_none());
    }

    #[test]
    fn test_fixed_expiry_marker() {
        let params = decode("CALL_frxUSDJPY_100_1000_2000F_S0P_0", "USD").unwrap();
        assert!(params.fixed_expiry);
        assert!(!params.starts_as_forward_starting);
    }

    #[test]
    fn test_two_barrier_decode_scales_both() {
        let params = decode("EXPIRYRANGE_frxUSDJPY_100_1000_2000_1234500_1230000", "USD").unwrap();
        assert_eq!(params.high_barrier, Some(BarrierValue::Numeric(1.2345)));
        assert_eq!(params.low_barrier, Some(BarrierValue::Numeric(1.23)));
        assert!(params.barrier.is_none());
    }

    #[test]
    fn test_tick_expiry_in_barriered_grammar() {
        let params = decode("DIGITOVER_R_100_50_10_5T_7_0", "USD").unwrap();
        assert!(params.tick_expiry);
        assert_eq!(params.tick_count, Some(5));
        assert_eq!(params.underlying_symbol, "R_100");
        assert_eq!(params.barrier, Some(BarrierValue::Numeric(7.0)));
    }

    #[test]
    fn test_tick_expiry_in_barrierless_grammar() {
        let params = decode("DIGITOVER_R_50_10_5T", "USD").unwrap();
        assert!(params.tick_expiry);
        assert_eq!(params.tick_count, Some(5));
        assert_eq!(params.underlying_symbol, "R");
        assert!(params.date_expiry.is_none());
        assert!(params.barrier.is_none());
    }

    #[test]
    fn test_barrierless_untagged_trailing_field_is_inert() {
        let params = decode("CALL_frxUSDJPY_100_1000_2000", "USD").unwrap();
        assert!(!params.is_legacy());
        assert!(!params.tick_expiry);
        assert!(params.tick_count.is_none());
        assert!(params.date_expiry.is_none());
    }

    #[test]
    fn test_underscore_symbol_in_barriered_grammar() {
        let params = decode("CALL_R_100_50_1000_2000_S0P_0", "USD").unwrap();
        assert_eq!(params.underlying_symbol, "R_100");
        assert_eq!(params.amount, Some(50.0));
    }

    #[test]
    fn test_epoch_overflow_is_malformed() {
        let result = decode("CALL_frxUSDJPY_100_99999999999999999999_2000_S0P_0", "USD");
        assert!(matches!(
            result,
            Err(ContractError::MalformedField { field: "date_start", .. })
        ));
    }

    #[test]
    fn test_legacy_hour_marker_detection() {
        assert!(has_legacy_hour_marker("CALL_frxUSDJPY_100_1Jan07_10H11"));
        assert!(has_legacy_hour_marker("PUT_gbpusd_10_2H30"));
        assert!(!has_legacy_hour_marker("CALL_frxUSDJPY_100_1000_2000_S0P_0"));
        assert!(!has_legacy_hour_marker("ONETOUCH_H_10_1000_2000_S1P_0"));
    }

    #[test]
    fn test_grammar_ordering_prefers_barriered() {
        // Seven tokens match the barriered grammar even though a greedy
        // symbol could also satisfy the barrierless one.
        let matched = match_grammar("CALL_frxUSDJPY_100_1000_2000_S0P_0").unwrap();
        assert!(matches!(matched, Some(GrammarMatch::Barriered(_))));
    }

    #[test]
    fn test_amount_type_display() {
        assert_eq!(format!("{}", AmountType::Payout), "payout");
        assert_eq!(format!("{}", AmountType::Stake), "stake");
    }
}
