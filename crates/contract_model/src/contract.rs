//! The in-memory contract representation and its derived attributes.
//!
//! A [`Contract`] is an immutable aggregate built once, either from
//! explicit fields via [`ContractBuilder`] or from a shortcode via
//! [`Contract::from_shortcode`]. All lifecycle attributes (forward-starting
//! status, remaining time, time in days/years, effective start) are pure
//! functions of the construction state and the catalog metadata, so
//! instances are safe to share across threads without synchronisation.
//!
//! Mutation is expressed as rebuilding: [`Contract::with_date_expiry`] and
//! [`Contract::reprice`] return fresh instances instead of aliasing shared
//! state.
//!
//! # Examples
//!
//! ```
//! use contract_core::clock::FixedClock;
//! use contract_core::types::Instant;
//! use contract_model::contract::ContractBuilder;
//!
//! let clock = FixedClock::new(Instant::from_epoch(1_000).unwrap());
//! let contract = ContractBuilder::new()
//!     .contract_type("CALL")
//!     .underlying_symbol("frxUSDJPY")
//!     .currency("USD")
//!     .payout(100.0)
//!     .duration("3h")
//!     .barrier("S0P")
//!     .build_with_clock(&clock)
//!     .unwrap();
//!
//! assert!(contract.is_atm_bet());
//! assert_eq!(contract.remaining_time().seconds(), 10_800);
//! ```

use std::fmt;

use contract_core::clock::{Clock, SystemClock};
use contract_core::types::{Instant, Interval, TimeSpan};

use crate::barrier::{self, BarrierValue};
use crate::catalog::{self, BarrierCategory, ContractCategory, TypeMetadata};
use crate::error::ContractError;
use crate::shortcode::{self, ContractParams};

/// Maximum tick spacing the quote feeds guarantee, in seconds. Used to
/// place a nominal expiry instant on tick-expiry contracts.
const NOMINAL_TICK_SECONDS: i64 = 2;

/// Lower clamp for `time_in_days`.
const MIN_TIME_IN_DAYS: f64 = 0.000_001;

/// Upper clamp for `time_in_days` (two years).
const MAX_TIME_IN_DAYS: f64 = 730.0;

/// Floor for `time_in_years`.
const MIN_TIME_IN_YEARS: f64 = 1e-9;

/// How a supplied barrier string is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BarrierKind {
    /// Offset from spot in pip-like units, e.g. `S10P`.
    Relative,
    /// An absolute price level.
    Absolute,
    /// A signed offset from spot, e.g. `+0.0010`.
    Difference,
}

impl BarrierKind {
    /// Classifies a supplied barrier string.
    pub fn classify(token: &str) -> Self {
        if barrier::is_relative_token(token) {
            BarrierKind::Relative
        } else if token.starts_with('+') || token.starts_with('-') {
            BarrierKind::Difference
        } else {
            BarrierKind::Absolute
        }
    }

    /// Returns the wire code for this kind.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            BarrierKind::Relative => "relative",
            BarrierKind::Absolute => "absolute",
            BarrierKind::Difference => "difference",
        }
    }
}

impl fmt::Display for BarrierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Expiry classification of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExpiryType {
    /// Expires after a fixed number of ticks.
    Tick,
    /// Expires within a day of its start.
    Intraday,
    /// Runs for a day or longer.
    Daily,
}

impl fmt::Display for ExpiryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryType::Tick => write!(f, "tick"),
            ExpiryType::Intraday => write!(f, "intraday"),
            ExpiryType::Daily => write!(f, "daily"),
        }
    }
}

/// Result of decoding a shortcode into a contract.
///
/// Unrecognised or legacy shortcodes are represented, not rejected: they
/// surface as [`DecodedContract::Legacy`] carrying the fixed placeholder
/// record, and callers must check before relying on full contract
/// semantics.
#[derive(Debug, Clone)]
pub enum DecodedContract {
    /// A fully-resolved contract.
    Contract(Box<Contract>),
    /// The legacy placeholder for an unrecognised shortcode.
    Legacy(ContractParams),
}

impl DecodedContract {
    /// Returns whether this is the legacy placeholder.
    #[inline]
    pub fn is_legacy(&self) -> bool {
        matches!(self, DecodedContract::Legacy(_))
    }

    /// Returns the contract, if the shortcode resolved fully.
    pub fn contract(&self) -> Option<&Contract> {
        match self {
            DecodedContract::Contract(contract) => Some(contract),
            DecodedContract::Legacy(_) => None,
        }
    }

    /// Consumes the decode result, returning the contract if present.
    pub fn into_contract(self) -> Option<Contract> {
        match self {
            DecodedContract::Contract(contract) => Some(*contract),
            DecodedContract::Legacy(_) => None,
        }
    }
}

/// A single options contract.
///
/// Immutable after construction; see [`ContractBuilder`] for the explicit
/// construction path and [`Contract::from_shortcode`] for the decode path.
#[derive(Debug, Clone, PartialEq)]
pub struct Contract {
    metadata: &'static TypeMetadata,
    underlying_symbol: String,
    currency: String,
    payout: Option<f64>,
    date_start: Instant,
    date_expiry: Option<Instant>,
    date_pricing: Instant,
    fixed_expiry: bool,
    tick_expiry: bool,
    duration: Option<Interval>,
    tick_count: Option<u32>,
    prediction: Option<f64>,
    supplied_barrier: Option<String>,
    supplied_high_barrier: Option<String>,
    supplied_low_barrier: Option<String>,
    supplied_barrier_type: BarrierKind,
    starts_as_forward_starting: bool,
}

impl Contract {
    /// Decodes a shortcode and builds the contract, reading the present
    /// time from the system clock.
    ///
    /// See [`Contract::from_shortcode_with_clock`].
    pub fn from_shortcode(
        shortcode: &str,
        currency: &str,
    ) -> Result<DecodedContract, ContractError> {
        Self::from_shortcode_with_clock(shortcode, currency, &SystemClock)
    }

    /// Decodes a shortcode and builds the contract with an explicit clock.
    ///
    /// # Returns
    /// [`DecodedContract::Legacy`] for unrecognised shortcodes;
    /// [`DecodedContract::Contract`] otherwise. Fails with
    /// [`ContractError::MissingCurrency`] on an empty currency and
    /// propagates construction failures.
    ///
    /// # Examples
    ///
    /// ```
    /// use contract_core::clock::FixedClock;
    /// use contract_core::types::Instant;
    /// use contract_model::contract::Contract;
    ///
    /// let clock = FixedClock::new(Instant::from_epoch(500).unwrap());
    /// let decoded = Contract::from_shortcode_with_clock(
    ///     "CALL_frxUSDJPY_100_1000F_2000_S0P_0",
    ///     "USD",
    ///     &clock,
    /// )
    /// .unwrap();
    ///
    /// let contract = decoded.contract().unwrap();
    /// assert!(contract.is_forward_starting());
    /// ```
    pub fn from_shortcode_with_clock(
        shortcode: &str,
        currency: &str,
        clock: &dyn Clock,
    ) -> Result<DecodedContract, ContractError> {
        let params = shortcode::decode(shortcode, currency)?;
        if params.is_legacy() {
            return Ok(DecodedContract::Legacy(params));
        }
        let contract = ContractBuilder::from_params(&params).build_with_clock(clock)?;
        Ok(DecodedContract::Contract(Box::new(contract)))
    }

    /// Returns the catalog metadata for this contract's type.
    #[inline]
    pub fn metadata(&self) -> &'static TypeMetadata {
        self.metadata
    }

    /// Returns the contract type code.
    #[inline]
    pub fn contract_type_code(&self) -> &str {
        self.metadata.code
    }

    /// Returns the contract category.
    #[inline]
    pub fn category(&self) -> ContractCategory {
        self.metadata.category
    }

    /// Returns the underlying asset symbol.
    #[inline]
    pub fn underlying_symbol(&self) -> &str {
        &self.underlying_symbol
    }

    /// Returns the payment currency.
    #[inline]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Returns the payout amount, if set.
    #[inline]
    pub fn payout(&self) -> Option<f64> {
        self.payout
    }

    /// Returns the contract start instant.
    #[inline]
    pub fn date_start(&self) -> Instant {
        self.date_start
    }

    /// Returns the expiry instant, for timestamp-expiry contracts.
    #[inline]
    pub fn date_expiry(&self) -> Option<Instant> {
        self.date_expiry
    }

    /// Returns the pricing (valuation) instant.
    #[inline]
    pub fn date_pricing(&self) -> Instant {
        self.date_pricing
    }

    /// Returns whether the expiry was quoted as an absolute date.
    #[inline]
    pub fn fixed_expiry(&self) -> bool {
        self.fixed_expiry
    }

    /// Returns whether this contract expires after a tick count.
    #[inline]
    pub fn is_tick_expiry(&self) -> bool {
        self.tick_expiry
    }

    /// Returns the parsed duration, when the contract was quoted with one.
    #[inline]
    pub fn duration(&self) -> Option<Interval> {
        self.duration
    }

    /// Returns the tick count, for tick-expiry contracts.
    #[inline]
    pub fn tick_count(&self) -> Option<u32> {
        self.tick_count
    }

    /// Returns the digit prediction, for digit contracts.
    #[inline]
    pub fn prediction(&self) -> Option<f64> {
        self.prediction
    }

    /// Returns the supplied single barrier, in its unscaled textual form.
    #[inline]
    pub fn supplied_barrier(&self) -> Option<&str> {
        self.supplied_barrier.as_deref()
    }

    /// Returns the supplied high barrier.
    #[inline]
    pub fn supplied_high_barrier(&self) -> Option<&str> {
        self.supplied_high_barrier.as_deref()
    }

    /// Returns the supplied low barrier.
    #[inline]
    pub fn supplied_low_barrier(&self) -> Option<&str> {
        self.supplied_low_barrier.as_deref()
    }

    /// Returns how the supplied barrier is quoted.
    #[inline]
    pub fn supplied_barrier_type(&self) -> BarrierKind {
        self.supplied_barrier_type
    }

    /// Returns whether the contract was forward-starting when it was
    /// created. Fixed at construction; never changes.
    #[inline]
    pub fn starts_as_forward_starting(&self) -> bool {
        self.starts_as_forward_starting
    }

    /// Returns whether the contract is forward-starting relative to the
    /// current pricing time.
    ///
    /// True iff the category allows forward starting and pricing time is
    /// strictly before the start. Unlike
    /// [`starts_as_forward_starting`](Contract::starts_as_forward_starting),
    /// this flips to false once pricing time reaches the start.
    pub fn is_forward_starting(&self) -> bool {
        self.metadata.allow_forward_starting() && self.date_pricing < self.date_start
    }

    /// The nominal expiry instant used for time arithmetic.
    ///
    /// Tick-expiry contracts have no timestamp expiry; their nominal
    /// expiry assumes the maximum guaranteed tick spacing.
    fn nominal_expiry(&self) -> Instant {
        match self.date_expiry {
            Some(expiry) => expiry,
            None => {
                let ticks = i64::from(self.tick_count.unwrap_or(0));
                self.date_start + TimeSpan::from_seconds(NOMINAL_TICK_SECONDS * ticks)
            }
        }
    }

    /// The instant time-based attributes are anchored to.
    ///
    /// Once a contract is expired, or has definitively begun (pricing past
    /// start), calculations anchor to its fixed start for backpricing
    /// stability; otherwise pricing time reflects "now" relative to a
    /// not-yet-started contract.
    pub fn effective_start(&self) -> Instant {
        if self.date_pricing > self.nominal_expiry() {
            self.date_start
        } else if self.date_pricing > self.date_start {
            self.date_pricing
        } else {
            self.date_start
        }
    }

    /// Time from `from` to expiry, clamped at zero.
    ///
    /// Pricing after expiry must not crash the pipeline, so a `from` past
    /// expiry yields a zero-length span rather than an error.
    pub fn time_to_expiry(&self, from: Instant) -> TimeSpan {
        let seconds = self.nominal_expiry().epoch() - from.epoch();
        TimeSpan::from_seconds(seconds.max(0))
    }

    /// Time to expiry measured from pricing time, or from the start for a
    /// contract that has not started yet.
    pub fn remaining_time(&self) -> TimeSpan {
        let from = self.date_pricing.max(self.date_start);
        self.time_to_expiry(from)
    }

    /// Contract lifetime in days, clamped into `[0.000001, 730]`.
    pub fn time_in_days(&self) -> f64 {
        self.time_to_expiry(self.effective_start())
            .in_days()
            .clamp(MIN_TIME_IN_DAYS, MAX_TIME_IN_DAYS)
    }

    /// Contract lifetime in years (ACT/365), floored at `1e-9`.
    pub fn time_in_years(&self) -> f64 {
        (self.time_in_days() / 365.0).max(MIN_TIME_IN_YEARS)
    }

    /// Number of ticks until settlement: the quoted tick count plus the
    /// entry tick.
    pub fn ticks_to_expiry(&self) -> Option<u32> {
        self.tick_count.map(|count| count + 1)
    }

    /// Returns whether this is a single-barrier contract struck exactly
    /// at the money (the `S0P` sentinel).
    pub fn is_atm_bet(&self) -> bool {
        if self.metadata.two_barriers() {
            return false;
        }
        matches!(self.supplied_barrier.as_deref(), Some("S0P"))
    }

    /// Returns the barrier pricing category for this contract.
    pub fn barrier_category(&self) -> BarrierCategory {
        if self.metadata.category == ContractCategory::CallPut {
            if self.is_atm_bet() {
                BarrierCategory::EuroAtm
            } else {
                BarrierCategory::EuroNonAtm
            }
        } else {
            self.metadata
                .category
                .barrier_categories()
                .first()
                .copied()
                .unwrap_or(BarrierCategory::EuroNonAtm)
        }
    }

    /// Classifies how this contract expires.
    pub fn expiry_type(&self) -> ExpiryType {
        if self.tick_expiry {
            ExpiryType::Tick
        } else if (self.nominal_expiry() - self.date_start).seconds() >= 86_400 {
            ExpiryType::Daily
        } else {
            ExpiryType::Intraday
        }
    }

    /// Encodes this contract into its canonical shortcode.
    pub fn shortcode(&self) -> Result<String, ContractError> {
        shortcode::encode(self)
    }

    /// Returns a copy of this contract with a different expiry instant.
    ///
    /// The replacement is an explicit rebuild rather than in-place
    /// mutation, so shared instances are never aliased.
    pub fn with_date_expiry(&self, date_expiry: Instant) -> Contract {
        let mut rebuilt = self.clone();
        rebuilt.date_expiry = Some(date_expiry);
        rebuilt.tick_expiry = false;
        rebuilt
    }

    /// Returns a copy of this contract priced at the clock's present time.
    ///
    /// The pricing instant keeps millisecond precision, so repricings
    /// within the same second remain distinguishable.
    pub fn reprice(&self, clock: &dyn Clock) -> Contract {
        let mut repriced = self.clone();
        repriced.date_pricing = clock.now();
        repriced
    }
}

/// Builder for explicit contract construction.
///
/// Every required field must be resolvable at [`build`](ContractBuilder::build)
/// time; there is no partially-constructed contract.
#[derive(Debug, Clone, Default)]
pub struct ContractBuilder {
    contract_type_code: Option<String>,
    underlying_symbol: Option<String>,
    currency: Option<String>,
    payout: Option<f64>,
    date_start: Option<Instant>,
    date_expiry: Option<Instant>,
    date_pricing: Option<Instant>,
    fixed_expiry: Option<bool>,
    duration: Option<String>,
    tick_count: Option<u32>,
    prediction: Option<f64>,
    barrier: Option<String>,
    high_barrier: Option<String>,
    low_barrier: Option<String>,
    barrier_type: Option<BarrierKind>,
    starts_as_forward_starting: Option<bool>,
}

impl ContractBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a builder from decoded shortcode parameters.
    pub fn from_params(params: &ContractParams) -> Self {
        let supplied = |value: &Option<BarrierValue>| {
            value.as_ref().map(BarrierValue::to_supplied_string)
        };
        ContractBuilder {
            contract_type_code: Some(params.code.clone()),
            underlying_symbol: Some(params.underlying_symbol.clone()),
            currency: Some(params.currency.clone()),
            payout: params.amount,
            date_start: params.date_start,
            date_expiry: params.date_expiry,
            fixed_expiry: Some(params.fixed_expiry),
            tick_count: params.tick_count,
            barrier: supplied(&params.barrier),
            high_barrier: supplied(&params.high_barrier),
            low_barrier: supplied(&params.low_barrier),
            starts_as_forward_starting: Some(params.starts_as_forward_starting),
            ..Default::default()
        }
    }

    /// Sets the contract type code.
    pub fn contract_type(mut self, code: &str) -> Self {
        self.contract_type_code = Some(code.to_string());
        self
    }

    /// Sets the underlying asset symbol.
    pub fn underlying_symbol(mut self, symbol: &str) -> Self {
        self.underlying_symbol = Some(symbol.to_string());
        self
    }

    /// Sets the payment currency.
    pub fn currency(mut self, currency: &str) -> Self {
        self.currency = Some(currency.to_string());
        self
    }

    /// Sets the payout amount.
    pub fn payout(mut self, payout: f64) -> Self {
        self.payout = Some(payout);
        self
    }

    /// Sets the start instant.
    pub fn date_start(mut self, date_start: Instant) -> Self {
        self.date_start = Some(date_start);
        self
    }

    /// Sets an absolute expiry instant.
    pub fn date_expiry(mut self, date_expiry: Instant) -> Self {
        self.date_expiry = Some(date_expiry);
        self
    }

    /// Sets the pricing (valuation) instant. Defaults to the clock's
    /// present time.
    pub fn date_pricing(mut self, date_pricing: Instant) -> Self {
        self.date_pricing = Some(date_pricing);
        self
    }

    /// Overrides the fixed-expiry flag.
    pub fn fixed_expiry(mut self, fixed: bool) -> Self {
        self.fixed_expiry = Some(fixed);
        self
    }

    /// Sets a relative duration string, e.g. `"5t"` or `"3h"`.
    pub fn duration(mut self, duration: &str) -> Self {
        self.duration = Some(duration.to_string());
        self
    }

    /// Sets the tick count directly.
    pub fn tick_count(mut self, count: u32) -> Self {
        self.tick_count = Some(count);
        self
    }

    /// Sets the digit prediction.
    pub fn prediction(mut self, prediction: f64) -> Self {
        self.prediction = Some(prediction);
        self
    }

    /// Sets the single barrier in its supplied textual form.
    pub fn barrier(mut self, barrier: &str) -> Self {
        self.barrier = Some(barrier.to_string());
        self
    }

    /// Sets the high barrier in its supplied textual form.
    pub fn high_barrier(mut self, barrier: &str) -> Self {
        self.high_barrier = Some(barrier.to_string());
        self
    }

    /// Sets the low barrier in its supplied textual form.
    pub fn low_barrier(mut self, barrier: &str) -> Self {
        self.low_barrier = Some(barrier.to_string());
        self
    }

    /// Overrides the supplied barrier kind instead of inferring it.
    pub fn barrier_type(mut self, kind: BarrierKind) -> Self {
        self.barrier_type = Some(kind);
        self
    }

    /// Overrides the recorded forward-starting intent.
    pub fn starts_as_forward_starting(mut self, flag: bool) -> Self {
        self.starts_as_forward_starting = Some(flag);
        self
    }

    /// Builds the contract, reading the present time from the system clock.
    pub fn build(self) -> Result<Contract, ContractError> {
        self.build_with_clock(&SystemClock)
    }

    /// Builds the contract with an explicit clock.
    ///
    /// # Returns
    /// The contract, or the first construction failure: unknown type,
    /// missing currency/underlying, negative payout, unparseable duration,
    /// or an unresolvable expiry.
    pub fn build_with_clock(self, clock: &dyn Clock) -> Result<Contract, ContractError> {
        let code = self
            .contract_type_code
            .ok_or(ContractError::MissingField("contract_type"))?;
        let metadata =
            catalog::lookup(&code).ok_or(ContractError::UnknownContractType(code))?;
        let currency = self
            .currency
            .filter(|c| !c.is_empty())
            .ok_or(ContractError::MissingCurrency)?;
        let underlying_symbol = self
            .underlying_symbol
            .filter(|s| !s.is_empty())
            .ok_or(ContractError::MissingField("underlying_symbol"))?;
        if let Some(payout) = self.payout {
            if payout < 0.0 {
                return Err(ContractError::NegativePayout(payout));
            }
        }

        let date_pricing = self.date_pricing.unwrap_or_else(|| clock.now());
        let date_start = self.date_start.unwrap_or(date_pricing);

        let mut date_expiry = self.date_expiry;
        let mut tick_count = self.tick_count;
        let mut duration = None;
        if let Some(text) = &self.duration {
            let interval: Interval = text.parse()?;
            duration = Some(interval);
            if interval.is_tick() {
                tick_count = Some(interval.amount());
            } else if let Some(span) = interval.as_timespan() {
                if date_expiry.is_none() {
                    date_expiry = Some(date_start + span);
                }
            }
        }
        if date_expiry.is_none() && tick_count.is_none() {
            return Err(ContractError::MissingField("date_expiry"));
        }

        let fixed_expiry = self
            .fixed_expiry
            .unwrap_or(self.date_expiry.is_some() && self.duration.is_none());
        let tick_expiry = date_expiry.is_none() && tick_count.is_some();

        // Digit contracts quote the prediction and the barrier
        // interchangeably; keep both views populated.
        let mut barrier_string = self.barrier;
        let mut prediction = self.prediction;
        if metadata.category == ContractCategory::Digits {
            match (&barrier_string, prediction) {
                (None, Some(digit)) => barrier_string = Some(barrier::format_decimal(digit)),
                (Some(token), None) => prediction = token.parse().ok(),
                _ => {}
            }
        }

        let supplied_barrier_type = self.barrier_type.unwrap_or_else(|| {
            barrier_string
                .as_deref()
                .or(self.high_barrier.as_deref())
                .map(BarrierKind::classify)
                .unwrap_or(BarrierKind::Relative)
        });

        let starts_as_forward_starting = self
            .starts_as_forward_starting
            .unwrap_or(metadata.allow_forward_starting() && date_pricing < date_start);

        Ok(Contract {
            metadata,
            underlying_symbol,
            currency,
            payout: self.payout,
            date_start,
            date_expiry,
            date_pricing,
            fixed_expiry,
            tick_expiry,
            duration,
            tick_count,
            prediction,
            supplied_barrier: barrier_string,
            supplied_high_barrier: self.high_barrier,
            supplied_low_barrier: self.low_barrier,
            supplied_barrier_type,
            starts_as_forward_starting,
        })
    }
}
