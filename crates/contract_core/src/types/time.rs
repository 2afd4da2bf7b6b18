//! Wall-clock instants and elapsed time for contract calculations.
//!
//! This module provides:
//! - `Instant`: Type-safe wall-clock instant wrapping `chrono::DateTime<Utc>`
//! - `TimeSpan`: Typed elapsed time wrapping `chrono::Duration`
//!
//! Instants carry millisecond precision internally; the epoch-seconds view
//! is what compact wire formats use. Elapsed time converts to days and
//! years using the ACT/365 convention standard in derivatives markets.
//!
//! # Examples
//!
//! ```
//! use contract_core::types::time::{Instant, TimeSpan};
//!
//! let start = Instant::from_epoch(1_700_000_000).unwrap();
//! let end = Instant::from_epoch(1_700_031_536).unwrap();
//!
//! let span = end - start;
//! assert_eq!(span.seconds(), 31_536);
//! assert!((span.in_years() - 0.001).abs() < 1e-6);
//! ```

use chrono::{DateTime, TimeZone, Utc};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use super::error::TimeError;

/// Seconds per day.
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days per year under the ACT/365 convention.
const DAYS_PER_YEAR: f64 = 365.0;

/// Type-safe wall-clock instant wrapping `chrono::DateTime<Utc>`.
///
/// Provides epoch-seconds accessors for wire formats while retaining
/// millisecond precision internally, so two instants created within the
/// same second still compare as distinct.
///
/// # Examples
///
/// ```
/// use contract_core::types::time::Instant;
///
/// // Create from Unix epoch seconds
/// let t = Instant::from_epoch(1_700_000_000).unwrap();
/// assert_eq!(t.epoch(), 1_700_000_000);
///
/// // Parse either an epoch or an RFC 3339 timestamp
/// let parsed: Instant = "1700000000".parse().unwrap();
/// assert_eq!(t, parsed);
///
/// // Instants are totally ordered
/// let later = Instant::from_epoch(1_700_000_001).unwrap();
/// assert!(t < later);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Instant(DateTime<Utc>);

impl Instant {
    /// Creates an instant from Unix epoch seconds.
    ///
    /// # Arguments
    /// * `secs` - Seconds since the Unix epoch
    ///
    /// # Returns
    /// `Ok(Instant)` if the epoch is representable,
    /// `Err(TimeError::InvalidEpoch)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use contract_core::types::time::Instant;
    ///
    /// let t = Instant::from_epoch(1_700_000_000).unwrap();
    /// assert_eq!(t.epoch(), 1_700_000_000);
    ///
    /// // Out-of-range epochs return an error
    /// assert!(Instant::from_epoch(i64::MAX).is_err());
    /// ```
    pub fn from_epoch(secs: i64) -> Result<Self, TimeError> {
        Utc.timestamp_opt(secs, 0)
            .single()
            .map(Instant)
            .ok_or(TimeError::InvalidEpoch(secs))
    }

    /// Creates an instant from Unix epoch milliseconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use contract_core::types::time::Instant;
    ///
    /// let t = Instant::from_epoch_millis(1_700_000_000_250).unwrap();
    /// assert_eq!(t.epoch(), 1_700_000_000);
    /// assert_eq!(t.epoch_millis(), 1_700_000_000_250);
    /// ```
    pub fn from_epoch_millis(millis: i64) -> Result<Self, TimeError> {
        Utc.timestamp_millis_opt(millis)
            .single()
            .map(Instant)
            .ok_or(TimeError::InvalidEpoch(millis.div_euclid(1000)))
    }

    /// Creates an instant from a `chrono::DateTime<Utc>`.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Instant(datetime)
    }

    /// Returns the seconds since the Unix epoch.
    #[inline]
    pub fn epoch(&self) -> i64 {
        self.0.timestamp()
    }

    /// Returns the milliseconds since the Unix epoch.
    ///
    /// The sub-second part distinguishes instants created within the same
    /// second, such as successive repricings of one contract.
    #[inline]
    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the underlying `DateTime<Utc>`.
    ///
    /// Use this method when you need access to chrono's full API.
    #[inline]
    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }
}

impl Add<TimeSpan> for Instant {
    type Output = Instant;

    /// Advances the instant by the given span, saturating at the maximum
    /// representable instant on overflow.
    fn add(self, span: TimeSpan) -> Instant {
        Instant(
            self.0
                .checked_add_signed(span.0)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        )
    }
}

impl Sub for Instant {
    type Output = TimeSpan;

    /// Returns the signed elapsed time between two instants.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use contract_core::types::time::Instant;
    ///
    /// let a = Instant::from_epoch(1_000).unwrap();
    /// let b = Instant::from_epoch(1_060).unwrap();
    ///
    /// assert_eq!((b - a).seconds(), 60);
    /// assert_eq!((a - b).seconds(), -60);
    /// ```
    fn sub(self, other: Self) -> TimeSpan {
        TimeSpan(self.0 - other.0)
    }
}

impl FromStr for Instant {
    type Err = TimeError;

    /// Parses either an integer Unix epoch or an RFC 3339 timestamp.
    fn from_str(s: &str) -> Result<Self, TimeError> {
        let trimmed = s.trim();
        let looks_like_epoch = {
            let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
            !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        };
        if looks_like_epoch {
            let secs: i64 = trimmed
                .parse()
                .map_err(|_| TimeError::ParseError(s.to_string()))?;
            return Instant::from_epoch(secs);
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| Instant(dt.with_timezone(&Utc)))
            .map_err(|e| TimeError::ParseError(e.to_string()))
    }
}

impl fmt::Display for Instant {
    /// Formats the instant as RFC 3339.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// Typed elapsed time wrapping `chrono::Duration`.
///
/// Supports comparison and conversion to days and years (ACT/365).
///
/// # Examples
///
/// ```
/// use contract_core::types::time::TimeSpan;
///
/// let span = TimeSpan::from_seconds(86_400);
/// assert!((span.in_days() - 1.0).abs() < 1e-12);
/// assert!(span > TimeSpan::zero());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeSpan(chrono::Duration);

impl TimeSpan {
    /// Creates a span from whole seconds, saturating at the representable
    /// bounds.
    pub fn from_seconds(secs: i64) -> Self {
        let duration = chrono::Duration::try_seconds(secs).unwrap_or(if secs < 0 {
            chrono::Duration::MIN
        } else {
            chrono::Duration::MAX
        });
        TimeSpan(duration)
    }

    /// The zero-length span.
    #[inline]
    pub fn zero() -> Self {
        TimeSpan(chrono::Duration::zero())
    }

    /// Returns the whole seconds in this span.
    #[inline]
    pub fn seconds(&self) -> i64 {
        self.0.num_seconds()
    }

    /// Returns whether this span has zero length.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the span expressed in fractional days.
    ///
    /// # Examples
    ///
    /// ```
    /// use contract_core::types::time::TimeSpan;
    ///
    /// let half_day = TimeSpan::from_seconds(43_200);
    /// assert!((half_day.in_days() - 0.5).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn in_days(&self) -> f64 {
        self.seconds() as f64 / SECONDS_PER_DAY
    }

    /// Returns the span expressed in fractional years (ACT/365).
    #[inline]
    pub fn in_years(&self) -> f64 {
        self.in_days() / DAYS_PER_YEAR
    }

    /// Returns the underlying `chrono::Duration`.
    #[inline]
    pub fn into_inner(self) -> chrono::Duration {
        self.0
    }
}

impl fmt::Display for TimeSpan {
    /// Formats the span as whole seconds with an `s` suffix.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.seconds())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::TimeSpan;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for TimeSpan {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_i64(self.seconds())
        }
    }

    impl<'de> Deserialize<'de> for TimeSpan {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let secs = i64::deserialize(deserializer)?;
            Ok(TimeSpan::from_seconds(secs))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_epoch_roundtrip() {
        let t = Instant::from_epoch(1_700_000_000).unwrap();
        assert_eq!(t.epoch(), 1_700_000_000);
    }

    #[test]
    fn test_from_epoch_out_of_range() {
        assert!(Instant::from_epoch(i64::MAX).is_err());
        assert!(Instant::from_epoch(i64::MIN).is_err());
    }

    #[test]
    fn test_from_epoch_millis_precision() {
        let t = Instant::from_epoch_millis(1_700_000_000_250).unwrap();
        assert_eq!(t.epoch(), 1_700_000_000);
        assert_eq!(t.epoch_millis(), 1_700_000_000_250);

        // Same second, different millisecond, still distinct
        let later = Instant::from_epoch_millis(1_700_000_000_750).unwrap();
        assert_ne!(t, later);
        assert!(t < later);
        assert_eq!(t.epoch(), later.epoch());
    }

    #[test]
    fn test_ordering() {
        let earlier = Instant::from_epoch(1_000).unwrap();
        let later = Instant::from_epoch(2_000).unwrap();

        assert!(earlier < later);
        assert!(later > earlier);
        assert!(earlier <= earlier);
    }

    #[test]
    fn test_subtraction() {
        let a = Instant::from_epoch(1_000).unwrap();
        let b = Instant::from_epoch(1_090).unwrap();

        assert_eq!((b - a).seconds(), 90);
        assert_eq!((a - b).seconds(), -90);
    }

    #[test]
    fn test_add_timespan() {
        let a = Instant::from_epoch(1_000).unwrap();
        let shifted = a + TimeSpan::from_seconds(500);
        assert_eq!(shifted.epoch(), 1_500);
    }

    #[test]
    fn test_from_str_epoch() {
        let t: Instant = "1700000000".parse().unwrap();
        assert_eq!(t.epoch(), 1_700_000_000);
    }

    #[test]
    fn test_from_str_rfc3339() {
        let t: Instant = "2023-11-14T22:13:20+00:00".parse().unwrap();
        assert_eq!(t.epoch(), 1_700_000_000);
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("not-a-time".parse::<Instant>().is_err());
        assert!("".parse::<Instant>().is_err());
    }

    #[test]
    fn test_display_is_rfc3339() {
        let t = Instant::from_epoch(1_700_000_000).unwrap();
        let shown = format!("{}", t);
        let reparsed: Instant = shown.parse().unwrap();
        assert_eq!(reparsed, t);
    }

    #[test]
    fn test_timespan_zero() {
        assert!(TimeSpan::zero().is_zero());
        assert_eq!(TimeSpan::zero().seconds(), 0);
    }

    #[test]
    fn test_timespan_in_days() {
        assert_relative_eq!(
            TimeSpan::from_seconds(86_400).in_days(),
            1.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            TimeSpan::from_seconds(43_200).in_days(),
            0.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_timespan_in_years_act365() {
        let one_year = TimeSpan::from_seconds(365 * 86_400);
        assert_relative_eq!(one_year.in_years(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_timespan_ordering() {
        assert!(TimeSpan::from_seconds(10) < TimeSpan::from_seconds(20));
        assert!(TimeSpan::from_seconds(-5) < TimeSpan::zero());
    }

    #[test]
    fn test_timespan_saturates() {
        let huge = TimeSpan::from_seconds(i64::MAX);
        assert!(huge > TimeSpan::zero());

        let tiny = TimeSpan::from_seconds(i64::MIN);
        assert!(tiny < TimeSpan::zero());
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_instant_serde_roundtrip() {
            let t = Instant::from_epoch(1_700_000_000).unwrap();
            let json = serde_json::to_string(&t).unwrap();
            let parsed: Instant = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, t);
        }

        #[test]
        fn test_timespan_serde_roundtrip() {
            let span = TimeSpan::from_seconds(3_600);
            let json = serde_json::to_string(&span).unwrap();
            assert_eq!(json, "3600");

            let parsed: TimeSpan = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, span);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_epoch_roundtrip(secs in -4_102_444_800i64..4_102_444_800i64) {
                let t = Instant::from_epoch(secs).unwrap();
                prop_assert_eq!(t.epoch(), secs);
            }

            #[test]
            fn test_sub_then_add_restores(
                a in 0i64..4_102_444_800i64,
                b in 0i64..4_102_444_800i64,
            ) {
                let ia = Instant::from_epoch(a).unwrap();
                let ib = Instant::from_epoch(b).unwrap();
                let span = ib - ia;
                prop_assert_eq!((ia + span).epoch(), b);
            }

            #[test]
            fn test_in_days_monotonic(a in 0i64..1_000_000i64, b in 0i64..1_000_000i64) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(
                    TimeSpan::from_seconds(lo).in_days() <= TimeSpan::from_seconds(hi).in_days()
                );
            }
        }
    }
}
