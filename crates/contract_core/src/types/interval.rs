//! Compact duration strings.
//!
//! This module parses the compact duration notation used across the trading
//! pipeline: an unsigned amount followed by a one-letter unit, e.g. `"5t"`
//! (five ticks), `"30s"`, `"10m"`, `"3h"`, `"2d"`.
//!
//! Tick intervals count market tick events rather than wall time, so they
//! have no wall-clock length; all other units convert to a [`TimeSpan`].
//!
//! # Examples
//!
//! ```
//! use contract_core::types::interval::{Interval, IntervalUnit};
//!
//! let hours: Interval = "3h".parse().unwrap();
//! assert_eq!(hours.amount(), 3);
//! assert_eq!(hours.unit(), IntervalUnit::Hour);
//! assert_eq!(hours.as_timespan().unwrap().seconds(), 10_800);
//!
//! let ticks: Interval = "5t".parse().unwrap();
//! assert!(ticks.is_tick());
//! assert!(ticks.as_timespan().is_none());
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::IntervalError;
use super::time::TimeSpan;

/// Unit of a compact duration string.
///
/// # Variants
/// - `Tick`: Market tick events (no wall-clock length)
/// - `Second`, `Minute`, `Hour`, `Day`: Wall-clock units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalUnit {
    /// Market tick events. Counts events, not wall time.
    Tick,
    /// Wall-clock seconds.
    Second,
    /// Wall-clock minutes.
    Minute,
    /// Wall-clock hours.
    Hour,
    /// Wall-clock days.
    Day,
}

impl IntervalUnit {
    /// Returns the one-letter wire suffix for this unit.
    ///
    /// # Examples
    ///
    /// ```
    /// use contract_core::types::interval::IntervalUnit;
    ///
    /// assert_eq!(IntervalUnit::Tick.suffix(), 't');
    /// assert_eq!(IntervalUnit::Hour.suffix(), 'h');
    /// ```
    #[inline]
    pub fn suffix(&self) -> char {
        match self {
            IntervalUnit::Tick => 't',
            IntervalUnit::Second => 's',
            IntervalUnit::Minute => 'm',
            IntervalUnit::Hour => 'h',
            IntervalUnit::Day => 'd',
        }
    }

    /// Parses a unit from its wire suffix (case-insensitive).
    fn from_suffix(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            't' => Some(IntervalUnit::Tick),
            's' => Some(IntervalUnit::Second),
            'm' => Some(IntervalUnit::Minute),
            'h' => Some(IntervalUnit::Hour),
            'd' => Some(IntervalUnit::Day),
            _ => None,
        }
    }

    /// Returns the number of seconds in one unit, or `None` for ticks.
    fn unit_seconds(&self) -> Option<i64> {
        match self {
            IntervalUnit::Tick => None,
            IntervalUnit::Second => Some(1),
            IntervalUnit::Minute => Some(60),
            IntervalUnit::Hour => Some(3_600),
            IntervalUnit::Day => Some(86_400),
        }
    }
}

/// A parsed compact duration: an amount and a unit.
///
/// # Examples
///
/// ```
/// use contract_core::types::interval::{Interval, IntervalUnit};
///
/// let interval = Interval::new(2, IntervalUnit::Day);
/// assert_eq!(interval.to_string(), "2d");
/// assert_eq!(interval.as_timespan().unwrap().seconds(), 172_800);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    amount: u32,
    unit: IntervalUnit,
}

impl Interval {
    /// Creates an interval from an amount and a unit.
    #[inline]
    pub fn new(amount: u32, unit: IntervalUnit) -> Self {
        Interval { amount, unit }
    }

    /// Returns the amount component.
    #[inline]
    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// Returns the unit component.
    #[inline]
    pub fn unit(&self) -> IntervalUnit {
        self.unit
    }

    /// Returns whether this interval counts ticks rather than wall time.
    #[inline]
    pub fn is_tick(&self) -> bool {
        self.unit == IntervalUnit::Tick
    }

    /// Returns the wall-clock length of this interval.
    ///
    /// Tick intervals have no wall-clock length and return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use contract_core::types::Interval;
    ///
    /// let minutes: Interval = "10m".parse().unwrap();
    /// assert_eq!(minutes.as_timespan().unwrap().seconds(), 600);
    ///
    /// let ticks: Interval = "7t".parse().unwrap();
    /// assert!(ticks.as_timespan().is_none());
    /// ```
    pub fn as_timespan(&self) -> Option<TimeSpan> {
        self.unit
            .unit_seconds()
            .map(|secs| TimeSpan::from_seconds(secs * i64::from(self.amount)))
    }
}

impl FromStr for Interval {
    type Err = IntervalError;

    /// Parses a compact duration string such as `"5t"` or `"3h"`.
    ///
    /// The amount must be an unsigned integer and the suffix one of
    /// `t`, `s`, `m`, `h`, `d` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, IntervalError> {
        let trimmed = s.trim();
        let invalid = || IntervalError::InvalidDuration(s.to_string());

        if trimmed.len() < 2 || !trimmed.is_ascii() {
            return Err(invalid());
        }
        let (digits, suffix) = trimmed.split_at(trimmed.len() - 1);
        let unit = suffix
            .chars()
            .next()
            .and_then(IntervalUnit::from_suffix)
            .ok_or_else(invalid)?;

        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let amount: u32 = digits.parse().map_err(|_| invalid())?;

        Ok(Interval { amount, unit })
    }
}

impl fmt::Display for Interval {
    /// Formats the canonical lower-case wire form, e.g. `5t`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Interval;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for Interval {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Interval {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Interval::from_str(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_units() {
        assert_eq!(
            "5t".parse::<Interval>().unwrap(),
            Interval::new(5, IntervalUnit::Tick)
        );
        assert_eq!(
            "30s".parse::<Interval>().unwrap(),
            Interval::new(30, IntervalUnit::Second)
        );
        assert_eq!(
            "10m".parse::<Interval>().unwrap(),
            Interval::new(10, IntervalUnit::Minute)
        );
        assert_eq!(
            "3h".parse::<Interval>().unwrap(),
            Interval::new(3, IntervalUnit::Hour)
        );
        assert_eq!(
            "2d".parse::<Interval>().unwrap(),
            Interval::new(2, IntervalUnit::Day)
        );
    }

    #[test]
    fn test_parse_case_insensitive_suffix() {
        assert_eq!(
            "5T".parse::<Interval>().unwrap(),
            Interval::new(5, IntervalUnit::Tick)
        );
        assert_eq!(
            "3H".parse::<Interval>().unwrap(),
            Interval::new(3, IntervalUnit::Hour)
        );
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "t", "5", "5x", "-5t", "+5t", "5.5h", "h5", "5 t"] {
            let result = input.parse::<Interval>();
            assert!(result.is_err(), "expected {:?} to fail", input);
            assert_eq!(
                result.unwrap_err(),
                IntervalError::InvalidDuration(input.to_string())
            );
        }
    }

    #[test]
    fn test_as_timespan_temporal() {
        assert_eq!(
            "30s".parse::<Interval>().unwrap().as_timespan().unwrap().seconds(),
            30
        );
        assert_eq!(
            "10m".parse::<Interval>().unwrap().as_timespan().unwrap().seconds(),
            600
        );
        assert_eq!(
            "3h".parse::<Interval>().unwrap().as_timespan().unwrap().seconds(),
            10_800
        );
        assert_eq!(
            "2d".parse::<Interval>().unwrap().as_timespan().unwrap().seconds(),
            172_800
        );
    }

    #[test]
    fn test_tick_interval_has_no_timespan() {
        let ticks: Interval = "5t".parse().unwrap();
        assert!(ticks.is_tick());
        assert!(ticks.as_timespan().is_none());
    }

    #[test]
    fn test_display_canonical() {
        assert_eq!("5T".parse::<Interval>().unwrap().to_string(), "5t");
        assert_eq!("10m".parse::<Interval>().unwrap().to_string(), "10m");
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_interval_serde_roundtrip() {
            let interval: Interval = "5t".parse().unwrap();
            let json = serde_json::to_string(&interval).unwrap();
            assert_eq!(json, "\"5t\"");

            let parsed: Interval = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, interval);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn unit_strategy() -> impl Strategy<Value = IntervalUnit> {
            prop_oneof![
                Just(IntervalUnit::Tick),
                Just(IntervalUnit::Second),
                Just(IntervalUnit::Minute),
                Just(IntervalUnit::Hour),
                Just(IntervalUnit::Day),
            ]
        }

        proptest! {
            #[test]
            fn test_display_parse_roundtrip(amount in 0u32..1_000_000u32, unit in unit_strategy()) {
                let interval = Interval::new(amount, unit);
                let reparsed: Interval = interval.to_string().parse().unwrap();
                prop_assert_eq!(reparsed, interval);
            }

            #[test]
            fn test_timespan_scales_with_amount(amount in 1u32..10_000u32) {
                let one = Interval::new(1, IntervalUnit::Minute).as_timespan().unwrap();
                let many = Interval::new(amount, IntervalUnit::Minute).as_timespan().unwrap();
                prop_assert_eq!(many.seconds(), one.seconds() * i64::from(amount));
            }
        }
    }
}
