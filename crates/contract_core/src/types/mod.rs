//! Core time and duration types.
//!
//! This module provides:
//! - `time`: Typed wall-clock instants (`Instant`) and elapsed time (`TimeSpan`)
//! - `interval`: Compact duration strings such as `"5t"` and `"3h"` (`Interval`)
//! - `error`: Structured error types for time and interval operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Instant`], [`TimeSpan`] from `time`
//! - [`Interval`], [`IntervalUnit`] from `interval`
//! - [`TimeError`], [`IntervalError`] from `error`

pub mod error;
pub mod interval;
pub mod time;

// Re-export commonly used types at module level
pub use error::{IntervalError, TimeError};
pub use interval::{Interval, IntervalUnit};
pub use time::{Instant, TimeSpan};
