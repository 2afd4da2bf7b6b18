//! # contract_core: Foundation Types for the Contract Workspace
//!
//! ## Layer Role
//!
//! contract_core is the bottom layer of the workspace, providing:
//! - Time types: `Instant`, `TimeSpan` (`types::time`)
//! - Duration strings: `Interval`, `IntervalUnit` (`types::interval`)
//! - Present-time sources: `Clock`, `SystemClock`, `FixedClock` (`clock`)
//! - Error types: `TimeError`, `IntervalError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! This layer has no dependencies on the other contract_* crates, with
//! minimal external dependencies:
//! - chrono: Date arithmetic
//! - thiserror: Structured errors
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use contract_core::clock::{Clock, FixedClock};
//! use contract_core::types::{Instant, Interval, TimeSpan};
//!
//! // Epoch-based instants
//! let start = Instant::from_epoch(1_700_000_000).unwrap();
//! let expiry = Instant::from_epoch(1_700_086_400).unwrap();
//! let span: TimeSpan = expiry - start;
//! assert_eq!(span.seconds(), 86_400);
//! assert!((span.in_days() - 1.0).abs() < 1e-12);
//!
//! // Duration strings
//! let five_ticks: Interval = "5t".parse().unwrap();
//! assert!(five_ticks.is_tick());
//!
//! // Deterministic time source for tests
//! let clock = FixedClock::new(start);
//! assert_eq!(clock.now(), start);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod clock;
pub mod types;
