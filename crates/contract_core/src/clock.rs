//! Present-time sources.
//!
//! Contract construction reads "now" when no pricing or start time is
//! supplied. The [`Clock`] trait makes that read injectable so that
//! time-dependent behaviour is deterministic under test.
//!
//! # Examples
//!
//! ```
//! use contract_core::clock::{Clock, FixedClock, SystemClock};
//! use contract_core::types::Instant;
//!
//! let pinned = Instant::from_epoch(1_700_000_000).unwrap();
//! let clock = FixedClock::new(pinned);
//! assert_eq!(clock.now(), pinned);
//!
//! // The wall clock moves forward
//! let wall = SystemClock;
//! assert!(wall.now().epoch() > 0);
//! ```

use chrono::Utc;

use crate::types::Instant;

/// A source of the present time.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::from_datetime(Utc::now())
    }
}

/// A clock pinned to a fixed instant. Test double for [`SystemClock`].
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(Instant);

impl FixedClock {
    /// Creates a clock that always reports the given instant.
    pub fn new(instant: Instant) -> Self {
        FixedClock(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.0
    }
}
