// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time sources for record timestamps and sweep ages.
//!
//! The pool only needs "milliseconds since some epoch". Hosts with a platform clock
//! use [`SystemClock`] (feature `std`); headless hosts, replays, and tests use
//! [`ManualClock`] and advance it themselves.
//!
//! ```
//! use understory_double_touch::clock::{Clock, ManualClock};
//!
//! let clock = ManualClock::new(1_000);
//! clock.advance(250);
//! assert_eq!(clock.now_ms(), 1_250);
//! ```

use core::cell::Cell;

/// A source of wall-clock time in milliseconds since an arbitrary epoch.
pub trait Clock {
    /// Current time in milliseconds.
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Caller-driven clock.
///
/// Uses interior mutability so a shared reference can be handed to a detector while the
/// owner keeps advancing it.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// Create a clock reading `start_ms`.
    pub const fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Jump to an absolute time. Moving backwards is allowed.
    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    /// Move forward by `ms`, saturating at `u64::MAX`.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Wall clock measured from the Unix epoch.
///
/// Reads time through `web-time`, so it works on `wasm32` browser targets as well.
#[cfg(feature = "std")]
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        web_time::SystemTime::now()
            .duration_since(web_time::UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}
