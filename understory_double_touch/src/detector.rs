// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture detector: turns pairs of confirmed touch-starts into `dbltouch`.
//!
//! ## Pairing rule
//!
//! On each [`GestureDetector::notify_hit`] the detector records the touch as `curr` and
//! looks up `prev`, the record whose id is `curr.id - 1`. The pair fires when all hold:
//!
//! - `prev` and `curr` are adjacent by id,
//! - both hit the same target,
//! - `curr.timestamp - prev.timestamp < pair_window_ms`.
//!
//! On a fire, `dbltouch` is dispatched to the target before `notify_hit` returns and
//! `prev` is deleted from the pool. `curr` stays and may pair with the next touch.
//!
//! ## Record states
//!
//! A record is created alive. It leaves the pool either as the consumed `prev` half of a
//! pair or through an expiry sweep. Neither transition can be undone.
//!
//! ```
//! use understory_double_touch::clock::ManualClock;
//! use understory_double_touch::detector::GestureDetector;
//!
//! let clock = ManualClock::new(0);
//! let mut d = GestureDetector::new(&clock);
//! let mut count = 0;
//! let mut sink = |_t: char, _kind: &str, _e: &()| count += 1;
//!
//! // A, B, A: the two A touches are not adjacent, so nothing fires.
//! for t in ['A', 'B', 'A'] {
//!     clock.advance(50);
//!     d.notify_hit(t, &(), &mut sink);
//! }
//! assert_eq!(count, 0);
//! ```

use crate::clock::Clock;
use crate::config::DoubleTouchConfig;
use crate::pool::EventPool;
use crate::types::{DBLTOUCH, Dispatcher, TouchRecord};

/// Double-touch detector over a private [`EventPool`].
pub struct GestureDetector<K, C> {
    pool: EventPool<K, C>,
    pair_window_ms: u64,
}

impl<K, C> core::fmt::Debug for GestureDetector<K, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GestureDetector")
            .field("pair_window_ms", &self.pair_window_ms)
            .field("pool", &self.pool)
            .finish()
    }
}

impl<K: Copy + Eq, C: Clock> GestureDetector<K, C> {
    /// Create a detector with the default configuration.
    pub fn new(clock: C) -> Self {
        Self::with_config(DoubleTouchConfig::default(), clock)
    }

    /// Create a detector with an explicit configuration.
    pub fn with_config(config: DoubleTouchConfig, clock: C) -> Self {
        Self {
            pool: EventPool::with_config(config, clock),
            pair_window_ms: config.pair_window_ms,
        }
    }

    /// Handle a touch-start that the host confirmed hits `target`.
    ///
    /// Call exactly once per confirmed hit, in arrival order. If the touch completes a
    /// double touch, `dbltouch` is delivered to `target` through `dispatcher` with `event`
    /// as payload. Returns `true` if it fired.
    pub fn notify_hit<E, D>(&mut self, target: K, event: &E, dispatcher: &mut D) -> bool
    where
        E: ?Sized,
        D: Dispatcher<K, E> + ?Sized,
    {
        let curr = self.pool.add(target);
        let Some(prev) = curr.id().prev().and_then(|id| self.pool.get(id)) else {
            return false;
        };
        if !self.is_double_touch(&prev, &curr) {
            return false;
        }
        log::debug!(
            "dbltouch: touches {} and {} {}ms apart",
            prev.id().get(),
            curr.id().get(),
            curr.timestamp().saturating_sub(prev.timestamp())
        );
        dispatcher.dispatch(target, DBLTOUCH, event);
        self.pool.delete(prev.id());
        true
    }

    /// The pairing predicate: adjacent ids, same target, and inside the pairing window.
    pub fn is_double_touch(&self, prev: &TouchRecord<K>, curr: &TouchRecord<K>) -> bool {
        let adjacent = prev.id().is_adjacent(curr.id());
        let same_target = prev.target() == curr.target();
        let in_window =
            curr.timestamp().saturating_sub(prev.timestamp()) < self.pair_window_ms;
        adjacent && same_target && in_window
    }

    /// Advance the pool's sweep timer by `delta` scheduler tick units.
    ///
    /// Returns the number of expired records removed.
    pub fn tick(&mut self, delta: f64) -> usize {
        self.pool.tick(delta)
    }

    /// Read-only access to the underlying pool.
    pub fn pool(&self) -> &EventPool<K, C> {
        &self.pool
    }

    /// The pairing window in milliseconds.
    pub fn pair_window_ms(&self) -> u64 {
        self.pair_window_ms
    }
}
