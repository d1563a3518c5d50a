// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event pool: a self-expiring store of recent touch-starts.
//!
//! ## Storage
//!
//! Records live in an ordered map keyed by id. Memory follows the number of live
//! records, not the range of ids between the oldest survivor and the next id, so a
//! record pinned by a clock that stepped backwards costs one entry and nothing more.
//! Iteration is in ascending id order.
//!
//! ## Expiry
//!
//! [`EventPool::tick`] accumulates scheduler time. Once a full sweep interval has
//! accumulated, the pool scans every slot and removes records older than the sweep
//! interval. Expiry is eventual: a record may outlive its age limit by up to one interval.
//!
//! ```
//! use understory_double_touch::clock::ManualClock;
//! use understory_double_touch::pool::EventPool;
//!
//! let clock = ManualClock::new(0);
//! let mut pool = EventPool::new(&clock);
//! let a = pool.add("button");
//! assert_eq!(pool.get(a.id()).map(|r| r.target()), Some("button"));
//!
//! // A sweep runs once accumulated tick time reaches 1000 ms. Per-frame ticks of
//! // 1000/60 ms accumulate with rounding, so sixty `tick(1.0)` calls may fall just short.
//! clock.advance(1_001);
//! assert_eq!(pool.tick(61.0), 1);
//! assert!(pool.get(a.id()).is_none());
//! ```

use alloc::collections::BTreeMap;

use crate::clock::Clock;
use crate::config::DoubleTouchConfig;
use crate::types::{TouchId, TouchRecord};

/// Registry of live [`TouchRecord`]s.
///
/// Owned by one [`GestureDetector`](crate::detector::GestureDetector); records never
/// leave the pool by reference across calls.
pub struct EventPool<K, C> {
    records: BTreeMap<u64, TouchRecord<K>>,
    // Every key in `records` is below `next_id`.
    next_id: u64,
    sweep_interval_ms: u64,
    tick_unit_ms: f64,
    accumulated_ms: f64,
    clock: C,
}

impl<K, C> core::fmt::Debug for EventPool<K, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventPool")
            .field("live", &self.records.len())
            .field("next_id", &self.next_id)
            .field("sweep_interval_ms", &self.sweep_interval_ms)
            .field("accumulated_ms", &self.accumulated_ms)
            .finish_non_exhaustive()
    }
}

impl<K: Copy, C: Clock> EventPool<K, C> {
    /// Create an empty pool with the default configuration.
    pub fn new(clock: C) -> Self {
        Self::with_config(DoubleTouchConfig::default(), clock)
    }

    /// Create an empty pool using the sweep and tick settings of `config`.
    pub fn with_config(config: DoubleTouchConfig, clock: C) -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 0,
            sweep_interval_ms: config.sweep_interval_ms,
            tick_unit_ms: config.tick_unit_ms,
            accumulated_ms: 0.0,
            clock,
        }
    }

    /// Record a touch-start on `target`, stamped with the current time.
    pub fn add(&mut self, target: K) -> TouchRecord<K> {
        let record = TouchRecord {
            id: TouchId(self.next_id),
            timestamp: self.clock.now_ms(),
            target,
        };
        self.records.insert(self.next_id, record);
        self.next_id += 1;
        log::trace!("touch {} recorded at {}ms", record.id.0, record.timestamp);
        record
    }

    /// Look up a record. Returns `None` for ids never issued or already removed.
    pub fn get(&self, id: TouchId) -> Option<TouchRecord<K>> {
        self.records.get(&id.0).copied()
    }

    /// Remove a record, returning it if it was live. Removing an absent id is a no-op.
    pub fn delete(&mut self, id: TouchId) -> Option<TouchRecord<K>> {
        self.records.remove(&id.0)
    }

    /// Advance the sweep timer by `delta` tick units and sweep once a full interval
    /// has accumulated.
    ///
    /// Returns the number of records removed by the sweep (`0` when no sweep ran).
    pub fn tick(&mut self, delta: f64) -> usize {
        self.accumulated_ms += delta * self.tick_unit_ms;
        if self.accumulated_ms < self.sweep_interval_ms as f64 {
            return 0;
        }
        self.accumulated_ms = 0.0;
        self.sweep()
    }

    /// Remove every record whose age exceeds the sweep interval.
    fn sweep(&mut self) -> usize {
        let now = self.clock.now_ms();
        let max_age = self.sweep_interval_ms;
        let before = self.records.len();
        self.records.retain(|_, r| r.age_at(now) <= max_age);
        let removed = before - self.records.len();
        if removed > 0 {
            log::debug!(
                "sweep removed {removed} expired touches, {} live",
                self.records.len()
            );
        }
        removed
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no records are live.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The id the next call to [`add`](Self::add) will assign.
    pub fn next_id(&self) -> TouchId {
        TouchId(self.next_id)
    }

    /// Milliseconds of tick time accumulated since the last sweep.
    pub fn accumulated_ms(&self) -> f64 {
        self.accumulated_ms
    }

    /// Iterate live records in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = TouchRecord<K>> + '_ {
        self.records.values().copied()
    }

    /// Current time according to this pool's clock.
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use alloc::vec;
    use alloc::vec::Vec;

    fn ids<C: Clock>(pool: &EventPool<u32, C>) -> Vec<u64> {
        pool.iter().map(|r| r.id().get()).collect()
    }

    #[test]
    fn ids_are_sequential_from_zero() {
        let clock = ManualClock::new(0);
        let mut pool = EventPool::new(&clock);
        let a = pool.add(1);
        let b = pool.add(2);
        let c = pool.add(1);
        assert_eq!((a.id().get(), b.id().get(), c.id().get()), (0, 1, 2));
        assert_eq!(pool.next_id(), TouchId(3));
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn add_stamps_current_time() {
        let clock = ManualClock::new(1_000);
        let mut pool = EventPool::new(&clock);
        let a = pool.add(1);
        clock.advance(40);
        let b = pool.add(1);
        assert_eq!(a.timestamp(), 1_000);
        assert_eq!(b.timestamp(), 1_040);
    }

    #[test]
    fn get_absent_ids() {
        let clock = ManualClock::new(0);
        let mut pool = EventPool::new(&clock);
        assert!(pool.get(TouchId(0)).is_none());
        let a = pool.add(9);
        assert_eq!(pool.get(a.id()), Some(a));
        // Never issued.
        assert!(pool.get(TouchId(1)).is_none());
        assert!(pool.get(TouchId(u64::MAX)).is_none());
    }

    #[test]
    fn delete_is_idempotent() {
        let clock = ManualClock::new(0);
        let mut pool = EventPool::new(&clock);
        let a = pool.add(1);
        let b = pool.add(2);
        assert_eq!(pool.delete(a.id()), Some(a));
        assert_eq!(pool.delete(a.id()), None);
        assert_eq!(pool.delete(TouchId(77)), None);
        assert!(pool.get(a.id()).is_none());
        assert_eq!(pool.get(b.id()), Some(b));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn deleting_out_of_order_keeps_lookups_aligned() {
        let clock = ManualClock::new(0);
        let mut pool = EventPool::new(&clock);
        let recs: Vec<_> = (0..5).map(|t| pool.add(t)).collect();
        pool.delete(recs[2].id());
        pool.delete(recs[0].id());
        assert_eq!(ids(&pool), vec![1, 3, 4]);
        pool.delete(recs[1].id());
        assert_eq!(pool.records.len(), 2);
        assert_eq!(pool.get(recs[3].id()), Some(recs[3]));
        assert_eq!(pool.get(recs[4].id()), Some(recs[4]));
        let next = pool.add(10);
        assert_eq!(next.id().get(), 5);
        assert_eq!(pool.get(next.id()), Some(next));
    }

    #[test]
    fn emptied_pool_keeps_counting() {
        let clock = ManualClock::new(0);
        let mut pool = EventPool::new(&clock);
        let a = pool.add(1);
        pool.delete(a.id());
        assert!(pool.is_empty());
        assert!(pool.records.is_empty());
        let b = pool.add(1);
        assert_eq!(b.id().get(), 1);
        assert_eq!(pool.get(b.id()), Some(b));
    }

    #[test]
    fn tick_converts_frames_and_sweeps_at_interval() {
        let clock = ManualClock::new(0);
        let mut pool = EventPool::new(&clock);
        pool.add(1);
        clock.advance(2_000);
        // 59 frames is ~983 ms: no sweep yet.
        assert_eq!(pool.tick(59.0), 0);
        assert_eq!(pool.len(), 1);
        assert!(pool.accumulated_ms() > 983.0);
        // Two more frames cross 1000 ms.
        assert_eq!(pool.tick(2.0), 1);
        assert!(pool.is_empty());
        assert_eq!(pool.accumulated_ms(), 0.0);
    }

    #[test]
    fn sweep_keeps_records_not_older_than_interval() {
        let clock = ManualClock::new(0);
        let cfg = DoubleTouchConfig::new().with_tick_unit_ms(1.0);
        let mut pool = EventPool::with_config(cfg, &clock);
        let old = pool.add(1);
        clock.set(500);
        let young = pool.add(2);
        clock.set(1_000);
        let boundary = pool.add(3);
        // Age of `old` is exactly 1000: not expired.
        assert_eq!(pool.tick(1_000.0), 0);
        assert_eq!(pool.len(), 3);

        clock.set(1_001);
        assert_eq!(pool.tick(1_000.0), 1);
        assert!(pool.get(old.id()).is_none());
        assert_eq!(pool.get(young.id()), Some(young));
        assert_eq!(pool.get(boundary.id()), Some(boundary));

        clock.set(2_001);
        assert_eq!(pool.tick(1_000.0), 2);
        assert!(pool.is_empty());
        assert_eq!(pool.next_id(), TouchId(3));
    }

    #[test]
    fn sweep_removes_from_the_middle() {
        let clock = ManualClock::new(0);
        let cfg = DoubleTouchConfig::new().with_tick_unit_ms(1.0);
        let mut pool = EventPool::with_config(cfg, &clock);
        // A clock that stepped back leaves a young record ahead of an old one.
        clock.set(5_000);
        let young = pool.add(1);
        clock.set(0);
        let old = pool.add(2);
        clock.set(5_000);
        assert_eq!(pool.tick(1_000.0), 1);
        assert_eq!(pool.get(young.id()), Some(young));
        assert!(pool.get(old.id()).is_none());
        assert_eq!(ids(&pool), vec![0]);
    }

    #[test]
    fn accumulated_time_resets_even_when_nothing_expires() {
        let clock = ManualClock::new(0);
        let cfg = DoubleTouchConfig::new().with_tick_unit_ms(1.0);
        let mut pool = EventPool::with_config(cfg, &clock);
        pool.add(1);
        assert_eq!(pool.tick(1_500.0), 0);
        assert_eq!(pool.accumulated_ms(), 0.0);
        clock.set(1_200);
        // Next sweep needs another full interval of ticks.
        assert_eq!(pool.tick(999.0), 0);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.tick(1.0), 1);
    }

    #[test]
    fn pinned_record_does_not_grow_storage() {
        let clock = ManualClock::new(3_600_000);
        let cfg = DoubleTouchConfig::new().with_tick_unit_ms(1.0);
        let mut pool = EventPool::with_config(cfg, &clock);
        let pinned = pool.add(u32::MAX);
        // Wall clock steps back an hour: `pinned` now has age 0 and survives sweeps.
        clock.set(0);
        for i in 0..100_000_u32 {
            clock.advance(10);
            pool.add(i % 2);
            pool.tick(10.0);
        }
        assert_eq!(pool.get(pinned.id()), Some(pinned));
        // One sweep interval of touches plus the pinned record.
        assert!(pool.len() <= 102, "live = {}", pool.len());
        assert_eq!(pool.records.len(), pool.len());
        assert_eq!(pool.next_id(), TouchId(100_001));
    }

    #[test]
    fn per_frame_ticks_sweep_within_one_extra_frame() {
        let clock = ManualClock::new(0);
        let mut pool = EventPool::new(&clock);
        pool.add(1);
        clock.set(5_000);
        let mut frames = 0;
        while pool.tick(1.0) == 0 {
            frames += 1;
            assert!(frames <= 61, "no sweep after {frames} frames");
        }
        // Swept on the 60th or 61st frame, depending on rounding.
        assert!(frames >= 59, "swept early after {frames} frames");
        assert!(pool.is_empty());
    }
}
