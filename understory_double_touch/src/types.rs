// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: touch identifiers, stored records, and the dispatch seam.
//!
//! ## Overview
//!
//! These types are shared by the [`pool`](crate::pool), the [`detector`](crate::detector)
//! and the [`interaction`](crate::interaction) layer.

/// Event type of the synthesized double-touch event.
pub const DBLTOUCH: &str = "dbltouch";

/// Identifier of a recorded touch-start.
///
/// Ids are assigned by [`EventPool::add`](crate::pool::EventPool::add) in arrival order,
/// starting at `0`, and are never reused within a pool.
///
/// ## Notes
///
/// - Two records are adjacent when their ids differ by exactly one.
/// - `u64` is ample for practical lifetimes; behavior on overflow is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TouchId(pub(crate) u64);

impl TouchId {
    /// Raw numeric value of this id.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id assigned immediately before this one, if any.
    pub const fn prev(self) -> Option<Self> {
        match self.0.checked_sub(1) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Returns `true` if `other` was assigned immediately before or after `self`.
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.0.abs_diff(other.0) == 1
    }
}

/// One accepted, hit-confirmed touch-start.
///
/// Records are created by [`EventPool::add`](crate::pool::EventPool::add) and are
/// immutable afterwards. The `target` is an opaque handle supplied by the host and is
/// compared only with `==`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TouchRecord<K> {
    pub(crate) id: TouchId,
    pub(crate) timestamp: u64,
    pub(crate) target: K,
}

impl<K: Copy> TouchRecord<K> {
    /// Pool-assigned identifier.
    pub fn id(&self) -> TouchId {
        self.id
    }

    /// Creation time in milliseconds, as reported by the pool's [`Clock`](crate::clock::Clock).
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Handle of the target that was hit.
    pub fn target(&self) -> K {
        self.target
    }

    /// Milliseconds elapsed since creation, saturating at zero if `now` is earlier.
    pub fn age_at(&self, now: u64) -> u64 {
        now.saturating_sub(self.timestamp)
    }
}

/// Deliver a synthesized event to a target.
///
/// Implemented by the host's dispatch layer. Delivery is synchronous: it happens before
/// the call that triggered it returns. Closures of the form
/// `FnMut(K, &str, &E)` implement this trait.
pub trait Dispatcher<K, E: ?Sized> {
    /// Deliver `payload` to `target` as a normal event of type `event_type`.
    fn dispatch(&mut self, target: K, event_type: &str, payload: &E);
}

impl<K, E: ?Sized, F> Dispatcher<K, E> for F
where
    F: FnMut(K, &str, &E),
{
    #[inline]
    fn dispatch(&mut self, target: K, event_type: &str, payload: &E) {
        self(target, event_type, payload);
    }
}
