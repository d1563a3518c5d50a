// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Double Touch: a `no_std` detector for double-touch gestures.
//!
//! ## Overview
//!
//! A double touch is two touch-starts on the same target within a short window.
//! This crate correlates touch-starts that a host has already hit-tested and
//! decides when to synthesize a [`DBLTOUCH`](crate::types::DBLTOUCH) event.
//! It does not perform hit testing, pointer capture, or event normalization.
//!
//! ## Pieces
//!
//! - [`EventPool`](crate::pool::EventPool): a store of recent touch-starts keyed by a
//!   monotonically increasing [`TouchId`](crate::types::TouchId). Records expire through
//!   a periodic sweep driven by [`tick`](crate::pool::EventPool::tick).
//! - [`GestureDetector`](crate::detector::GestureDetector): records each confirmed hit,
//!   looks at the record created immediately before it, and fires when the pair is
//!   adjacent, on the same target, and inside the pairing window.
//! - [`DoubleTouchInteraction`](crate::interaction::DoubleTouchInteraction): wires a
//!   detector into a host with explicit `activate`/`deactivate` hooks and hit-tests
//!   each normalized touch point.
//!
//! ## Pairing
//!
//! Adjacency is measured in arrival order across the whole pool, not per target.
//! A touch on an unrelated target between two touches on the same target breaks the pair.
//! This is a known limitation; callers that need per-target pairing should run one
//! detector per target group.
//!
//! ## Minimal usage
//!
//! ```
//! use understory_double_touch::clock::ManualClock;
//! use understory_double_touch::detector::GestureDetector;
//! use understory_double_touch::types::DBLTOUCH;
//!
//! let clock = ManualClock::new(0);
//! let mut detector = GestureDetector::new(&clock);
//! let mut fired = Vec::new();
//! let mut sink = |target: u32, kind: &str, _event: &()| fired.push((target, kind.to_owned()));
//!
//! detector.notify_hit(7_u32, &(), &mut sink);
//! clock.advance(100);
//! detector.notify_hit(7_u32, &(), &mut sink);
//!
//! assert_eq!(fired, vec![(7, DBLTOUCH.to_owned())]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `kurbo/std` and [`SystemClock`](crate::clock::SystemClock).
//! - `libm`: `no_std` numeric support for `kurbo`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod clock;
pub mod config;
pub mod detector;
pub mod interaction;
pub mod pool;
pub mod types;
