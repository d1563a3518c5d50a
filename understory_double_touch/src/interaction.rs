// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integration layer: lifecycle hooks and hit-testing of normalized touch-starts.
//!
//! ## Overview
//!
//! [`DoubleTouchInteraction`] is owned by the host's dispatch layer. The host calls:
//!
//! 1) [`activate`](DoubleTouchInteraction::activate) when its interaction system comes up.
//!    This subscribes to the host's [`TickSource`] and, if the host supports touch input,
//!    registers the raw touch-start listener through [`TouchStartSource`].
//! 2) [`handle_touch_start`](DoubleTouchInteraction::handle_touch_start) from that listener,
//!    with the touch points the host normalized out of the raw event.
//! 3) [`tick`](DoubleTouchInteraction::tick) from the tick subscription.
//! 4) [`deactivate`](DoubleTouchInteraction::deactivate) on teardown, which returns the
//!    subscription token and removes the listener.
//!
//! The tick subscription token is moved back into [`TickSource::unsubscribe`], so each
//! registration is removed exactly once.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_double_touch::clock::ManualClock;
//! use understory_double_touch::interaction::{
//!     DoubleTouchInteraction, InteractionEvent, TouchPoint, TouchStart,
//! };
//!
//! let clock = ManualClock::new(0);
//! let mut touch: DoubleTouchInteraction<u32, _, ()> = DoubleTouchInteraction::new(&clock);
//! let button = Rect::new(0.0, 0.0, 50.0, 50.0);
//! let hit_test = |p: Point| button.contains(p).then_some(1_u32);
//! let mut fired = 0;
//! let mut sink = |_t: u32, _kind: &str, _e: &InteractionEvent<'_, &str>| fired += 1;
//!
//! let points = [TouchPoint::new(0, Point::new(10.0, 10.0))];
//! touch.handle_touch_start(&TouchStart::new(&"touchstart", &points), &hit_test, &mut sink);
//! clock.advance(120);
//! let out = touch.handle_touch_start(&TouchStart::new(&"touchstart", &points), &hit_test, &mut sink);
//! assert_eq!(out.fired, 1);
//! assert_eq!(fired, 1);
//! ```

use kurbo::Point;

use crate::clock::Clock;
use crate::config::DoubleTouchConfig;
use crate::detector::GestureDetector;
use crate::types::Dispatcher;

/// Determine which target, if any, a touch position lands on.
///
/// Implemented by the host's scene graph. Closures `Fn(Point) -> Option<K>` implement it.
pub trait HitTest<K> {
    /// Returns the topmost hit target at `position`.
    fn hit_test(&self, position: Point) -> Option<K>;
}

impl<K, F: Fn(Point) -> Option<K>> HitTest<K> for F {
    #[inline]
    fn hit_test(&self, position: Point) -> Option<K> {
        self(position)
    }
}

/// A host time source that drives [`DoubleTouchInteraction::tick`].
pub trait TickSource {
    /// Token identifying one subscription.
    type Subscription;
    /// Start calling `tick(delta)` once per host update step.
    fn subscribe(&mut self) -> Self::Subscription;
    /// Stop the calls registered by `subscription`.
    fn unsubscribe(&mut self, subscription: Self::Subscription);
}

/// Registration of the raw touch-start listener on the host's input surface.
pub trait TouchStartSource {
    /// Whether the platform delivers touch events at all.
    fn supports_touch_events(&self) -> bool;
    /// Route raw touch-starts to [`DoubleTouchInteraction::handle_touch_start`].
    fn listen_touch_start(&mut self);
    /// Undo [`listen_touch_start`](Self::listen_touch_start).
    fn unlisten_touch_start(&mut self);
}

/// One normalized touch point of a raw touch-start.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchPoint {
    /// Platform pointer/touch identifier.
    pub pointer_id: u32,
    /// Position in the coordinate space the host hit-tests in.
    pub position: Point,
}

impl TouchPoint {
    /// Create a touch point.
    pub const fn new(pointer_id: u32, position: Point) -> Self {
        Self {
            pointer_id,
            position,
        }
    }
}

/// A raw touch-start and the points normalized out of it.
#[derive(Debug)]
pub struct TouchStart<'a, E> {
    /// The raw platform event.
    pub original: &'a E,
    /// Normalized touch points, in the order the platform listed them.
    pub points: &'a [TouchPoint],
    /// Whether `points` came from platform touch data (as opposed to a synthesized pointer).
    pub normalized: bool,
    /// The raw event's cancelable flag, or `None` if the platform does not report one.
    pub cancelable: Option<bool>,
}

impl<'a, E> TouchStart<'a, E> {
    /// A normalized touch-start with no reported cancelable flag.
    pub fn new(original: &'a E, points: &'a [TouchPoint]) -> Self {
        Self {
            original,
            points,
            normalized: true,
            cancelable: None,
        }
    }
}

/// Payload delivered with a synthesized `dbltouch`.
#[derive(Debug)]
pub struct InteractionEvent<'a, E> {
    /// The touch point that completed the double touch.
    pub point: TouchPoint,
    /// The raw touch-start it came from.
    pub original: &'a E,
}

/// Result of [`DoubleTouchInteraction::handle_touch_start`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TouchStartOutcome {
    /// The host should prevent the raw event's default action.
    pub prevent_default: bool,
    /// Number of points that hit a target.
    pub hits: usize,
    /// Number of `dbltouch` events dispatched.
    pub fired: usize,
}

/// A [`GestureDetector`] wired into a host's lifecycle.
///
/// `S` is the host's [`TickSource::Subscription`] type, held while active.
pub struct DoubleTouchInteraction<K, C, S> {
    detector: GestureDetector<K, C>,
    auto_prevent_default: bool,
    subscription: Option<S>,
    listening: bool,
}

impl<K, C, S> core::fmt::Debug for DoubleTouchInteraction<K, C, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DoubleTouchInteraction")
            .field("detector", &self.detector)
            .field("auto_prevent_default", &self.auto_prevent_default)
            .field("active", &self.subscription.is_some())
            .field("listening", &self.listening)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, C: Clock, S> DoubleTouchInteraction<K, C, S> {
    /// Create an inactive interaction with the default configuration.
    pub fn new(clock: C) -> Self {
        Self::with_config(DoubleTouchConfig::default(), clock)
    }

    /// Create an inactive interaction with an explicit configuration.
    pub fn with_config(config: DoubleTouchConfig, clock: C) -> Self {
        Self {
            detector: GestureDetector::with_config(config, clock),
            auto_prevent_default: config.auto_prevent_default,
            subscription: None,
            listening: false,
        }
    }

    /// Subscribe to ticks and register the touch-start listener.
    ///
    /// The listener is only registered when the host supports touch events.
    /// Returns `false` and does nothing if already active.
    pub fn activate<T, L>(&mut self, ticks: &mut T, touches: &mut L) -> bool
    where
        T: TickSource<Subscription = S>,
        L: TouchStartSource + ?Sized,
    {
        if self.subscription.is_some() {
            return false;
        }
        self.subscription = Some(ticks.subscribe());
        if touches.supports_touch_events() {
            touches.listen_touch_start();
            self.listening = true;
        }
        log::debug!("double touch activated, listening: {}", self.listening);
        true
    }

    /// Unsubscribe from ticks and unregister the listener if it was registered.
    ///
    /// Returns `false` and does nothing if not active.
    pub fn deactivate<T, L>(&mut self, ticks: &mut T, touches: &mut L) -> bool
    where
        T: TickSource<Subscription = S>,
        L: TouchStartSource + ?Sized,
    {
        let Some(subscription) = self.subscription.take() else {
            return false;
        };
        ticks.unsubscribe(subscription);
        if core::mem::take(&mut self.listening) {
            touches.unlisten_touch_start();
        }
        log::debug!("double touch deactivated");
        true
    }

    /// Whether [`activate`](Self::activate) has run without a matching
    /// [`deactivate`](Self::deactivate).
    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    /// Hit-test each point of a touch-start and feed the hits to the detector.
    ///
    /// Points are processed in order; every point that lands on a target is one call to
    /// [`GestureDetector::notify_hit`], with an [`InteractionEvent`] as payload.
    pub fn handle_touch_start<'a, E, H, D>(
        &mut self,
        event: &TouchStart<'a, E>,
        hit_test: &H,
        dispatcher: &mut D,
    ) -> TouchStartOutcome
    where
        H: HitTest<K> + ?Sized,
        D: Dispatcher<K, InteractionEvent<'a, E>> + ?Sized,
    {
        let mut outcome = TouchStartOutcome {
            prevent_default: self.auto_prevent_default
                && event.normalized
                && event.cancelable != Some(false),
            ..TouchStartOutcome::default()
        };
        for &point in event.points {
            let Some(target) = hit_test.hit_test(point.position) else {
                continue;
            };
            outcome.hits += 1;
            let payload = InteractionEvent {
                point,
                original: event.original,
            };
            if self.detector.notify_hit(target, &payload, &mut *dispatcher) {
                outcome.fired += 1;
            }
        }
        outcome
    }

    /// Forward a host tick to the detector's pool.
    pub fn tick(&mut self, delta: f64) -> usize {
        self.detector.tick(delta)
    }

    /// The wrapped detector.
    pub fn detector(&self) -> &GestureDetector<K, C> {
        &self.detector
    }
}
