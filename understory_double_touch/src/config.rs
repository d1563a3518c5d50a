// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for pairing, expiry, and tick conversion.

/// Default maximum delta between the two touches of a pair, in milliseconds.
pub const DEFAULT_PAIR_WINDOW_MS: u64 = 300;

/// Default minimum accumulated tick time between sweeps, in milliseconds.
///
/// Also the age past which an unpaired record is swept.
pub const DEFAULT_SWEEP_INTERVAL_MS: u64 = 1000;

/// Default length of one scheduler tick unit: one frame at 60 Hz.
pub const DEFAULT_TICK_UNIT_MS: f64 = 1000.0 / 60.0;

/// Configuration fixed at construction of a [`GestureDetector`](crate::detector::GestureDetector)
/// or [`DoubleTouchInteraction`](crate::interaction::DoubleTouchInteraction).
///
/// ```
/// use understory_double_touch::config::DoubleTouchConfig;
///
/// let cfg = DoubleTouchConfig::new().with_pair_window_ms(250);
/// assert_eq!(cfg.pair_window_ms, 250);
/// assert_eq!(cfg.sweep_interval_ms, 1000);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DoubleTouchConfig {
    /// Two adjacent touches on the same target pair when `curr - prev < pair_window_ms`.
    pub pair_window_ms: u64,
    /// Sweep cadence and expiry age for unpaired records.
    pub sweep_interval_ms: u64,
    /// Milliseconds represented by one unit of `tick(delta)`.
    pub tick_unit_ms: f64,
    /// Ask the host to prevent the default action of cancelable, normalized touch-starts.
    ///
    /// Only consulted by [`DoubleTouchInteraction`](crate::interaction::DoubleTouchInteraction).
    pub auto_prevent_default: bool,
}

impl Default for DoubleTouchConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DoubleTouchConfig {
    /// Configuration with the default values.
    pub const fn new() -> Self {
        Self {
            pair_window_ms: DEFAULT_PAIR_WINDOW_MS,
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
            tick_unit_ms: DEFAULT_TICK_UNIT_MS,
            auto_prevent_default: true,
        }
    }

    /// Set the pairing window.
    pub const fn with_pair_window_ms(mut self, ms: u64) -> Self {
        self.pair_window_ms = ms;
        self
    }

    /// Set the sweep interval.
    pub const fn with_sweep_interval_ms(mut self, ms: u64) -> Self {
        self.sweep_interval_ms = ms;
        self
    }

    /// Set the length of one tick unit, e.g. `1000.0 / 120.0` for a 120 Hz scheduler.
    pub const fn with_tick_unit_ms(mut self, ms: f64) -> Self {
        self.tick_unit_ms = ms;
        self
    }

    /// Enable or disable automatic prevent-default on touch-start.
    pub const fn with_auto_prevent_default(mut self, enabled: bool) -> Self {
        self.auto_prevent_default = enabled;
        self
    }
}
