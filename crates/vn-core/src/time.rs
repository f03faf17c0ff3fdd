//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter advanced once per
//! simulation step (≈20 Hz).  Everything that the engine schedules (the
//! recalculation delay, the stuck window) is expressed in ticks and checked
//! once per tick via [`TickTimer`]; nothing re-enqueues closures.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Advance by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.0 += 1;
    }

    /// Convert a tick count to seconds at `rate_hz`.
    #[inline]
    pub fn secs_for(ticks: u64, rate_hz: u32) -> f64 {
        ticks as f64 / rate_hz.max(1) as f64
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickTimer ─────────────────────────────────────────────────────────────────

/// A repeating countdown polled once per tick.
///
/// [`poll`][Self::poll] counts one tick and returns `true` every `period`
/// ticks, resetting itself.  A period of `0` behaves like `1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickTimer {
    period:  u64,
    elapsed: u64,
}

impl TickTimer {
    pub fn new(period: u64) -> Self {
        Self { period: period.max(1), elapsed: 0 }
    }

    /// Count one tick; `true` when the period has elapsed.
    pub fn poll(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.period {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }

    /// Restart the countdown from zero.
    pub fn reset(&mut self) {
        self.elapsed = 0;
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn period(&self) -> u64 {
        self.period
    }
}
