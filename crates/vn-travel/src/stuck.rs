//! Raw-displacement stuck detection.

use vn_core::{TravelConfig, Vec3};

/// What the detector concluded this tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StuckVerdict {
    /// Moving, idle, or not still for long enough yet.
    Fine,
    /// Still for the whole window while the walker was active.
    /// `escalate` is set once too many restarts have happened in a row.
    Restart { escalate: bool },
}

/// Counts consecutive ticks in which the agent stays within a small radius
/// of an anchor point while the walker is trying to move it.
#[derive(Clone, Debug, Default)]
pub struct StuckDetector {
    anchor:        Option<Vec3>,
    still_ticks:   u64,
    auto_restarts: u32,
}

impl StuckDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn still_ticks(&self) -> u64 {
        self.still_ticks
    }

    pub fn auto_restarts(&self) -> u32 {
        self.auto_restarts
    }

    /// Feed one tick's position.  The tick that sets the anchor counts as
    /// still, so a stationary agent fires on exactly the window-th tick.
    pub fn observe(&mut self, pos: Vec3, walker_active: bool, config: &TravelConfig) -> StuckVerdict {
        let anchor = *self.anchor.get_or_insert(pos);
        if pos.distance(anchor) > config.stuck_displacement {
            self.anchor = Some(pos);
            self.still_ticks = 0;
            return StuckVerdict::Fine;
        }
        if !walker_active {
            self.still_ticks = 0;
            return StuckVerdict::Fine;
        }
        self.still_ticks += 1;
        if self.still_ticks < config.stuck_window_ticks {
            return StuckVerdict::Fine;
        }

        self.still_ticks = 0;
        self.anchor = Some(pos);
        self.auto_restarts += 1;
        let escalate = self.auto_restarts > config.max_auto_restarts;
        if escalate {
            self.auto_restarts = 0;
        }
        StuckVerdict::Restart { escalate }
    }
}
