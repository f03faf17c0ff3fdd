//! Engine configuration.
//!
//! Every threshold the navigation engine uses lives here, grouped by the
//! subsystem that reads it.  `Default` reproduces the tuned values; the
//! stuck/timeout thresholds are empirical and only their ordering
//! (stuck window < initializing timeout < idle timeout) is checked.
//!
//! Typically loaded from a TOML file by the application crate (with the
//! `serde` feature) and passed to the navigator and command gate.

use crate::{NavError, NavResult};

// ── NavConfig ─────────────────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    /// Simulation steps per second.  Used to convert tick windows to
    /// seconds in status messages and validation.
    pub tick_rate_hz: u32,
    pub search:  SearchConfig,
    pub walker:  WalkerConfig,
    pub travel:  TravelConfig,
    pub command: CommandConfig,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 20,
            search:  SearchConfig::default(),
            walker:  WalkerConfig::default(),
            travel:  TravelConfig::default(),
            command: CommandConfig::default(),
        }
    }
}

impl NavConfig {
    /// Check ranges and the relative ordering of the stuck/timeout windows.
    pub fn validate(&self) -> NavResult<()> {
        if self.tick_rate_hz == 0 {
            return Err(NavError::Config("tick_rate_hz must be positive".into()));
        }
        self.search.validate()?;
        self.walker.validate()?;
        self.travel.validate()?;

        let stuck_ms = self.travel.stuck_window_ticks.saturating_mul(1_000) / self.tick_rate_hz as u64;
        let init_ms = self.command.init_timeout_ms;
        let idle_ms = self.command.idle_timeout_ms;
        if !(stuck_ms <= init_ms && init_ms < idle_ms) {
            return Err(NavError::Config(format!(
                "expected stuck window ({stuck_ms} ms) <= init timeout ({init_ms} ms) \
                 < idle timeout ({idle_ms} ms)"
            )));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> NavResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(NavError::Config(format!("{name} must be positive, got {value}")))
    }
}

// ── SearchConfig ──────────────────────────────────────────────────────────────

/// Early-exit policies layered over the expansion budget.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// A node this close (Euclidean, cells) to the goal counts as success.
    pub close_enough: f64,
    /// Expansions without improving the best distance-to-goal before giving up.
    pub max_non_productive: u32,
    /// Straight-line distance from the start beyond which the search stops.
    pub max_range: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { close_enough: 2.0, max_non_productive: 1_000, max_range: 200.0 }
    }
}

impl SearchConfig {
    fn validate(&self) -> NavResult<()> {
        positive("search.close_enough", self.close_enough)?;
        positive("search.max_range", self.max_range)?;
        if self.max_non_productive == 0 {
            return Err(NavError::Config("search.max_non_productive must be positive".into()));
        }
        Ok(())
    }
}

// ── WalkerConfig ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WalkerConfig {
    /// Ticks of coasting extrapolated by the arrival predicate.
    pub prediction_ticks: u32,
    /// Per-tick horizontal velocity retention while coasting.
    pub motion_decay: f64,
    /// Predicted heading must be within this many degrees of the bearing to
    /// the target for a predicted arrival to count.
    pub arrival_angle_deg: f64,
    /// Pitch requested while the current target is a jump.
    pub jump_pitch: f64,
    /// Pitch requested for every other target.
    pub walk_pitch: f64,
    /// Horizontal distance (cells) to a jump cell at which the jump key is
    /// asserted.
    pub jump_trigger_distance: f64,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            prediction_ticks:      12,
            motion_decay:          0.546,
            arrival_angle_deg:     30.0,
            jump_pitch:            -10.0,
            walk_pitch:            10.0,
            jump_trigger_distance: 1.3,
        }
    }
}

impl WalkerConfig {
    fn validate(&self) -> NavResult<()> {
        if !(0.0..1.0).contains(&self.motion_decay) {
            return Err(NavError::Config(format!(
                "walker.motion_decay must be in [0, 1), got {}",
                self.motion_decay
            )));
        }
        positive("walker.arrival_angle_deg", self.arrival_angle_deg)?;
        positive("walker.jump_trigger_distance", self.jump_trigger_distance)
    }
}

// ── TravelConfig ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TravelConfig {
    /// Maximum distance one segment is expected to solve directly.
    pub survey_radius: f64,
    /// Fraction of the survey radius within which the final destination is
    /// targeted directly instead of through another waypoint.
    pub direct_fraction: f64,
    /// The journey completes within this distance of the destination.
    pub completion_radius: f64,
    /// Ticks between long-journey progress evaluations.
    pub recalculation_delay_ticks: u64,
    /// Displacement (cells) between evaluations that counts as progress.
    pub min_progress: f64,
    /// Consecutive no-progress evaluations before forcing a new approach.
    pub stuck_strikes: u32,
    /// Per-tick displacement (cells) under which the agent counts as still.
    pub stuck_displacement: f64,
    /// Consecutive still ticks that trigger an auto-restart.
    pub stuck_window_ticks: u64,
    /// Auto-restarts tolerated before waypoint selection is biased harder.
    pub max_auto_restarts: u32,
    /// A finished segment within this distance of its waypoint "reached" it.
    pub waypoint_reached_radius: f64,
    /// Legal goal heights: `min_y <= y < max_y`.
    pub min_y: i32,
    pub max_y: i32,
    /// Seed for the last-resort random waypoint.
    pub seed: u64,
    pub budget: BudgetConfig,
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            survey_radius:             150.0,
            direct_fraction:           0.7,
            completion_radius:         5.0,
            recalculation_delay_ticks: 40,
            min_progress:              3.0,
            stuck_strikes:             3,
            stuck_displacement:        0.3,
            stuck_window_ticks:        100,
            max_auto_restarts:         3,
            waypoint_reached_radius:   10.0,
            min_y:                     -64,
            max_y:                     320,
            seed:                      0x5eed,
            budget:                    BudgetConfig::default(),
        }
    }
}

impl TravelConfig {
    fn validate(&self) -> NavResult<()> {
        positive("travel.survey_radius", self.survey_radius)?;
        positive("travel.completion_radius", self.completion_radius)?;
        positive("travel.min_progress", self.min_progress)?;
        positive("travel.stuck_displacement", self.stuck_displacement)?;
        if !(0.0..=1.0).contains(&self.direct_fraction) {
            return Err(NavError::Config("travel.direct_fraction must be in [0, 1]".into()));
        }
        if self.completion_radius >= self.survey_radius {
            return Err(NavError::Config(
                "travel.completion_radius must be smaller than the survey radius".into(),
            ));
        }
        if self.recalculation_delay_ticks == 0 || self.stuck_window_ticks == 0 {
            return Err(NavError::Config("travel tick windows must be positive".into()));
        }
        if self.min_y > self.max_y {
            return Err(NavError::Config("travel.min_y must not exceed travel.max_y".into()));
        }
        self.budget.validate()
    }

    /// Whether a goal at height `y` may be requested.
    #[inline]
    pub fn goal_height_ok(&self, y: i32) -> bool {
        (self.min_y..self.max_y).contains(&y)
    }

    /// Distance under which the final destination is targeted directly.
    #[inline]
    pub fn direct_range(&self) -> f64 {
        self.survey_radius * self.direct_fraction
    }
}

// ── BudgetConfig ──────────────────────────────────────────────────────────────

/// Expansion budgets handed to the search for each kind of segment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BudgetConfig {
    /// Short journey: `clamp(distance * short_per_cell, short_min, short_max)`.
    pub short_per_cell: f64,
    pub short_min:      u32,
    pub short_max:      u32,
    /// First waypoint of a long journey: `min(distance * first_per_cell, first_max)`.
    pub first_per_cell: f64,
    pub first_max:      u32,
    /// Final direct approach of a long journey.
    pub direct:         u32,
    /// Subsequent waypoints: `min(next_base + stuck * stuck_step, next_max)`.
    pub next_base:      u32,
    pub next_max:       u32,
    /// Auto-restart: `min(restart_base + stuck * stuck_step, restart_max)`.
    pub restart_base:   u32,
    pub restart_max:    u32,
    pub stuck_step:     u32,
    /// Cap applied when a sampled straight line to the target is mostly clear.
    pub clear_line_cap: u32,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            short_per_cell: 200.0,
            short_min:      5_000,
            short_max:      12_000,
            first_per_cell: 250.0,
            first_max:      15_000,
            direct:         10_000,
            next_base:      8_000,
            next_max:       14_000,
            restart_base:   10_000,
            restart_max:    16_000,
            stuck_step:     2_000,
            clear_line_cap: 5_000,
        }
    }
}

impl BudgetConfig {
    fn validate(&self) -> NavResult<()> {
        let ranges = [
            ("short", self.short_min, self.short_max),
            ("next", self.next_base, self.next_max),
            ("restart", self.restart_base, self.restart_max),
        ];
        for (name, lo, hi) in ranges {
            if lo == 0 || lo > hi {
                return Err(NavError::Config(format!(
                    "budget.{name}: expected 0 < {lo} <= {hi}"
                )));
            }
        }
        if self.first_max == 0 || self.direct == 0 || self.clear_line_cap == 0 {
            return Err(NavError::Config("budgets must be positive".into()));
        }
        Ok(())
    }

    pub fn short(&self, distance: f64) -> u32 {
        ((distance * self.short_per_cell) as u32).clamp(self.short_min, self.short_max)
    }

    pub fn first_waypoint(&self, distance: f64) -> u32 {
        ((distance * self.first_per_cell) as u32).clamp(1, self.first_max)
    }

    pub fn next_waypoint(&self, stuck: u32) -> u32 {
        self.next_base
            .saturating_add(stuck.saturating_mul(self.stuck_step))
            .min(self.next_max)
    }

    pub fn restart(&self, stuck: u32) -> u32 {
        self.restart_base
            .saturating_add(stuck.saturating_mul(self.stuck_step))
            .min(self.restart_max)
    }
}

// ── CommandConfig ─────────────────────────────────────────────────────────────

/// Guards on the cross-thread command surface.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CommandConfig {
    /// A hand-off still "initializing" after this long is force-cleared.
    pub init_timeout_ms: u64,
    /// A journey with no observed activity for this long is force-cleared.
    pub idle_timeout_ms: u64,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self { init_timeout_ms: 5_000, idle_timeout_ms: 30_000 }
    }
}
