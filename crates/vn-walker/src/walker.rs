//! The walker state machine.

use std::collections::VecDeque;

use tracing::{debug, trace};

use vn_core::{Controls, Facing, Vec3, WalkerConfig};
use vn_path::PathElement;
use vn_world::World;

use crate::keys::movement_keys;
use crate::target::{predicted_stop, WalkTarget};
use crate::{WalkerError, WalkerResult};

/// Result of one [`Walker::tick`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WalkerStatus {
    /// Nothing to do; controls are released.
    Idle,
    /// Still walking; controls hold this tick's signals.
    Walking,
    /// The last element was reached during this tick.
    Finished,
}

/// Follows one segment of [`PathElement`]s.
///
/// The walker is `Active` while its queue is non-empty and `Idle` otherwise.
/// It owns the published [`Controls`]; anything it is not actively asserting
/// is released.
pub struct Walker {
    config:   WalkerConfig,
    queue:    VecDeque<PathElement>,
    controls: Controls,
}

impl Walker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config, queue: VecDeque::new(), controls: Controls::default() }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Begin walking `elements`, replacing any segment in flight.
    pub fn start(&mut self, elements: Vec<PathElement>) -> WalkerResult<()> {
        if elements.is_empty() {
            return Err(WalkerError::EmptySegment);
        }
        debug!(elements = elements.len(), "walker: segment started");
        self.queue = elements.into();
        self.controls = Controls::default();
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Stop immediately and release every signal.  Safe while idle.
    pub fn cancel(&mut self) {
        if self.is_active() {
            debug!(remaining = self.queue.len(), "walker: cancelled");
        }
        self.queue.clear();
        self.controls = Controls::default();
    }

    /// Signals for the current tick.
    pub fn controls(&self) -> Controls {
        self.controls
    }

    /// Elements not yet reached, current target first.
    pub fn remaining(&self) -> impl Iterator<Item = &PathElement> + '_ {
        self.queue.iter()
    }

    /// Snapshot of the remaining path for display; empty while idle.
    pub fn path_overlay(&self) -> Vec<PathElement> {
        self.queue.iter().copied().collect()
    }

    pub fn current_target(&self) -> Option<WalkTarget> {
        let head = *self.queue.front()?;
        Some(WalkTarget::new(head, self.queue.get(1)))
    }

    /// Advance one tick against a fresh snapshot of `world`.
    ///
    /// On error the queue is left as it was; the caller decides whether to
    /// cancel.
    pub fn tick<W: World + ?Sized>(&mut self, world: &W) -> WalkerResult<WalkerStatus> {
        if self.queue.is_empty() {
            self.controls = Controls::default();
            return Ok(WalkerStatus::Idle);
        }
        let pos = world.agent_position()?;
        let velocity = world.agent_velocity()?;
        let facing = world.agent_facing()?;

        self.skip_overshoot(pos);

        let prediction = predicted_stop(velocity, &self.config);
        while let Some(target) = self.current_target() {
            if !target.reached(pos, prediction, &self.config) {
                break;
            }
            trace!(target = %target.aim(), "walker: target reached");
            self.queue.pop_front();
        }

        let Some(target) = self.current_target() else {
            debug!(at = %pos, "walker: segment finished");
            self.controls = Controls::default();
            return Ok(WalkerStatus::Finished);
        };

        self.controls = self.steer(target, pos, facing);
        Ok(WalkerStatus::Walking)
    }

    /// Drop elements the agent has already passed.
    ///
    /// Finds the first queued element the agent is standing on.  If that is
    /// not the current target, everything before it is dropped, and the
    /// element itself too when it has a successor and is not a travel vector
    /// or a jump (those are manoeuvres still in progress).
    fn skip_overshoot(&mut self, pos: Vec3) {
        let Some(i) = self.queue.iter().position(|e| e.occupied_by(pos)) else {
            return;
        };
        if i == 0 {
            return;
        }
        let in_progress = matches!(
            self.queue[i],
            PathElement::TravelVector { .. } | PathElement::Jump(_)
        );
        let cut = if i + 1 < self.queue.len() && !in_progress { i + 1 } else { i };
        trace!(skipped = cut, "walker: overshoot");
        self.queue.drain(..cut);
    }

    fn steer(&self, target: WalkTarget, pos: Vec3, facing: Facing) -> Controls {
        let yaw = Facing::bearing(pos, target.aim().center());
        let pitch = if target.is_jump() { self.config.jump_pitch } else { self.config.walk_pitch };
        let mut keys = movement_keys(facing.yaw, yaw);
        keys.jump = target.wants_jump(pos, &self.config);
        Controls { keys, look: Some(Facing::new(yaw, pitch)) }
    }
}

impl Default for Walker {
    fn default() -> Self {
        Self::new(WalkerConfig::default())
    }
}
