//! What the walker is steering towards, and when it counts as reached.

use vn_core::{Cell, Vec3, WalkerConfig};
use vn_path::PathElement;

// ── Prediction ────────────────────────────────────────────────────────────────

/// Horizontal offset the agent would still cover if every key were released
/// now.
///
/// The current tick's motion counts twice (it is applied once more before
/// friction acts), then `prediction_ticks` further ticks of decay follow.
pub fn predicted_stop(velocity: Vec3, config: &WalkerConfig) -> Vec3 {
    let v = velocity.horizontal();
    let mut offset = v * 2.0;
    let mut step = v;
    for _ in 0..config.prediction_ticks {
        step = step * config.motion_decay;
        offset = offset + step;
    }
    offset
}

/// `true` when coasting would carry the agent past `dest` roughly in its
/// direction.
fn coasts_past(prediction: Vec3, pos: Vec3, dest: Vec3, config: &WalkerConfig) -> bool {
    let to_dest = (dest - pos).horizontal();
    prediction.length() > to_dest.length() && prediction.angle_to(to_dest) < config.arrival_angle_deg
}

// ── WalkTarget ────────────────────────────────────────────────────────────────

/// The walker's view of the element at the head of its queue.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WalkTarget {
    Travel(Cell),
    Vector { from: Cell, to: Cell },
    /// `chained` is set when the element after this one is also a jump.
    Jump { cell: Cell, chained: bool },
    Fall(Cell),
}

impl WalkTarget {
    /// Target for `head`, looking one element ahead for jump chains.
    pub fn new(head: PathElement, next: Option<&PathElement>) -> Self {
        match head {
            PathElement::Travel(c) => Self::Travel(c),
            PathElement::TravelVector { from, to } => Self::Vector { from, to },
            PathElement::Jump(cell) => Self::Jump {
                cell,
                chained: matches!(next, Some(PathElement::Jump(_))),
            },
            PathElement::Fall(c) => Self::Fall(c),
        }
    }

    /// Cell to steer towards.
    pub fn aim(&self) -> Cell {
        match *self {
            Self::Travel(c) | Self::Fall(c) => c,
            Self::Vector { to, .. } => to,
            Self::Jump { cell, .. } => cell,
        }
    }

    pub fn is_jump(&self) -> bool {
        matches!(self, Self::Jump { .. })
    }

    /// Arrival predicate for an agent with feet at `pos` whose coasting
    /// offset is `prediction`.
    pub fn reached(&self, pos: Vec3, prediction: Vec3, config: &WalkerConfig) -> bool {
        let aim = self.aim();
        let here = Cell::containing(pos);
        let coasting = || coasts_past(prediction, pos, aim.center(), config);
        match *self {
            Self::Travel(_) | Self::Vector { .. } => here == aim || coasting(),
            // Reached once over the edge column, at or below the edge.
            Self::Fall(_) => (here.same_column(aim) && here.y <= aim.y) || coasting(),
            // A jump only counts by prediction once the feet are up.
            Self::Jump { .. } => here == aim || (pos.y >= aim.y as f64 && coasting()),
        }
    }

    /// Whether the jump key should be held this tick.
    pub fn wants_jump(&self, pos: Vec3, config: &WalkerConfig) -> bool {
        let Self::Jump { cell, chained } = *self else {
            return false;
        };
        let near = pos.horizontal_distance(cell.center()) <= config.jump_trigger_distance;
        near && (chained || pos.y < cell.y as f64)
    }
}
