//! Movement primitives.

use std::fmt;

use vn_core::{Cell, Vec3};

/// One primitive of a simplified path.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathElement {
    /// Walk to a single cell.
    Travel(Cell),
    /// Walk in a straight line from `from` to `to` (same height).
    TravelVector { from: Cell, to: Cell },
    /// Hop onto this cell.
    Jump(Cell),
    /// Step off an edge at this cell and drop.
    Fall(Cell),
}

impl PathElement {
    /// Cell the walker steers towards.
    pub fn destination(&self) -> Cell {
        match *self {
            Self::Travel(c) | Self::Jump(c) | Self::Fall(c) => c,
            Self::TravelVector { to, .. } => to,
        }
    }

    pub fn is_travel(&self) -> bool {
        matches!(self, Self::Travel(_))
    }

    /// `true` if an agent with feet at `pos` is on this element.
    ///
    /// A cell element is occupied when the agent's feet are in that cell.  A
    /// travel vector is occupied anywhere along its segment: same height,
    /// projection inside the segment, and within half a cell sideways.
    pub fn occupied_by(&self, pos: Vec3) -> bool {
        match *self {
            Self::Travel(c) | Self::Jump(c) | Self::Fall(c) => Cell::containing(pos) == c,
            Self::TravelVector { from, to } => {
                if Cell::containing(pos).y != from.y {
                    return false;
                }
                let a = from.center().horizontal();
                let b = to.center().horizontal();
                let p = pos.horizontal();
                let ab = b - a;
                let len2 = ab.dot(ab);
                if len2 <= f64::EPSILON {
                    return p.distance(a) <= 0.5;
                }
                let t = (p - a).dot(ab) / len2;
                if !(0.0..=1.0).contains(&t) {
                    return false;
                }
                p.distance(a + ab * t) <= 0.5
            }
        }
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Travel(c) => write!(f, "travel {c}"),
            Self::TravelVector { from, to } => write!(f, "travel {from} -> {to}"),
            Self::Jump(c) => write!(f, "jump {c}"),
            Self::Fall(c) => write!(f, "fall {c}"),
        }
    }
}
