//! Traversal rules and movement costs.
//!
//! # Legality
//!
//! A candidate cell reached from a parent is checked in this order; the
//! first matching rule decides:
//!
//! 1. The cell or the cell above it is solid: illegal (no head room).
//! 2. The parent is a fall and the candidate is level with it: illegal.
//!    A fall never continues sideways.
//! 3. Solid ground directly below: [`Move::Stand`].
//! 4. The parent is one cell lower and the cell two below the candidate is
//!    solid: [`Move::Jump`] (a vertical hop off the parent's ground).
//! 5. The parent is a fall and the candidate is directly one lower:
//!    [`Move::Fall`] (falling continues).
//! 6. The parent stands on solid ground and the candidate is level with it:
//!    [`Move::Fall`] (stepping off an edge).
//! 7. Anything else is illegal.

use vn_core::Cell;
use vn_world::{World, WorldResult};

/// How a legal candidate is entered.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Move {
    Stand,
    Jump,
    Fall,
}

const STRAIGHT:     u32 = 10;
const DIAGONAL:     u32 = 14;
const WALL_PENALTY: u32 = 8;

/// Classify entering `cell` from `parent`.  `None` means illegal.
pub fn classify<W: World + ?Sized>(
    world:          &W,
    parent:         Cell,
    parent_falling: bool,
    cell:           Cell,
) -> WorldResult<Option<Move>> {
    if world.is_cell_solid(cell)? || world.is_cell_solid(cell.up(1))? {
        return Ok(None);
    }
    if parent_falling && parent.y == cell.y {
        return Ok(None);
    }
    if world.is_cell_solid(cell.down(1))? {
        return Ok(Some(Move::Stand));
    }
    if parent.y == cell.y - 1 && world.is_cell_solid(cell.down(2))? {
        return Ok(Some(Move::Jump));
    }
    if parent_falling && cell.y == parent.y - 1 {
        return Ok(Some(Move::Fall));
    }
    if parent.y == cell.y && world.is_cell_solid(parent.down(1))? {
        return Ok(Some(Move::Fall));
    }
    Ok(None)
}

/// Base cost of the step `from → to` (adjacent cells).
pub fn step_cost(from: Cell, to: Cell) -> u32 {
    let (dx, dy, dz) = to - from;
    let (dx, dy, dz) = (dx.unsigned_abs(), dy.unsigned_abs(), dz.unsigned_abs());
    if dx > 0 && dz > 0 {
        DIAGONAL + STRAIGHT * dy
    } else {
        STRAIGHT * (dx + dy + dz)
    }
}

/// Penalty for hugging walls: 8 per solid horizontal neighbour.
pub fn wall_penalty<W: World + ?Sized>(world: &W, cell: Cell) -> WorldResult<u32> {
    let mut walls = 0;
    for n in cell.horizontal_neighbors() {
        if world.is_cell_solid(n)? {
            walls += 1;
        }
    }
    Ok(WALL_PENALTY * walls)
}

/// Octile estimate `10·max(|dx|,|dz|) + 4·min(|dx|,|dz|) + 10·|dy|`.
pub fn heuristic(cell: Cell, goal: Cell) -> f64 {
    let (dx, dy, dz) = goal - cell;
    let (dx, dy, dz) = (dx.abs() as f64, dy.abs() as f64, dz.abs() as f64);
    let s = STRAIGHT as f64;
    s * dx.max(dz) + (DIAGONAL as f64 - s) * dx.min(dz) + s * dy
}
