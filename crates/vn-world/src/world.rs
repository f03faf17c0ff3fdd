//! The read-only world query trait.

use vn_core::{Cell, Facing, Vec3};

use crate::WorldResult;

/// Snapshot queries the navigation engine issues every tick.
///
/// Every method is fallible: a failure anywhere inside a tick is caught at
/// the navigator boundary, which fails the current journey instead of
/// leaving it half-updated.
pub trait World {
    /// `true` if the agent cannot occupy `cell`.
    fn is_cell_solid(&self, cell: Cell) -> WorldResult<bool>;

    /// Feet position of the agent.
    fn agent_position(&self) -> WorldResult<Vec3>;

    /// Agent velocity in cells per tick.
    fn agent_velocity(&self) -> WorldResult<Vec3>;

    fn agent_facing(&self) -> WorldResult<Facing>;

    /// `true` if an upright agent fits in `cell`: the cell and the one above
    /// are both passable.  Ground beneath is not required.
    fn is_walkable(&self, cell: Cell) -> WorldResult<bool> {
        Ok(!self.is_cell_solid(cell)? && !self.is_cell_solid(cell.up(1))?)
    }

    /// The cell the agent's feet are in.
    fn agent_cell(&self) -> WorldResult<Cell> {
        self.agent_position().map(Cell::containing)
    }
}

impl<W: World + ?Sized> World for &W {
    fn is_cell_solid(&self, cell: Cell) -> WorldResult<bool> {
        (**self).is_cell_solid(cell)
    }

    fn agent_position(&self) -> WorldResult<Vec3> {
        (**self).agent_position()
    }

    fn agent_velocity(&self) -> WorldResult<Vec3> {
        (**self).agent_velocity()
    }

    fn agent_facing(&self) -> WorldResult<Facing> {
        (**self).agent_facing()
    }
}
