//! A world whose agent is positioned by hand.
//!
//! `ProbeWorld` has no physics: the owner teleports the agent between ticks.
//! Scripts use it to replay recorded positions; tests use it to hold an agent
//! still or to simulate the query surface going away mid-journey.

use vn_core::{Cell, Facing, Vec3};

use crate::{GridWorld, World, WorldError, WorldResult};

#[derive(Clone, Debug)]
pub struct ProbeWorld {
    pub grid:     GridWorld,
    pub position: Vec3,
    pub velocity: Vec3,
    pub facing:   Facing,
    unavailable:  Option<String>,
}

impl ProbeWorld {
    pub fn new(grid: GridWorld, position: Vec3) -> Self {
        Self {
            grid,
            position,
            velocity: Vec3::ZERO,
            facing: Facing::default(),
            unavailable: None,
        }
    }

    /// Stand the agent at the centre of `cell`, at rest.
    pub fn teleport(&mut self, cell: Cell) {
        self.position = cell.center();
        self.velocity = Vec3::ZERO;
    }

    /// Make every query fail with [`WorldError::Unavailable`] until
    /// [`restore`](Self::restore) is called.
    pub fn fail_with(&mut self, reason: impl Into<String>) {
        self.unavailable = Some(reason.into());
    }

    pub fn restore(&mut self) {
        self.unavailable = None;
    }

    fn check(&self) -> WorldResult<()> {
        match &self.unavailable {
            Some(reason) => Err(WorldError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl World for ProbeWorld {
    fn is_cell_solid(&self, cell: Cell) -> WorldResult<bool> {
        self.check()?;
        self.grid.is_solid(cell)
    }

    fn agent_position(&self) -> WorldResult<Vec3> {
        self.check()?;
        Ok(self.position)
    }

    fn agent_velocity(&self) -> WorldResult<Vec3> {
        self.check()?;
        Ok(self.velocity)
    }

    fn agent_facing(&self) -> WorldResult<Facing> {
        self.check()?;
        Ok(self.facing)
    }
}
