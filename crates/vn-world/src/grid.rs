//! Sparse voxel terrain.
//!
//! # Data layout
//!
//! Solid cells are stored in an `FxHashSet<Cell>`; everything not in the set
//! is air.  An optional **ground plane** makes every cell at or below a given
//! height solid without storing it, so an unbounded flat world costs nothing.
//! Optional **height limits** turn queries outside `[min_y, max_y]` into
//! [`WorldError::OutOfBounds`].
//!
//! `GridWorld` answers only terrain queries.  Pair it with an agent
//! ([`ProbeWorld`](crate::ProbeWorld), [`SimWorld`](crate::SimWorld)) to get
//! a full [`World`](crate::World).

use rustc_hash::FxHashSet;

use vn_core::Cell;

use crate::{WorldError, WorldResult};

// ── GridWorld ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct GridWorld {
    solid:  FxHashSet<Cell>,
    ground: Option<i32>,
    limits: Option<(i32, i32)>,
}

impl GridWorld {
    /// A world with no solid cells at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// An unbounded floor: every cell with `y <= ground_y` is solid.
    pub fn flat(ground_y: i32) -> Self {
        GridWorldBuilder::new().ground(ground_y).build()
    }

    pub fn is_solid(&self, cell: Cell) -> WorldResult<bool> {
        if let Some((lo, hi)) = self.limits {
            if cell.y < lo || cell.y > hi {
                return Err(WorldError::OutOfBounds(cell));
            }
        }
        if matches!(self.ground, Some(g) if cell.y <= g) {
            return Ok(true);
        }
        Ok(self.solid.contains(&cell))
    }

    /// Solid cells stored explicitly (the ground plane is not counted).
    pub fn solid_count(&self) -> usize {
        self.solid.len()
    }

    pub fn ground(&self) -> Option<i32> {
        self.ground
    }

    pub fn set_solid(&mut self, cell: Cell, solid: bool) {
        if solid {
            self.solid.insert(cell);
        } else {
            self.solid.remove(&cell);
        }
    }
}

// ── GridWorldBuilder ──────────────────────────────────────────────────────────

/// Construct a [`GridWorld`] from primitive shapes, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use vn_core::Cell;
/// use vn_world::GridWorldBuilder;
///
/// let grid = GridWorldBuilder::new()
///     .ground(63)
///     .wall_x(10, 64..=65, -5..=5)
///     .build();
/// assert!(grid.is_solid(Cell::new(10, 64, 0)).unwrap());
/// assert!(!grid.is_solid(Cell::new(9, 64, 0)).unwrap());
/// ```
#[derive(Default)]
pub struct GridWorldBuilder {
    solid:  FxHashSet<Cell>,
    ground: Option<i32>,
    limits: Option<(i32, i32)>,
}

impl GridWorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ground(mut self, y: i32) -> Self {
        self.ground = Some(y);
        self
    }

    /// Reject queries outside `min_y..=max_y`.
    pub fn height_limits(mut self, min_y: i32, max_y: i32) -> Self {
        self.limits = Some((min_y, max_y));
        self
    }

    pub fn solid(mut self, cell: Cell) -> Self {
        self.solid.insert(cell);
        self
    }

    pub fn solids(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
        self.solid.extend(cells);
        self
    }

    /// Fill the inclusive box spanned by `a` and `b`.
    pub fn fill(mut self, a: Cell, b: Cell) -> Self {
        for x in a.x.min(b.x)..=a.x.max(b.x) {
            for y in a.y.min(b.y)..=a.y.max(b.y) {
                for z in a.z.min(b.z)..=a.z.max(b.z) {
                    self.solid.insert(Cell::new(x, y, z));
                }
            }
        }
        self
    }

    /// A wall in the plane `x = x`.
    pub fn wall_x(
        self,
        x: i32,
        ys: std::ops::RangeInclusive<i32>,
        zs: std::ops::RangeInclusive<i32>,
    ) -> Self {
        self.fill(
            Cell::new(x, *ys.start(), *zs.start()),
            Cell::new(x, *ys.end(), *zs.end()),
        )
    }

    /// A wall in the plane `z = z`.
    pub fn wall_z(
        self,
        z: i32,
        ys: std::ops::RangeInclusive<i32>,
        xs: std::ops::RangeInclusive<i32>,
    ) -> Self {
        self.fill(
            Cell::new(*xs.start(), *ys.start(), z),
            Cell::new(*xs.end(), *ys.end(), z),
        )
    }

    /// A single-column pillar from `base.y` up to `base.y + height - 1`.
    pub fn column(self, base: Cell, height: i32) -> Self {
        self.fill(base, base.up(height.max(1) - 1))
    }

    pub fn build(self) -> GridWorld {
        GridWorld { solid: self.solid, ground: self.ground, limits: self.limits }
    }
}
