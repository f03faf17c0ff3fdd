//! Kinematic agent.
//!
//! `SimWorld` integrates the engine's [`Controls`] into agent motion so the
//! walker can be exercised end-to-end without an external game.  The model
//! is a single upright box:
//!
//! | Quantity              | Value                          |
//! |-----------------------|--------------------------------|
//! | Box half-width        | 0.3                            |
//! | Box height            | 1.8                            |
//! | Ground acceleration   | 0.10 walk, 0.13 sprint         |
//! | Air acceleration      | 0.02 walk, 0.026 sprint        |
//! | Horizontal decay      | 0.546 on ground, 0.91 in air   |
//! | Jump impulse          | 0.42                           |
//! | Gravity / drag        | `vy = (vy - 0.08) * 0.98`      |
//!
//! All quantities are cells and cells-per-tick.  Facing requested through
//! `Controls::look` is applied instantly.  Collision is resolved one axis at
//! a time (y, then x, then z) against the solid cells of the grid.

use std::ops::RangeInclusive;

use vn_core::{Cell, Controls, Facing, Vec3};

use crate::{GridWorld, World, WorldResult};

const HALF_WIDTH:   f64 = 0.3;
const HEIGHT:       f64 = 1.8;
const GROUND_WALK:  f64 = 0.10;
const GROUND_RUN:   f64 = 0.13;
const AIR_WALK:     f64 = 0.02;
const AIR_RUN:      f64 = 0.026;
const GROUND_DECAY: f64 = 0.546;
const AIR_DECAY:    f64 = 0.91;
const JUMP_IMPULSE: f64 = 0.42;
const GRAVITY:      f64 = 0.08;
const DRAG:         f64 = 0.98;
const EPS:          f64 = 1e-7;

// ── Body ──────────────────────────────────────────────────────────────────────

/// Kinematic state of the simulated agent.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Body {
    pub position:  Vec3,
    pub velocity:  Vec3,
    pub facing:    Facing,
    pub on_ground: bool,
}

#[derive(Copy, Clone)]
enum Axis {
    X,
    Y,
    Z,
}

// ── SimWorld ──────────────────────────────────────────────────────────────────

pub struct SimWorld {
    pub grid: GridWorld,
    pub body: Body,
}

impl SimWorld {
    /// Place the agent at rest on the centre of `cell`.
    pub fn new(grid: GridWorld, cell: Cell) -> Self {
        let mut world = Self { grid, body: Body::default() };
        world.place(cell);
        world
    }

    /// Teleport the agent to rest on the centre of `cell`, keeping its facing.
    pub fn place(&mut self, cell: Cell) {
        let on_ground = self.grid.is_solid(cell.down(1)).unwrap_or(false);
        self.body = Body {
            position: cell.center(),
            velocity: Vec3::ZERO,
            facing: self.body.facing,
            on_ground,
        };
    }

    /// Advance the agent by one tick under `controls`.
    pub fn step(&mut self, controls: &Controls) -> WorldResult<()> {
        if let Some(look) = controls.look {
            self.body.facing = look;
        }
        let keys = controls.keys;
        let axis = |pos: bool, neg: bool| (pos as i32 - neg as i32) as f64;
        let mut wish = self.body.facing.forward() * axis(keys.forward, keys.back)
            + self.body.facing.left() * axis(keys.left, keys.right);
        let len = wish.length();
        if len > EPS {
            wish = wish * (1.0 / len);
        }

        let accel = match (self.body.on_ground, keys.sprint) {
            (true, true) => GROUND_RUN,
            (true, false) => GROUND_WALK,
            (false, true) => AIR_RUN,
            (false, false) => AIR_WALK,
        };
        if keys.jump && self.body.on_ground {
            self.body.velocity.y = JUMP_IMPULSE;
        }

        let mut motion = self.body.velocity.horizontal() + wish * accel;
        motion.y = self.body.velocity.y;

        let mut pos = self.body.position;
        let (dy, hit_y) = self.sweep(pos, Axis::Y, motion.y)?;
        pos.y += dy;
        let (dx, hit_x) = self.sweep(pos, Axis::X, motion.x)?;
        pos.x += dx;
        let (dz, hit_z) = self.sweep(pos, Axis::Z, motion.z)?;
        pos.z += dz;

        let landed = hit_y && motion.y < 0.0;
        let decay = if landed { GROUND_DECAY } else { AIR_DECAY };
        let vy = if hit_y { 0.0 } else { motion.y };
        self.body.velocity = Vec3::new(
            if hit_x { 0.0 } else { motion.x * decay },
            (vy - GRAVITY) * DRAG,
            if hit_z { 0.0 } else { motion.z * decay },
        );
        self.body.position = pos;
        self.body.on_ground = landed;
        Ok(())
    }

    /// Largest displacement along `axis` not exceeding `delta` that keeps the
    /// box out of solid cells, and whether the move was cut short.
    fn sweep(&self, pos: Vec3, axis: Axis, delta: f64) -> WorldResult<(f64, bool)> {
        if delta == 0.0 {
            return Ok((0.0, false));
        }
        let (lo, hi) = extent(pos, axis);
        let swept = if delta > 0.0 { (lo, hi + delta) } else { (lo + delta, hi) };
        let [xs, ys, zs] = cells_around(pos, axis, swept);

        let mut allowed = delta;
        for x in xs {
            for y in ys.clone() {
                for z in zs.clone() {
                    let cell = Cell::new(x, y, z);
                    if !self.grid.is_solid(cell)? {
                        continue;
                    }
                    let face = match axis {
                        Axis::X => cell.x,
                        Axis::Y => cell.y,
                        Axis::Z => cell.z,
                    } as f64;
                    if delta > 0.0 && face >= hi - EPS {
                        allowed = allowed.min(face - hi);
                    } else if delta < 0.0 && face + 1.0 <= lo + EPS {
                        allowed = allowed.max(face + 1.0 - lo);
                    }
                }
            }
        }
        Ok((allowed, (allowed - delta).abs() > EPS))
    }
}

/// Box extent along `axis`.
fn extent(pos: Vec3, axis: Axis) -> (f64, f64) {
    match axis {
        Axis::X => (pos.x - HALF_WIDTH, pos.x + HALF_WIDTH),
        Axis::Y => (pos.y, pos.y + HEIGHT),
        Axis::Z => (pos.z - HALF_WIDTH, pos.z + HALF_WIDTH),
    }
}

/// Cell ranges overlapped by the box, with `axis` widened to `swept`.
fn cells_around(pos: Vec3, axis: Axis, swept: (f64, f64)) -> [RangeInclusive<i32>; 3] {
    let span = |(lo, hi): (f64, f64)| ((lo + EPS).floor() as i32)..=((hi - EPS).floor() as i32);
    let mut ranges = [
        span(extent(pos, Axis::X)),
        span(extent(pos, Axis::Y)),
        span(extent(pos, Axis::Z)),
    ];
    let slot = match axis {
        Axis::X => 0,
        Axis::Y => 1,
        Axis::Z => 2,
    };
    ranges[slot] = span(swept);
    ranges
}

impl World for SimWorld {
    fn is_cell_solid(&self, cell: Cell) -> WorldResult<bool> {
        self.grid.is_solid(cell)
    }

    fn agent_position(&self) -> WorldResult<Vec3> {
        Ok(self.body.position)
    }

    fn agent_velocity(&self) -> WorldResult<Vec3> {
        Ok(self.body.velocity)
    }

    fn agent_facing(&self) -> WorldResult<Facing> {
        Ok(self.body.facing)
    }
}
