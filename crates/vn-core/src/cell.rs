//! Voxel coordinates and continuous points.
//!
//! `Cell` is the integer grid position every search and path element works
//! in.  `Vec3` is the continuous position/velocity reported by the world.
//! A cell's "centre" sits at `(x + 0.5, y, z + 0.5)`: horizontally centred,
//! vertically at the feet of an agent standing in it.

use std::fmt;
use std::ops::{Add, Mul, Sub};

// ── Cell ──────────────────────────────────────────────────────────────────────

/// An integer `(x, y, z)` voxel coordinate.  Equality and hashing are by
/// coordinate only.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The cell containing the continuous point `p` (floor on every axis).
    #[inline]
    pub fn containing(p: Vec3) -> Self {
        Self::new(p.x.floor() as i32, p.y.floor() as i32, p.z.floor() as i32)
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    #[inline]
    pub const fn up(self, n: i32) -> Self {
        self.offset(0, n, 0)
    }

    #[inline]
    pub const fn down(self, n: i32) -> Self {
        self.offset(0, -n, 0)
    }

    /// Straight-line (Euclidean) distance in cells.
    pub fn distance(self, other: Cell) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        let dz = (self.z - other.z) as f64;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// `true` if `other` has the same `x` and `z`.
    #[inline]
    pub fn same_column(self, other: Cell) -> bool {
        self.x == other.x && self.z == other.z
    }

    /// Feet-level centre point of the cell.
    #[inline]
    pub fn center(self) -> Vec3 {
        Vec3::new(self.x as f64 + 0.5, self.y as f64, self.z as f64 + 0.5)
    }

    /// The four horizontally adjacent cells (+x, −x, +z, −z).
    pub fn horizontal_neighbors(self) -> [Cell; 4] {
        [
            self.offset(1, 0, 0),
            self.offset(-1, 0, 0),
            self.offset(0, 0, 1),
            self.offset(0, 0, -1),
        ]
    }
}

impl Sub for Cell {
    type Output = (i32, i32, i32);
    #[inline]
    fn sub(self, rhs: Cell) -> (i32, i32, i32) {
        (self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ── Vec3 ──────────────────────────────────────────────────────────────────────

/// A continuous 3-D point or vector in cell units.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Copy with the vertical component zeroed.
    #[inline]
    pub fn horizontal(self) -> Self {
        Self::new(self.x, 0.0, self.z)
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn distance(self, other: Vec3) -> f64 {
        (self - other).length()
    }

    /// Distance ignoring the vertical axis.
    pub fn horizontal_distance(self, other: Vec3) -> f64 {
        (self - other).horizontal().length()
    }

    /// Unsigned angle between two vectors in degrees; `180.0` when either
    /// vector is zero-length.
    pub fn angle_to(self, other: Vec3) -> f64 {
        let denom = self.length() * other.length();
        if denom <= f64::EPSILON {
            return 180.0;
        }
        (self.dot(other) / denom).clamp(-1.0, 1.0).acos().to_degrees()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}
