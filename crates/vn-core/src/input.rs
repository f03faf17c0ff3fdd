//! The input-signal surface: movement keys plus a desired facing.
//!
//! # Angle convention
//!
//! Yaw is in degrees, `0` facing `+z`, increasing towards `−x` (a yaw of
//! `90` faces `−x`).  The forward unit vector for a yaw `θ` is therefore
//! `(−sin θ, 0, cos θ)` and the strafe-left vector is `(cos θ, 0, sin θ)`.
//! Pitch is in degrees; the sign is whatever the look controller expects.

use crate::Vec3;

// ── Facing ────────────────────────────────────────────────────────────────────

/// A (yaw, pitch) orientation in degrees.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Facing {
    pub yaw:   f64,
    pub pitch: f64,
}

impl Facing {
    #[inline]
    pub const fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }

    /// Yaw that points from `from` towards `to` (vertical ignored).
    pub fn bearing(from: Vec3, to: Vec3) -> f64 {
        let dx = to.x - from.x;
        let dz = to.z - from.z;
        dz.atan2(dx).to_degrees() - 90.0
    }

    /// Horizontal unit vector for this yaw.
    pub fn forward(&self) -> Vec3 {
        let r = self.yaw.to_radians();
        Vec3::new(-r.sin(), 0.0, r.cos())
    }

    /// Horizontal unit vector pointing to the agent's left.
    pub fn left(&self) -> Vec3 {
        let r = self.yaw.to_radians();
        Vec3::new(r.cos(), 0.0, r.sin())
    }
}

/// Wrap an angle in degrees into `(-180, 180]`.
pub fn wrap_degrees(angle: f64) -> f64 {
    let mut a = angle % 360.0;
    if a <= -180.0 {
        a += 360.0;
    } else if a > 180.0 {
        a -= 360.0;
    }
    a
}

// ── InputState ────────────────────────────────────────────────────────────────

/// Boolean key states asserted towards the external controller.
///
/// `Default` is the fully released state.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputState {
    pub forward: bool,
    pub back:    bool,
    pub left:    bool,
    pub right:   bool,
    pub jump:    bool,
    pub sprint:  bool,
}

impl InputState {
    /// `true` when no key is asserted.
    pub fn is_released(&self) -> bool {
        *self == InputState::default()
    }

    /// Release the four directional keys and sprint, keeping `jump`.
    pub fn release_directional(&mut self) {
        self.forward = false;
        self.back = false;
        self.left = false;
        self.right = false;
        self.sprint = false;
    }

    /// Release everything.
    pub fn release_all(&mut self) {
        *self = InputState::default();
    }
}

// ── Controls ──────────────────────────────────────────────────────────────────

/// Snapshot of every signal the engine produces for one tick.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Controls {
    pub keys: InputState,
    /// Facing the look controller should steer towards; `None` = no target.
    pub look: Option<Facing>,
}

impl Controls {
    pub fn is_released(&self) -> bool {
        self.keys.is_released() && self.look.is_none()
    }
}
