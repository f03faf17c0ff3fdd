//! Heading error to movement keys.

use vn_core::input::wrap_degrees;
use vn_core::InputState;

/// Sector index of the heading error `target_yaw − yaw`, in `-4..=4`.
///
/// Each sector is 45° wide and centred on a multiple of 45°.  Negative
/// sectors lie to the agent's left, positive ones to its right; `±4` is
/// straight behind.
pub fn sector(yaw: f64, target_yaw: f64) -> i32 {
    (wrap_degrees(target_yaw - yaw) / 45.0).round() as i32
}

/// Keys that move an agent facing `yaw` towards `target_yaw`.
///
/// At most one of `forward`/`back` and one of `left`/`right` is set.
/// `sprint` is always on; `jump` is left to the caller.
pub fn movement_keys(yaw: f64, target_yaw: f64) -> InputState {
    let s = sector(yaw, target_yaw);
    InputState {
        forward: s.abs() <= 1,
        back:    s.abs() >= 3,
        left:    (-3..=-1).contains(&s),
        right:   (1..=3).contains(&s),
        jump:    false,
        sprint:  true,
    }
}
