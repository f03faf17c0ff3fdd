//! Deterministic navigation RNG.
//!
//! The engine only needs randomness for the last-resort waypoint (a random
//! bearing at a fixed radius).  Seeding it from `TravelConfig::seed` keeps
//! whole journeys reproducible in tests.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded `SmallRng` wrapper.
pub struct NavRng(SmallRng);

impl NavRng {
    pub fn new(seed: u64) -> Self {
        NavRng(SmallRng::seed_from_u64(seed))
    }

    /// A uniformly random bearing in radians, `[0, 2π)`.
    #[inline]
    pub fn bearing(&mut self) -> f64 {
        self.0.gen_range(0.0..std::f64::consts::TAU)
    }
}
