//! Waypoint selection for long journeys.

use tracing::debug;

use vn_core::{Cell, NavRng, TravelConfig};
use vn_world::{World, WorldResult};

/// Cardinal and diagonal unit steps, scattered when stuck.
const SCATTER: [(i32, i32); 8] = [(1, 0), (0, 1), (-1, 0), (0, -1), (1, 1), (-1, 1), (1, -1), (-1, -1)];

/// Fractions of the survey radius sampled along the bearing to the goal.
const ALONG: [f64; 3] = [0.2, 0.4, 0.6];

/// Candidates closer than this to the agent are not scored.
const MIN_STEP: f64 = 3.0;

/// Radius of the last-resort random waypoint.
const FALLBACK_RADIUS: f64 = 5.0;

/// Picks intermediate targets within the survey radius.
///
/// Every candidate lies within `0.6 × survey_radius` of the agent
/// horizontally (diagonal scatter up to `√2` times that), so a segment
/// towards any of them stays inside the survey radius.
#[derive(Clone, Debug)]
pub struct WaypointPlanner {
    survey_radius: f64,
    min_y:         i32,
    max_y:         i32,
}

impl WaypointPlanner {
    pub fn new(config: &TravelConfig) -> Self {
        Self { survey_radius: config.survey_radius, min_y: config.min_y, max_y: config.max_y }
    }

    fn reach(&self) -> f64 {
        self.survey_radius * ALONG[ALONG.len() - 1]
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        (self.min_y..=self.max_y).contains(&cell.y) && (self.min_y..=self.max_y).contains(&(cell.y + 1))
    }

    /// Raw candidate list, before walkability filtering, in scoring order.
    pub fn candidates(&self, current: Cell, destination: Cell, stuck: u32) -> Vec<Cell> {
        let (dx, dy, dz) = destination - current;
        let (dx, dy, dz) = (dx as f64, dy as f64, dz as f64);
        let len = (dx * dx + dy * dy + dz * dz).sqrt();
        // Scale a fraction of the full delta so it never reaches past `reach`.
        let capped = |f: f64| if len * f.abs() > self.reach() { self.reach() / len * f.signum() } else { f };
        let along = |f: f64| current.offset((dx * f) as i32, (dy * f) as i32, (dz * f) as i32);
        let mut out = Vec::with_capacity(48);

        if stuck > 0 {
            let spread = ((20 + 10 * stuck) as f64).min(self.reach()) as i32;
            for (ux, uz) in SCATTER {
                push3(&mut out, current.offset(ux * spread, 0, uz * spread));
            }
            let back = capped(-0.3);
            out.push(current.offset((dx * back) as i32, 0, (dz * back) as i32));
            if stuck >= 2 {
                out.push(current.up(3));
                out.push(current.down(3));
            }
        }

        for k in 1..=4 {
            push3(&mut out, along(capped(k as f64 * 0.1)));
        }

        if len > f64::EPSILON {
            for frac in ALONG {
                let f = self.survey_radius * frac / len;
                push3(&mut out, along(f.min(1.0)));
            }
        }
        out
    }

    /// Choose the next waypoint from `current` towards `destination`.
    ///
    /// `previous` is excluded outright, so a walkable choice always differs
    /// from it.  Lowest `distance to destination − 0.1 × distance from
    /// current` wins; candidates within 3 cells of the agent are not scored.
    pub fn choose<W: World + ?Sized>(
        &self,
        world:       &W,
        current:     Cell,
        destination: Cell,
        previous:    Option<Cell>,
        stuck:       u32,
        rng:         &mut NavRng,
    ) -> WorldResult<Cell> {
        let fresh = |c: &Cell| Some(*c) != previous;
        let mut walkable = Vec::new();
        for c in self.candidates(current, destination, stuck) {
            if fresh(&c) && self.in_bounds(c) && world.is_walkable(c)? {
                walkable.push(c);
            }
        }

        if walkable.is_empty() {
            for x in (-5..=5).step_by(2) {
                for z in (-5..=5).step_by(2) {
                    for y in -1..=1 {
                        let c = current.offset(x, y, z);
                        if fresh(&c) && self.in_bounds(c) && world.is_walkable(c)? {
                            walkable.push(c);
                        }
                    }
                }
            }
        }

        let Some(&first) = walkable.first() else {
            let angle = rng.bearing();
            let c = current.offset(
                (angle.cos() * FALLBACK_RADIUS) as i32,
                0,
                (angle.sin() * FALLBACK_RADIUS) as i32,
            );
            debug!(%current, waypoint = %c, "planner: no walkable candidate, random fallback");
            return Ok(c);
        };

        let mut best: Option<(Cell, f64)> = None;
        for &c in &walkable {
            let from = current.distance(c);
            if from < MIN_STEP {
                continue;
            }
            let score = c.distance(destination) - 0.1 * from;
            if best.is_none_or(|(_, s)| score < s) {
                best = Some((c, score));
            }
        }

        let chosen = best.map_or(first, |(c, _)| c);
        debug!(
            %current,
            waypoint = %chosen,
            candidates = walkable.len(),
            score = best.map(|(_, s)| s),
            "planner: waypoint chosen"
        );
        Ok(chosen)
    }
}

/// A candidate and its two vertical neighbours.
fn push3(out: &mut Vec<Cell>, c: Cell) {
    out.extend([c, c.up(1), c.down(1)]);
}
