//! Fluent builder for constructing a [`Navigator`].

use vn_core::{JourneyId, NavConfig, NavRng, SegmentId, Tick};
use vn_path::Simplifier;
use vn_search::Pathfinder;
use vn_walker::Walker;

use crate::stuck::StuckDetector;
use crate::{Navigator, TravelResult, WaypointPlanner};

/// Fluent builder for [`Navigator<P>`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                      |
/// |-------------------|------------------------------|
/// | `.simplifier(s)`  | `Simplifier::standard()`     |
/// | `.seed(n)`        | `config.travel.seed`         |
///
/// # Example
///
/// ```rust,ignore
/// let nav = NavigatorBuilder::new(config, BoundedAStar::default())
///     .seed(7)
///     .build()?;
/// ```
pub struct NavigatorBuilder<P: Pathfinder> {
    config:     NavConfig,
    pathfinder: P,
    simplifier: Option<Simplifier>,
    seed:       Option<u64>,
}

impl<P: Pathfinder> NavigatorBuilder<P> {
    pub fn new(config: NavConfig, pathfinder: P) -> Self {
        Self { config, pathfinder, simplifier: None, seed: None }
    }

    /// Replace the standard simplification pipeline.
    pub fn simplifier(mut self, simplifier: Simplifier) -> Self {
        self.simplifier = Some(simplifier);
        self
    }

    /// Seed for the random fallback waypoint.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and return an idle navigator.
    pub fn build(self) -> TravelResult<Navigator<P>> {
        self.config.validate()?;
        let seed = self.seed.unwrap_or(self.config.travel.seed);
        Ok(Navigator {
            walker:       Walker::new(self.config.walker.clone()),
            planner:      WaypointPlanner::new(&self.config.travel),
            simplifier:   self.simplifier.unwrap_or_default(),
            stuck:        StuckDetector::new(),
            rng:          NavRng::new(seed),
            journey:      None,
            now:          Tick::ZERO,
            next_journey: JourneyId(0),
            next_segment: SegmentId(0),
            pathfinder:   self.pathfinder,
            config:       self.config,
        })
    }
}
