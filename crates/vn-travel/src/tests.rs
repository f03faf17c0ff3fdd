//! Unit tests for vn-travel.

#[cfg(test)]
mod fixtures {
    use vn_core::{Cell, JourneyId, Tick};
    use vn_world::{GridWorld, ProbeWorld};

    use crate::{JourneyOutcome, NavObserver, Navigator, SegmentPlan};

    /// Records every callback for later assertions.
    #[derive(Default)]
    pub struct Recorder {
        pub statuses:    Vec<(Tick, String)>,
        pub segments:    Vec<SegmentPlan>,
        pub completions: Vec<(JourneyId, JourneyOutcome)>,
    }

    impl NavObserver for Recorder {
        fn on_status(&mut self, tick: Tick, message: &str) {
            self.statuses.push((tick, message.to_string()));
        }

        fn on_segment(&mut self, plan: &SegmentPlan) {
            self.segments.push(plan.clone());
        }

        fn on_journey_complete(&mut self, journey: JourneyId, outcome: &JourneyOutcome) {
            self.completions.push((journey, outcome.clone()));
        }
    }

    impl Recorder {
        pub fn said(&self, needle: &str) -> bool {
            self.statuses.iter().any(|(_, m)| m.contains(needle))
        }
    }

    pub fn flat_probe(at: Cell) -> ProbeWorld {
        ProbeWorld::new(GridWorld::flat(63), at.center())
    }

    /// Tick until the journey ends, teleporting the agent to the end of each
    /// segment as soon as it is issued.
    pub fn run_teleporting(
        nav:   &mut Navigator,
        world: &mut ProbeWorld,
        rec:   &mut Recorder,
        max:   usize,
    ) -> Option<JourneyOutcome> {
        for _ in 0..max {
            if let Some(outcome) = nav.tick(&*world, rec) {
                return Some(outcome);
            }
            if let Some(last) = nav.path_overlay().last() {
                world.teleport(last.destination());
            }
        }
        None
    }
}

#[cfg(test)]
mod planner {
    use vn_core::{Cell, NavRng, TravelConfig};
    use vn_world::{GridWorld, GridWorldBuilder, ProbeWorld};

    use crate::WaypointPlanner;

    fn planner() -> WaypointPlanner {
        WaypointPlanner::new(&TravelConfig::default())
    }

    #[test]
    fn prefers_furthest_point_along_bearing() {
        let current = Cell::new(0, 64, 0);
        let w = ProbeWorld::new(GridWorld::flat(63), current.center());
        let mut rng = NavRng::new(1);
        let wp = planner().choose(&w, current, Cell::new(500, 64, 0), None, 0, &mut rng).unwrap();
        assert_eq!((wp.y, wp.z), (64, 0));
        assert!((89..=90).contains(&wp.x), "{wp}");
    }

    #[test]
    fn previous_waypoint_is_never_repeated() {
        let current = Cell::new(0, 64, 0);
        let w = ProbeWorld::new(GridWorld::flat(63), current.center());
        let mut rng = NavRng::new(1);
        let p = planner();
        let goal = Cell::new(500, 64, 0);
        let first = p.choose(&w, current, goal, None, 0, &mut rng).unwrap();
        let second = p.choose(&w, current, goal, Some(first), 0, &mut rng).unwrap();
        assert_ne!(first, second);
        assert!(current.distance(second) <= 150.0);
    }

    #[test]
    fn stuck_adds_scatter_and_vertical_offsets() {
        let p = planner();
        let current = Cell::new(0, 64, 0);
        let goal = Cell::new(500, 64, 0);
        let calm = p.candidates(current, goal, 0);
        let stuck = p.candidates(current, goal, 2);
        assert!(stuck.len() > calm.len());
        assert!(stuck.contains(&Cell::new(0, 64, 40)));
        assert!(stuck.contains(&Cell::new(-40, 64, -40)));
        assert!(stuck.contains(&current.up(3)));
        assert!(!calm.contains(&current.up(3)));
    }

    #[test]
    fn boxed_in_agent_gets_random_fallback() {
        let current = Cell::new(0, 64, 0);
        let grid = GridWorldBuilder::new().fill(Cell::new(-6, 60, -6), Cell::new(41, 70, 6)).build();
        let w = ProbeWorld::new(grid, current.center());
        let mut rng = NavRng::new(9);
        let wp = planner().choose(&w, current, Cell::new(40, 64, 0), None, 0, &mut rng).unwrap();
        assert_eq!(wp.y, 64);
        let (dx, _, dz) = wp - current;
        assert!(dx.abs() <= 5 && dz.abs() <= 5);
    }
}

#[cfg(test)]
mod survey {
    use vn_core::Cell;
    use vn_world::{GridWorld, GridWorldBuilder, ProbeWorld, World};

    use crate::survey::{find_walkable_near, line_mostly_clear};

    const HEIGHTS: (i32, i32) = (-64, 320);

    #[test]
    fn walkable_scan_finds_first_shell_cell() {
        let grid = GridWorldBuilder::new().fill(Cell::new(-1, 63, -1), Cell::new(1, 66, 1)).build();
        let w = ProbeWorld::new(grid, Cell::new(5, 64, 5).center());
        let target = Cell::new(0, 64, 0);
        assert!(!w.is_walkable(target).unwrap());
        let found = find_walkable_near(&w, target, HEIGHTS).unwrap();
        assert_eq!(found, Some(Cell::new(-1, 61, -1)));
    }

    #[test]
    fn clear_line_on_open_ground() {
        let w = ProbeWorld::new(GridWorld::flat(63), Cell::new(0, 64, 0).center());
        assert!(line_mostly_clear(&w, Cell::new(0, 64, 0), Cell::new(50, 64, 0), HEIGHTS).unwrap());
    }

    #[test]
    fn wall_blocks_line_but_not_short_hops() {
        let grid = GridWorldBuilder::new()
            .ground(63)
            .fill(Cell::new(8, 64, -2), Cell::new(32, 65, 2))
            .build();
        let w = ProbeWorld::new(grid, Cell::new(0, 64, 0).center());
        assert!(!line_mostly_clear(&w, Cell::new(0, 64, 0), Cell::new(50, 64, 0), HEIGHTS).unwrap());
        assert!(line_mostly_clear(&w, Cell::new(5, 64, 0), Cell::new(12, 64, 0), HEIGHTS).unwrap());
    }
}

#[cfg(test)]
mod stuck {
    use vn_core::{TravelConfig, Vec3};

    use crate::{StuckDetector, StuckVerdict};

    #[test]
    fn fires_after_full_window() {
        let cfg = TravelConfig::default();
        let mut d = StuckDetector::new();
        let p = Vec3::new(0.5, 64.0, 0.5);
        let fired: Vec<usize> = (1..=250)
            .filter(|_| d.observe(p, true, &cfg) != StuckVerdict::Fine)
            .collect();
        assert_eq!(fired, vec![100, 200]);
    }

    #[test]
    fn movement_and_idle_walker_reset_the_count() {
        let cfg = TravelConfig::default();
        let mut d = StuckDetector::new();
        let p = Vec3::new(0.5, 64.0, 0.5);
        for _ in 0..60 {
            d.observe(p, true, &cfg);
        }
        assert_eq!(d.still_ticks(), 60);
        d.observe(p, false, &cfg);
        assert_eq!(d.still_ticks(), 0);
        for _ in 0..30 {
            d.observe(p, true, &cfg);
        }
        d.observe(Vec3::new(1.0, 64.0, 0.5), true, &cfg);
        assert_eq!(d.still_ticks(), 0);
        // Tiny jitter stays under the displacement threshold.
        d.observe(Vec3::new(1.1, 64.0, 0.5), true, &cfg);
        assert_eq!(d.still_ticks(), 1);
    }

    #[test]
    fn escalates_after_repeated_restarts() {
        let cfg = TravelConfig { stuck_window_ticks: 2, ..TravelConfig::default() };
        let mut d = StuckDetector::new();
        let p = Vec3::ZERO;
        d.observe(p, true, &cfg);
        let mut verdicts = Vec::new();
        while verdicts.len() < 5 {
            match d.observe(p, true, &cfg) {
                StuckVerdict::Fine => {}
                StuckVerdict::Restart { escalate } => verdicts.push(escalate),
            }
        }
        assert_eq!(verdicts, vec![false, false, false, true, false]);
    }

    #[test]
    fn first_observation_counts_when_walking() {
        let cfg = TravelConfig { stuck_window_ticks: 1, ..TravelConfig::default() };
        let mut d = StuckDetector::new();
        let p = Vec3::new(3.5, 64.0, 3.5);
        assert_eq!(d.observe(p, false, &cfg), StuckVerdict::Fine);
        d.reset();
        assert_eq!(d.observe(p, true, &cfg), StuckVerdict::Restart { escalate: false });
    }
}

#[cfg(test)]
mod navigator {
    use vn_core::{Cell, NavConfig, TravelConfig};
    use vn_search::{Pathfinder, SearchError, SearchOutcome, SearchResult};
    use vn_world::World;

    use super::fixtures::{flat_probe, run_teleporting, Recorder};
    use crate::{JourneyMode, JourneyOutcome, Navigator, NavigatorBuilder, SegmentKind, TravelError};

    fn nav() -> Navigator {
        Navigator::new(NavConfig::default()).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = NavConfig::default();
        config.travel = TravelConfig { survey_radius: -1.0, ..TravelConfig::default() };
        assert!(matches!(Navigator::new(config), Err(TravelError::Config(_))));
    }

    #[test]
    fn rejects_bad_goal_and_concurrent_request() {
        let world = flat_probe(Cell::new(0, 64, 0));
        let mut rec = Recorder::default();
        let mut nav = nav();
        let err = nav.travel(&world, Cell::new(0, 400, 0), &mut rec).unwrap_err();
        assert!(matches!(err, TravelError::InvalidGoal(_)));
        assert!(!nav.is_active());

        nav.travel(&world, Cell::new(20, 64, 0), &mut rec).unwrap();
        let err = nav.travel(&world, Cell::new(30, 64, 0), &mut rec).unwrap_err();
        assert!(matches!(err, TravelError::Busy));
        assert_eq!(nav.destination(), Some(Cell::new(20, 64, 0)));
        assert!(rec.completions.is_empty());
    }

    #[test]
    fn short_journey_issues_one_segment() {
        let mut world = flat_probe(Cell::new(0, 64, 0));
        let mut rec = Recorder::default();
        let mut nav = nav();
        let id = nav.travel(&world, Cell::new(20, 64, 3), &mut rec).unwrap();
        assert_eq!(nav.journey().unwrap().mode, JourneyMode::Short);

        let outcome = run_teleporting(&mut nav, &mut world, &mut rec, 200);
        assert_eq!(outcome, Some(JourneyOutcome::Reached));
        assert_eq!(rec.segments.len(), 1);
        assert_eq!(rec.segments[0].kind, SegmentKind::Short);
        assert_eq!(rec.completions, vec![(id, JourneyOutcome::Reached)]);
        assert!(world.agent_cell().unwrap().distance(Cell::new(20, 64, 3)) <= 5.0);
        assert!(!nav.is_active());
        assert!(nav.controls().is_released());
    }

    #[test]
    fn long_journey_is_segmented() {
        let start = Cell::new(0, 64, 0);
        let goal = Cell::new(500, 64, 0);
        let mut world = flat_probe(start);
        let mut rec = Recorder::default();
        let mut nav = nav();
        nav.travel(&world, goal, &mut rec).unwrap();
        assert_eq!(nav.journey().unwrap().mode, JourneyMode::Long);

        let outcome = run_teleporting(&mut nav, &mut world, &mut rec, 5_000);
        assert_eq!(outcome, Some(JourneyOutcome::Reached));
        assert!(rec.segments.len() >= 4, "only {} segments", rec.segments.len());
        for seg in &rec.segments {
            assert!(seg.from.distance(seg.target) <= 150.0, "{} -> {}", seg.from, seg.target);
        }
        assert_eq!(rec.segments[0].kind, SegmentKind::FirstWaypoint);
        assert_eq!(rec.segments.last().map(|s| s.kind), Some(SegmentKind::Direct));
        assert!(world.agent_cell().unwrap().distance(goal) <= 5.0);
        assert_eq!(rec.completions.len(), 1);
        assert!(rec.said("reached waypoint"));
    }

    #[test]
    fn stalled_agent_restarts_exactly_once() {
        let world = flat_probe(Cell::new(0, 64, 0));
        let mut rec = Recorder::default();
        let mut nav = nav();
        nav.travel(&world, Cell::new(500, 64, 0), &mut rec).unwrap();
        // The agent never moves.
        for _ in 0..150 {
            assert!(nav.tick(&world, &mut rec).is_none());
        }
        let restarts: Vec<_> = rec.segments.iter().filter(|s| s.kind == SegmentKind::Restart).collect();
        assert_eq!(restarts.len(), 1);
        assert_ne!(restarts[0].target, rec.segments[0].target);
        assert!(rec.said("stuck"));
        assert!(nav.walker().is_active());
        assert!(rec.completions.is_empty());
    }

    #[test]
    fn world_failure_ends_journey_once() {
        let mut world = flat_probe(Cell::new(0, 64, 0));
        let mut rec = Recorder::default();
        let mut nav = nav();
        let id = nav.travel(&world, Cell::new(300, 64, 0), &mut rec).unwrap();
        for _ in 0..5 {
            nav.tick(&world, &mut rec);
        }
        world.fail_with("chunk unloaded");
        let outcome = nav.tick(&world, &mut rec);
        assert!(matches!(outcome, Some(JourneyOutcome::Failed(ref m)) if m.contains("chunk unloaded")));
        for _ in 0..5 {
            assert!(nav.tick(&world, &mut rec).is_none());
        }
        assert_eq!(rec.completions.len(), 1);
        assert_eq!(rec.completions[0].0, id);
        assert!(nav.controls().is_released());

        world.restore();
        let next = nav.travel(&world, Cell::new(10, 64, 0), &mut rec).unwrap();
        assert_ne!(next, id);
    }

    #[test]
    fn cancel_releases_controls_in_the_same_tick() {
        let world = flat_probe(Cell::new(0, 64, 0));
        let mut rec = Recorder::default();
        let mut nav = nav();
        let id = nav.travel(&world, Cell::new(0, 64, 20), &mut rec).unwrap();
        nav.tick(&world, &mut rec);
        assert!(nav.controls().keys.forward);

        assert_eq!(nav.cancel(&mut rec), Some(JourneyOutcome::Cancelled));
        assert!(nav.controls().is_released());
        assert!(nav.path_overlay().is_empty());
        assert_eq!(nav.cancel(&mut rec), None);
        assert!(nav.tick(&world, &mut rec).is_none());
        assert!(nav.controls().is_released());
        assert_eq!(rec.completions, vec![(id, JourneyOutcome::Cancelled)]);
    }

    struct BrokenSearch;

    impl Pathfinder for BrokenSearch {
        fn find_path<W: World + ?Sized>(&self, _: &W, _: Cell, _: Cell, _: u32) -> SearchResult<SearchOutcome> {
            Err(SearchError::InvalidBudget)
        }
    }

    #[test]
    fn failure_while_starting_is_reported_once() {
        let world = flat_probe(Cell::new(0, 64, 0));
        let mut rec = Recorder::default();
        let mut nav = NavigatorBuilder::new(NavConfig::default(), BrokenSearch).build().unwrap();
        let err = nav.travel(&world, Cell::new(30, 64, 0), &mut rec).unwrap_err();
        assert!(matches!(err, TravelError::Search(SearchError::InvalidBudget)));
        assert!(!nav.is_active());
        assert_eq!(rec.completions.len(), 1);
        assert!(matches!(rec.completions[0].1, JourneyOutcome::Failed(_)));
    }
}

#[cfg(test)]
mod end_to_end {
    use vn_core::{Cell, NavConfig};
    use vn_world::{GridWorld, SimWorld, World};

    use super::fixtures::Recorder;
    use crate::{JourneyOutcome, Navigator};

    #[test]
    fn short_journey_on_simulated_agent() {
        let mut world = SimWorld::new(GridWorld::flat(63), Cell::new(0, 64, 0));
        let mut rec = Recorder::default();
        let mut nav = Navigator::new(NavConfig::default()).unwrap();
        let goal = Cell::new(25, 64, 8);
        nav.travel(&world, goal, &mut rec).unwrap();

        let mut outcome = None;
        for _ in 0..1_500 {
            outcome = nav.tick(&world, &mut rec);
            if outcome.is_some() {
                break;
            }
            world.step(&nav.controls()).unwrap();
        }
        assert_eq!(outcome, Some(JourneyOutcome::Reached));
        assert!(world.agent_cell().unwrap().distance(goal) <= 5.0);
    }
}

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use vn_core::{Cell, TravelConfig};

    use crate::WaypointPlanner;

    proptest! {
        #[test]
        fn candidates_stay_inside_survey_radius(
            cx in -1_000i32..1_000,
            cz in -1_000i32..1_000,
            gx in -5_000i32..5_000,
            gy in 0i32..200,
            gz in -5_000i32..5_000,
            stuck in 0u32..12,
        ) {
            let cfg = TravelConfig::default();
            let current = Cell::new(cx, 64, cz);
            let planner = WaypointPlanner::new(&cfg);
            for c in planner.candidates(current, Cell::new(gx, gy, gz), stuck) {
                let (dx, _, dz) = c - current;
                let horizontal = ((dx * dx + dz * dz) as f64).sqrt();
                prop_assert!(horizontal <= cfg.survey_radius, "{c} from {current}");
            }
        }
    }
}
