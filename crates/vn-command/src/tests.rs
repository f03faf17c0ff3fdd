//! Unit tests for vn-command.

#[cfg(test)]
mod protocol {
    use proptest::prelude::*;

    use vn_core::Cell;

    use crate::{CommandError, Request, Response};

    #[test]
    fn parses_requests() {
        assert_eq!("10,64,-3".parse(), Ok(Request::Travel(Cell::new(10, 64, -3))));
        assert_eq!(" 10, 64 , -3 \n".parse(), Ok(Request::Travel(Cell::new(10, 64, -3))));
        assert_eq!("CANCEL".parse(), Ok(Request::Cancel));
        assert_eq!("status\r\n".parse(), Ok(Request::Status));
        assert_eq!("ForceReset".parse(), Ok(Request::ForceReset));
    }

    #[test]
    fn rejects_malformed_requests() {
        assert!(matches!("a,b,c".parse::<Request>(), Err(CommandError::InvalidCoords(_))));
        assert!(matches!("1.5,64,0".parse::<Request>(), Err(CommandError::InvalidCoords(_))));
        assert!(matches!("1,2".parse::<Request>(), Err(CommandError::InvalidFormat(_))));
        assert!(matches!("go home".parse::<Request>(), Err(CommandError::InvalidFormat(_))));
        assert!(matches!("".parse::<Request>(), Err(CommandError::InvalidFormat(_))));
    }

    #[test]
    fn response_lines() {
        assert_eq!(Response::Success.to_string(), "PATHFINDING:SUCCESS");
        assert_eq!(Response::InvalidCoords.to_string(), "PATHFINDING:INVALID_COORDS");
        assert_eq!(Response::Status { active: false }.to_string(), "PATHFINDING:STATUS:INACTIVE");
        assert_eq!("PATHFINDING:STATUS:ACTIVE".parse(), Ok(Response::Status { active: true }));
        assert!("SUCCESS".parse::<Response>().is_err());
    }

    proptest! {
        #[test]
        fn any_triple_is_a_travel_request(x in any::<i32>(), y in any::<i32>(), z in any::<i32>()) {
            let req = Request::Travel(Cell::new(x, y, z));
            prop_assert_eq!(req.to_string().parse::<Request>(), Ok(req));
        }
    }
}

#[cfg(test)]
mod gate {
    use vn_core::CommandConfig;

    use crate::{Admission, CommandGate};

    fn gate() -> CommandGate {
        CommandGate::new(&CommandConfig::default())
    }

    #[test]
    fn one_request_at_a_time() {
        let g = gate();
        assert_eq!(g.admit(0), Admission::Accepted);
        assert_eq!(g.admit(10), Admission::Initializing);
        g.journey_started(20);
        g.publish(true);
        assert_eq!(g.admit(30), Admission::Busy);
        g.release();
        assert_eq!(g.admit(40), Admission::Accepted);
    }

    #[test]
    fn silent_journey_guard_goes_stale() {
        let g = gate();
        g.admit(0);
        g.journey_started(1_000);
        g.publish(true);
        assert_eq!(g.admit(31_000), Admission::Busy);
        assert_eq!(g.admit(31_001), Admission::Accepted);
    }

    #[test]
    fn initializing_guard_times_out() {
        let g = gate();
        g.admit(100);
        g.expire_stale(5_100);
        assert!(g.is_initializing());
        g.expire_stale(5_101);
        assert!(!g.is_initializing());
    }

    #[test]
    fn expiry_clears_guard_of_inactive_engine() {
        let g = gate();
        g.admit(0);
        g.journey_started(0);
        g.publish(true);
        g.expire_stale(10);
        assert!(g.is_busy());
        g.publish(false);
        g.expire_stale(20);
        assert!(!g.is_busy());
    }

    #[test]
    fn status_right_after_start_keeps_guard() {
        let g = gate();
        assert_eq!(g.admit(0), Admission::Accepted);
        g.journey_started(1);
        assert!(g.sync_status(2));
        assert!(g.is_busy());
        assert_eq!(g.admit(3), Admission::Busy);
    }

    #[test]
    fn status_resyncs_busy_guard() {
        let g = gate();
        g.admit(0);
        g.journey_started(0);
        g.publish(false);
        assert!(!g.sync_status(50));
        assert!(!g.is_busy());

        g.publish(true);
        assert!(g.sync_status(60));
        assert!(g.is_busy());
        assert_eq!(g.last_activity_ms(), 60);
    }
}

#[cfg(test)]
mod pump {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    use vn_core::{Cell, JourneyId, NavConfig};
    use vn_travel::{JourneyOutcome, NavObserver, Navigator};
    use vn_world::{GridWorld, ProbeWorld};

    use crate::{channel, channel_with_clock, CommandError, ManualClock, Response};

    #[derive(Default)]
    struct Completions(Vec<JourneyOutcome>);

    impl NavObserver for Completions {
        fn on_journey_complete(&mut self, _: JourneyId, outcome: &JourneyOutcome) {
            self.0.push(outcome.clone());
        }
    }

    fn setup() -> (Navigator, ProbeWorld) {
        let nav = Navigator::new(NavConfig::default()).unwrap();
        let world = ProbeWorld::new(GridWorld::flat(63), Cell::new(0, 64, 0).center());
        (nav, world)
    }

    fn follow_path(nav: &Navigator, world: &mut ProbeWorld) {
        if let Some(last) = nav.path_overlay().last() {
            world.teleport(last.destination());
        }
    }

    #[test]
    fn busy_until_journey_completes() {
        let (mut nav, mut world) = setup();
        let mut done = Completions::default();
        let clock = Arc::new(ManualClock::new(0));
        let (handle, pump) = channel_with_clock(&NavConfig::default(), clock.clone());

        assert_eq!(handle.request_travel(Cell::new(20, 64, 0)), Ok(Response::Success));
        assert_eq!(handle.request_travel(Cell::new(30, 64, 0)), Ok(Response::Initializing));

        pump.tick(&mut nav, &world, &mut done);
        assert!(nav.is_active());
        assert!(!handle.gate().is_initializing());
        assert_eq!(handle.request_travel(Cell::new(30, 64, 0)), Ok(Response::Busy));
        assert_eq!(handle.status(), Response::Status { active: true });

        let mut outcome = None;
        for _ in 0..50 {
            follow_path(&nav, &mut world);
            clock.advance(50);
            outcome = pump.tick(&mut nav, &world, &mut done);
            if outcome.is_some() {
                break;
            }
        }
        assert_eq!(outcome, Some(JourneyOutcome::Reached));
        assert!(!handle.gate().is_busy());
        assert_eq!(handle.status(), Response::Status { active: false });
        assert_eq!(handle.request_travel(Cell::new(0, 64, 0)), Ok(Response::Success));
        assert_eq!(done.0, vec![JourneyOutcome::Reached]);
    }

    #[test]
    fn cancel_releases_guard_and_controls() {
        let (mut nav, world) = setup();
        let mut done = Completions::default();
        let (handle, pump) = channel(&NavConfig::default());

        handle.request_travel(Cell::new(0, 64, 30)).unwrap();
        pump.tick(&mut nav, &world, &mut done);
        assert!(!nav.controls().is_released());

        assert_eq!(handle.cancel(), Ok(Response::Cancelled));
        pump.tick(&mut nav, &world, &mut done);
        assert!(!nav.is_active());
        assert!(nav.controls().is_released());
        assert!(!handle.gate().is_busy());
        assert_eq!(done.0, vec![JourneyOutcome::Cancelled]);
    }

    #[test]
    fn world_failure_releases_guard() {
        let (mut nav, mut world) = setup();
        let mut done = Completions::default();
        let (handle, pump) = channel(&NavConfig::default());

        // Failure while the request is applied.
        world.fail_with("no player");
        handle.request_travel(Cell::new(20, 64, 0)).unwrap();
        pump.tick(&mut nav, &world, &mut done);
        assert!(!handle.gate().is_busy());
        assert!(!handle.gate().is_initializing());

        // Failure mid-journey.
        world.restore();
        assert_eq!(handle.request_travel(Cell::new(20, 64, 0)), Ok(Response::Success));
        pump.tick(&mut nav, &world, &mut done);
        assert!(handle.gate().is_busy());
        world.fail_with("chunk unloaded");
        let outcome = pump.tick(&mut nav, &world, &mut done);
        assert!(matches!(outcome, Some(JourneyOutcome::Failed(_))));
        assert!(!handle.gate().is_busy());
        assert_eq!(done.0.len(), 1);

        world.restore();
        assert_eq!(handle.request_travel(Cell::new(5, 64, 0)), Ok(Response::Success));
    }

    #[test]
    fn out_of_range_goal_is_rejected_up_front() {
        let (mut nav, world) = setup();
        let mut done = Completions::default();
        let (handle, pump) = channel(&NavConfig::default());
        assert_eq!(handle.handle_line("0,9999,0"), Response::InvalidCoords);
        assert_eq!(handle.handle_line("0,320,0"), Response::InvalidCoords);
        assert!(matches!(handle.request_travel(Cell::new(0, -65, 0)), Err(CommandError::InvalidCoords(_))));
        assert!(!handle.gate().is_initializing());
        assert!(!handle.gate().is_busy());

        pump.tick(&mut nav, &world, &mut done);
        assert!(!nav.is_active());
        assert!(done.0.is_empty());
        assert_eq!(handle.handle_line("0,64,9"), Response::Success);
    }

    #[test]
    fn status_during_journey_keeps_it_running() {
        let (mut nav, world) = setup();
        let mut done = Completions::default();
        let (handle, pump) = channel(&NavConfig::default());

        assert_eq!(handle.handle_line("20,64,0"), Response::Success);
        pump.tick(&mut nav, &world, &mut done);
        assert_eq!(handle.handle_line("status"), Response::Status { active: true });
        assert_eq!(handle.handle_line("40,64,0"), Response::Busy);
        pump.tick(&mut nav, &world, &mut done);
        assert!(nav.is_active());
        assert!(done.0.is_empty());
    }

    #[test]
    fn force_reset_clears_everything() {
        let (mut nav, world) = setup();
        let mut done = Completions::default();
        let (handle, pump) = channel(&NavConfig::default());

        handle.request_travel(Cell::new(20, 64, 0)).unwrap();
        assert_eq!(handle.handle_line("forcereset"), Response::Reset);
        assert!(!handle.gate().is_initializing());

        pump.tick(&mut nav, &world, &mut done);
        assert!(!nav.is_active());
        assert!(!handle.gate().is_busy());
        assert_eq!(done.0, vec![JourneyOutcome::Cancelled]);
    }

    #[test]
    fn dropped_pump_is_reported() {
        let (handle, pump) = channel(&NavConfig::default());
        drop(pump);
        assert_eq!(handle.request_travel(Cell::new(1, 64, 1)), Err(CommandError::Disconnected));
        assert!(!handle.gate().is_initializing());
        assert_eq!(handle.handle_line("1,64,1"), Response::Unavailable);
        assert_eq!(handle.handle_line("forcereset"), Response::Reset);
    }

    #[test]
    fn concurrent_requests_admit_exactly_one() {
        let (mut nav, world) = setup();
        let (handle, pump) = channel(&NavConfig::default());

        let responses: Vec<Response> = thread::scope(|s| {
            let workers: Vec<_> = (0..8)
                .map(|i| {
                    let h = handle.clone();
                    s.spawn(move || h.handle_line(&format!("{},64,0", 10 + i)))
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });
        assert_eq!(responses.iter().filter(|r| **r == Response::Success).count(), 1);
        assert!(responses.iter().all(|r| matches!(r, Response::Success | Response::Initializing)));

        pump.tick(&mut nav, &world, &mut Completions::default());
        assert!(nav.is_active());
    }

    #[test]
    fn client_and_simulation_threads() {
        let (handle, pump) = channel(&NavConfig::default());
        let stop = AtomicBool::new(false);

        let completions = thread::scope(|s| {
            let sim = s.spawn(|| {
                let (mut nav, mut world) = setup();
                let mut done = Completions::default();
                for _ in 0..100_000 {
                    if stop.load(Ordering::SeqCst) {
                        break;
                    }
                    pump.tick(&mut nav, &world, &mut done);
                    follow_path(&nav, &mut world);
                    thread::sleep(Duration::from_millis(1));
                }
                done.0
            });

            let wait_free = || {
                let deadline = Instant::now() + Duration::from_secs(10);
                while (handle.gate().is_busy() || handle.gate().is_initializing()) && Instant::now() < deadline {
                    thread::sleep(Duration::from_millis(1));
                }
            };
            assert_eq!(handle.handle_line("20,64,0"), "PATHFINDING:SUCCESS".parse::<Response>().unwrap());
            wait_free();
            assert_eq!(handle.handle_line("0,64,15"), Response::Success);
            wait_free();
            stop.store(true, Ordering::SeqCst);
            sim.join().unwrap()
        });
        assert_eq!(completions, vec![JourneyOutcome::Reached, JourneyOutcome::Reached]);
    }
}
