//! The simulation-thread half of the command surface.

use std::sync::Arc;

use crossbeam_channel::Receiver;
use tracing::{info, warn};

use vn_core::{JourneyId, NavConfig, Tick};
use vn_search::Pathfinder;
use vn_travel::{JourneyOutcome, NavObserver, Navigator, SegmentPlan};
use vn_world::World;

use crate::gate::CommandGate;
use crate::handle::{Command, NavHandle};
use crate::{Clock, SystemClock};

/// Create a connected handle/pump pair using the wall clock.
///
/// Guard timeouts come from `config.command`; the handle rejects goals
/// outside `config.travel`'s legal heights before they are queued.
pub fn channel(config: &NavConfig) -> (NavHandle, CommandPump) {
    channel_with_clock(config, Arc::new(SystemClock::new()))
}

/// Create a connected handle/pump pair reading time from `clock`.
pub fn channel_with_clock(config: &NavConfig, clock: Arc<dyn Clock>) -> (NavHandle, CommandPump) {
    let (tx, rx) = crossbeam_channel::unbounded();
    let gate = Arc::new(CommandGate::new(&config.command));
    let handle = NavHandle {
        tx,
        gate: Arc::clone(&gate),
        clock: Arc::clone(&clock),
        heights: config.travel.min_y..config.travel.max_y,
    };
    (handle, CommandPump { rx, gate, clock })
}

/// Owned by the simulation loop.  Call [`tick`](Self::tick) once per
/// simulation tick in place of [`Navigator::tick`].
pub struct CommandPump {
    rx:    Receiver<Command>,
    gate:  Arc<CommandGate>,
    clock: Arc<dyn Clock>,
}

impl CommandPump {
    pub fn gate(&self) -> &CommandGate {
        &self.gate
    }

    /// Apply every queued command, advance `nav` one tick, then publish its
    /// state to the gate and expire stale guards.
    ///
    /// `obs` sees every navigator callback; journey completion additionally
    /// releases the busy guard.
    pub fn tick<W, P, O>(&self, nav: &mut Navigator<P>, world: &W, obs: &mut O) -> Option<JourneyOutcome>
    where
        W: World + ?Sized,
        P: Pathfinder,
        O: NavObserver + ?Sized,
    {
        let mut obs = GateObserver { gate: &self.gate, clock: &*self.clock, inner: obs };
        while let Ok(cmd) = self.rx.try_recv() {
            self.apply(cmd, nav, world, &mut obs);
        }
        let outcome = nav.tick(world, &mut obs);
        self.gate.publish(nav.is_active());
        self.gate.expire_stale(self.clock.now_ms());
        outcome
    }

    fn apply<W, P, O>(&self, cmd: Command, nav: &mut Navigator<P>, world: &W, obs: &mut GateObserver<'_, O>)
    where
        W: World + ?Sized,
        P: Pathfinder,
        O: NavObserver + ?Sized,
    {
        match cmd {
            Command::Travel(goal) => {
                if nav.is_active() {
                    info!(%goal, "replacing active journey");
                    nav.cancel(obs);
                }
                match nav.travel(world, goal, obs) {
                    Ok(journey) => {
                        self.gate.journey_started(self.clock.now_ms());
                        info!(%journey, %goal, "command: journey started");
                    }
                    Err(e) => {
                        warn!(%goal, error = %e, "command: travel request failed");
                        obs.on_status(nav.now(), &format!("travel to {goal} failed: {e}"));
                        self.gate.start_failed();
                    }
                }
            }
            Command::Cancel => {
                info!("command: cancel");
                nav.cancel(obs);
                self.gate.clear();
            }
            Command::ForceReset => {
                warn!("command: force reset");
                nav.cancel(obs);
                self.gate.clear();
            }
        }
    }
}

/// Forwards to the caller's observer while keeping the gate informed.
struct GateObserver<'a, O: ?Sized> {
    gate:  &'a CommandGate,
    clock: &'a dyn Clock,
    inner: &'a mut O,
}

impl<O: NavObserver + ?Sized> NavObserver for GateObserver<'_, O> {
    fn on_status(&mut self, tick: Tick, message: &str) {
        self.gate.touch(self.clock.now_ms());
        self.inner.on_status(tick, message);
    }

    fn on_segment(&mut self, plan: &SegmentPlan) {
        self.gate.touch(self.clock.now_ms());
        self.inner.on_segment(plan);
    }

    fn on_journey_complete(&mut self, journey: JourneyId, outcome: &JourneyOutcome) {
        self.gate.release();
        self.inner.on_journey_complete(journey, outcome);
    }
}
