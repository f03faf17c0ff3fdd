//! The travel orchestrator.

use tracing::{debug, info, warn};

use vn_core::{Cell, Controls, JourneyId, NavConfig, NavRng, SegmentId, Tick};
use vn_path::{PathElement, Simplifier};
use vn_search::{BoundedAStar, Pathfinder};
use vn_walker::Walker;
use vn_world::World;

use crate::stuck::{StuckDetector, StuckVerdict};
use crate::survey::{find_walkable_near, line_mostly_clear};
use crate::{
    Journey, JourneyMode, JourneyOutcome, NavObserver, NavigatorBuilder, SegmentKind, SegmentPlan,
    TravelError, TravelResult, WaypointPlanner,
};

/// Drives one agent through journeys of any length.
///
/// Owns the walker, the waypoint planner and the stuck detector; runs one
/// search per segment through `P`.  Everything happens synchronously inside
/// [`travel`](Self::travel), [`tick`](Self::tick) and
/// [`cancel`](Self::cancel) on the simulation thread.
///
/// # Type parameter
///
/// `P` is the segment search (by default [`BoundedAStar`]).  Swap it at
/// compile time for a different algorithm with no runtime overhead.
pub struct Navigator<P: Pathfinder = BoundedAStar> {
    pub(crate) config:       NavConfig,
    pub(crate) pathfinder:   P,
    pub(crate) simplifier:   Simplifier,
    pub(crate) walker:       Walker,
    pub(crate) planner:      WaypointPlanner,
    pub(crate) stuck:        StuckDetector,
    pub(crate) rng:          NavRng,
    pub(crate) journey:      Option<Journey>,
    pub(crate) now:          Tick,
    pub(crate) next_journey: JourneyId,
    pub(crate) next_segment: SegmentId,
}

impl Navigator<BoundedAStar> {
    /// A navigator using the default search configured from `config.search`.
    pub fn new(config: NavConfig) -> TravelResult<Self> {
        let search = BoundedAStar::new(config.search.clone());
        NavigatorBuilder::new(config, search).build()
    }
}

impl<P: Pathfinder> Navigator<P> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Ticks processed so far.
    pub fn now(&self) -> Tick {
        self.now
    }

    /// `true` while a journey is in progress.
    pub fn is_active(&self) -> bool {
        self.journey.is_some()
    }

    pub fn journey(&self) -> Option<&Journey> {
        self.journey.as_ref()
    }

    pub fn destination(&self) -> Option<Cell> {
        self.journey.as_ref().map(|j| j.goal)
    }

    pub fn walker(&self) -> &Walker {
        &self.walker
    }

    /// Signals to apply before the next tick.
    pub fn controls(&self) -> Controls {
        self.walker.controls()
    }

    /// Remaining path of the current segment, for display.
    pub fn path_overlay(&self) -> Vec<PathElement> {
        self.walker.path_overlay()
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Start a journey to `goal`.
    ///
    /// Rejected with [`TravelError::Busy`] while another journey is active
    /// and with [`TravelError::InvalidGoal`] outside the legal heights; both
    /// leave the navigator untouched.  A failure while planning the first
    /// segment ends the new journey as `Failed` (reported to `obs`) and is
    /// also returned.
    pub fn travel<W, O>(&mut self, world: &W, goal: Cell, obs: &mut O) -> TravelResult<JourneyId>
    where
        W: World + ?Sized,
        O: NavObserver + ?Sized,
    {
        if self.journey.is_some() {
            return Err(TravelError::Busy);
        }
        let travel = &self.config.travel;
        if !travel.goal_height_ok(goal.y) {
            return Err(TravelError::InvalidGoal(goal));
        }
        let here = world.agent_cell()?;
        let dist = here.distance(goal);
        let survey = travel.survey_radius;
        let mode = if dist > survey { JourneyMode::Long } else { JourneyMode::Short };

        let id = self.next_journey;
        self.next_journey = id.next();
        self.journey = Some(Journey::new(id, goal, mode, here, self.now, travel.recalculation_delay_ticks));
        self.stuck.reset();

        info!(journey = %id, %goal, distance = dist, ?mode, "journey started");
        let message = match mode {
            JourneyMode::Short => format!("travelling to {goal} ({dist:.1} away)"),
            JourneyMode::Long => {
                format!("segmented travel to {goal} ({dist:.1} away, {survey:.0}-cell segments)")
            }
        };
        obs.on_status(self.now, &message);

        if let Err(e) = self.begin(world, here, obs) {
            warn!(journey = %id, error = %e, "journey failed to start");
            self.finish(JourneyOutcome::Failed(e.to_string()), obs);
            return Err(e);
        }
        Ok(id)
    }

    /// End the current journey as `Cancelled` and release every signal.
    /// Safe while idle (returns `None`, reports nothing).
    pub fn cancel<O: NavObserver + ?Sized>(&mut self, obs: &mut O) -> Option<JourneyOutcome> {
        self.finish(JourneyOutcome::Cancelled, obs)
    }

    /// Advance one simulation tick.
    ///
    /// Any error inside the tick ends the journey as `Failed`.  Returns the
    /// outcome when a journey ended during this tick.
    pub fn tick<W, O>(&mut self, world: &W, obs: &mut O) -> Option<JourneyOutcome>
    where
        W: World + ?Sized,
        O: NavObserver + ?Sized,
    {
        self.now.advance();
        match self.try_tick(world, obs) {
            Ok(done) => done,
            Err(e) => {
                warn!(error = %e, tick = %self.now, "journey failed");
                self.finish(JourneyOutcome::Failed(e.to_string()), obs)
            }
        }
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    fn try_tick<W, O>(&mut self, world: &W, obs: &mut O) -> TravelResult<Option<JourneyOutcome>>
    where
        W: World + ?Sized,
        O: NavObserver + ?Sized,
    {
        let Some((mode, goal)) = self.journey.as_ref().map(|j| (j.mode, j.goal)) else {
            self.walker.cancel();
            return Ok(None);
        };

        self.walker.tick(world)?;
        let pos = world.agent_position()?;
        let here = Cell::containing(pos);

        let verdict = self.stuck.observe(pos, self.walker.is_active(), &self.config.travel);
        if let StuckVerdict::Restart { escalate } = verdict {
            self.auto_restart(world, here, escalate, obs)?;
            return Ok(None);
        }

        match mode {
            JourneyMode::Short => {
                if !self.walker.is_active() {
                    let outcome = if here.distance(goal) <= self.config.travel.completion_radius {
                        JourneyOutcome::Reached
                    } else {
                        JourneyOutcome::Stopped
                    };
                    return Ok(self.finish(outcome, obs));
                }
            }
            JourneyMode::Long => {
                let due = self.journey.as_mut().is_some_and(|j| j.recheck.poll());
                if due {
                    return self.check_progress(world, here, obs);
                }
            }
        }
        Ok(None)
    }

    /// Issue the first segment of the journey just created.
    fn begin<W, O>(&mut self, world: &W, here: Cell, obs: &mut O) -> TravelResult<()>
    where
        W: World + ?Sized,
        O: NavObserver + ?Sized,
    {
        let Some((mode, goal)) = self.journey.as_ref().map(|j| (j.mode, j.goal)) else {
            return Ok(());
        };
        match mode {
            JourneyMode::Short => {
                let budget = self.config.travel.budget.short(here.distance(goal));
                self.issue(world, here, goal, budget, SegmentKind::Short, obs)
            }
            JourneyMode::Long => {
                let waypoint = self.pick_waypoint(world, here)?;
                let dist = here.distance(waypoint);
                obs.on_status(self.now, &format!("first waypoint {waypoint} ({dist:.1} away)"));
                let budget = self.config.travel.budget.first_waypoint(dist);
                self.issue(world, here, waypoint, budget, SegmentKind::FirstWaypoint, obs)
            }
        }
    }

    /// Periodic long-journey evaluation, run once the walker has gone idle.
    fn check_progress<W, O>(
        &mut self,
        world: &W,
        here:  Cell,
        obs:   &mut O,
    ) -> TravelResult<Option<JourneyOutcome>>
    where
        W: World + ?Sized,
        O: NavObserver + ?Sized,
    {
        if self.walker.is_active() {
            return Ok(None);
        }
        let now = self.now;
        let travel = &self.config.travel;
        let Some(j) = self.journey.as_mut() else {
            return Ok(None);
        };

        let moved = j.last_check.distance(here);
        if moved > travel.min_progress {
            j.stuck_level = 0;
        } else if j.segment_open {
            j.stuck_level += 1;
            warn!(journey = %j.id, attempt = j.stuck_level, moved, "no progress on segment");
            obs.on_status(now, &format!("not moving (attempt {}), trying a different approach", j.stuck_level));
            if j.stuck_level >= travel.stuck_strikes {
                j.stuck_level = 0;
                obs.on_status(now, "repeated failures, forcing a new approach");
            }
        }
        j.last_check = here;

        let remaining = here.distance(j.goal);
        if j.segment_open {
            j.segment_open = false;
            j.completed_segments += 1;
            let message = match j.waypoint {
                Some(wp) if here.distance(wp) < travel.waypoint_reached_radius => {
                    format!("reached waypoint, {remaining:.1} to destination")
                }
                _ => format!(
                    "segment {} completed, moved {moved:.1}, {remaining:.1} to destination",
                    j.completed_segments
                ),
            };
            obs.on_status(now, &message);
        }

        let (goal, stuck, next) = (j.goal, j.stuck_level, j.completed_segments + 1);
        if remaining <= travel.completion_radius {
            return Ok(self.finish(JourneyOutcome::Reached, obs));
        }

        if remaining <= travel.direct_range() {
            let budget = travel.budget.direct;
            j.waypoint = Some(goal);
            obs.on_status(now, &format!("destination in range ({remaining:.1}), final approach"));
            self.issue(world, here, goal, budget, SegmentKind::Direct, obs)?;
        } else {
            let budget = travel.budget.next_waypoint(stuck);
            let waypoint = self.pick_waypoint(world, here)?;
            obs.on_status(
                now,
                &format!("segment {next}: waypoint {waypoint} ({:.1} away)", here.distance(waypoint)),
            );
            self.issue(world, here, waypoint, budget, SegmentKind::Waypoint, obs)?;
        }
        Ok(None)
    }

    /// Cancel the stalled segment and start a fresh one from `here`.
    fn auto_restart<W, O>(&mut self, world: &W, here: Cell, escalate: bool, obs: &mut O) -> TravelResult<()>
    where
        W: World + ?Sized,
        O: NavObserver + ?Sized,
    {
        self.walker.cancel();
        let secs = Tick::secs_for(self.config.travel.stuck_window_ticks, self.config.tick_rate_hz);
        let Some(j) = self.journey.as_mut() else {
            return Ok(());
        };
        if escalate {
            j.stuck_level += 2;
        }
        let (mode, goal, stuck) = (j.mode, j.goal, j.stuck_level);
        warn!(journey = %j.id, at = %here, escalate, stuck, "agent stuck, restarting segment");
        obs.on_status(self.now, &format!("stuck for {secs:.0}s, restarting"));

        let target = match mode {
            JourneyMode::Short => goal,
            JourneyMode::Long => {
                let waypoint = self.pick_waypoint(world, here)?;
                obs.on_status(
                    self.now,
                    &format!("auto-restart: new waypoint {waypoint} ({:.1} away)", here.distance(waypoint)),
                );
                waypoint
            }
        };
        let budget = self.config.travel.budget.restart(stuck);
        self.issue(world, here, target, budget, SegmentKind::Restart, obs)
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Choose and record the next waypoint.
    fn pick_waypoint<W: World + ?Sized>(&mut self, world: &W, here: Cell) -> TravelResult<Cell> {
        let Some(j) = self.journey.as_mut() else {
            return Ok(here);
        };
        let waypoint = self.planner.choose(world, here, j.goal, j.waypoint, j.stuck_level, &mut self.rng)?;
        j.waypoint = Some(waypoint);
        Ok(waypoint)
    }

    /// Search a segment from `from` towards `target` and hand it to the
    /// walker.
    ///
    /// An unwalkable target is swapped for the nearest walkable cell, and
    /// the budget is capped when the straight line looks mostly clear.
    fn issue<W, O>(
        &mut self,
        world:  &W,
        from:   Cell,
        target: Cell,
        budget: u32,
        kind:   SegmentKind,
        obs:    &mut O,
    ) -> TravelResult<()>
    where
        W: World + ?Sized,
        O: NavObserver + ?Sized,
    {
        let travel = &self.config.travel;
        let heights = (travel.min_y, travel.max_y);

        let mut target = target;
        if !world.is_walkable(target)? {
            if let Some(alt) = find_walkable_near(world, target, heights)? {
                debug!(%target, %alt, "segment target not walkable, using nearby cell");
                target = alt;
            }
        }
        let mut budget = budget;
        if line_mostly_clear(world, from, target, heights)? {
            budget = budget.min(travel.budget.clear_line_cap);
        }

        let outcome = self.pathfinder.find_path(world, from, target, budget)?;
        let elements = self.simplifier.simplify(&outcome.path);

        let segment = self.next_segment;
        self.next_segment = segment.next();
        let Some(j) = self.journey.as_mut() else {
            return Ok(());
        };
        let plan = SegmentPlan {
            journey: j.id,
            segment,
            kind,
            from,
            target,
            budget,
            termination: outcome.termination,
            expansions: outcome.expansions,
            elements: elements.len(),
        };
        info!(
            journey = %plan.journey,
            segment = %plan.segment,
            ?kind,
            %from,
            %target,
            budget,
            termination = ?plan.termination,
            expansions = plan.expansions,
            elements = plan.elements,
            "segment issued"
        );

        self.walker.start(elements)?;
        j.segment_open = true;
        j.issued_segments += 1;
        obs.on_segment(&plan);
        Ok(())
    }

    /// Close the current journey, if any, and report it exactly once.
    fn finish<O: NavObserver + ?Sized>(&mut self, outcome: JourneyOutcome, obs: &mut O) -> Option<JourneyOutcome> {
        self.walker.cancel();
        self.stuck.reset();
        let journey = self.journey.take()?;
        info!(
            journey = %journey.id,
            %outcome,
            ticks = self.now.since(journey.started),
            segments = journey.issued_segments,
            "journey complete"
        );
        obs.on_status(self.now, &outcome.to_string());
        obs.on_journey_complete(journey.id, &outcome);
        Some(outcome)
    }
}
