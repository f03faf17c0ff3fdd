//! flatland: drives the voxel navigation engine with a simulated agent.
//!
//! Usage: `flatland [config.toml]`  (see `flatland.toml`; `RUST_LOG` sets the
//! log filter).
//!
//! A client thread sends the scenario's goals one at a time over the text
//! protocol, waiting for each journey to finish.  The main thread is the
//! simulation loop: it pumps commands into the navigator, then steps the
//! kinematic agent with the navigator's controls.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vn_command::{NavHandle, Request, Response};
use vn_core::{Cell, JourneyId, NavConfig, Tick};
use vn_travel::{JourneyOutcome, NavObserver, Navigator, SegmentPlan};
use vn_world::{GridWorld, SimWorld, World, load_grid_csv};

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
struct DemoConfig {
    scenario: Scenario,
    nav:      NavConfig,
}

#[derive(Deserialize)]
#[serde(default)]
struct Scenario {
    ground_y:  i32,
    start:     [i32; 3],
    goals:     Vec<[i32; 3]>,
    walls:     Vec<Wall>,
    /// CSV of extra solid cells.
    obstacles: Option<PathBuf>,
    max_ticks: u64,
    /// Sleep one tick period per tick instead of running flat out.
    realtime:  bool,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            ground_y:  63,
            start:     [0, 64, 0],
            goals:     vec![[40, 64, 12], [200, 64, 0]],
            walls:     Vec::new(),
            obstacles: None,
            max_ticks: 20_000,
            realtime:  false,
        }
    }
}

/// Inclusive box of solid cells.
#[derive(Deserialize)]
struct Wall {
    from: [i32; 3],
    to:   [i32; 3],
}

fn cell([x, y, z]: [i32; 3]) -> Cell {
    Cell::new(x, y, z)
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: DemoConfig =
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    config.nav.validate()?;
    Ok(config)
}

fn build_world(s: &Scenario) -> Result<GridWorld> {
    let mut grid = match &s.obstacles {
        Some(path) => load_grid_csv(path, Some(s.ground_y))
            .with_context(|| format!("loading obstacles from {}", path.display()))?,
        None => GridWorld::flat(s.ground_y),
    };
    for wall in &s.walls {
        let (a, b) = (cell(wall.from), cell(wall.to));
        for x in a.x.min(b.x)..=a.x.max(b.x) {
            for y in a.y.min(b.y)..=a.y.max(b.y) {
                for z in a.z.min(b.z)..=a.z.max(b.z) {
                    grid.set_solid(Cell::new(x, y, z), true);
                }
            }
        }
    }
    Ok(grid)
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Report {
    segments: usize,
    outcomes: Vec<(JourneyId, JourneyOutcome)>,
}

impl NavObserver for Report {
    fn on_status(&mut self, tick: Tick, message: &str) {
        info!(%tick, "{message}");
    }

    fn on_segment(&mut self, plan: &SegmentPlan) {
        self.segments += 1;
        info!(
            segment = %plan.segment,
            kind = ?plan.kind,
            from = %plan.from,
            target = %plan.target,
            budget = plan.budget,
            expansions = plan.expansions,
            termination = ?plan.termination,
            elements = plan.elements,
            "segment issued"
        );
    }

    fn on_journey_complete(&mut self, journey: JourneyId, outcome: &JourneyOutcome) {
        self.outcomes.push((journey, outcome.clone()));
    }
}

// ── Client ────────────────────────────────────────────────────────────────────

const CLIENT_POLL: Duration = Duration::from_millis(5);

fn run_client(handle: &NavHandle, goals: &[Cell], sim_done: &AtomicBool) {
    for &goal in goals {
        let line = Request::Travel(goal).to_string();
        loop {
            if sim_done.load(Ordering::SeqCst) {
                return;
            }
            let response = handle.handle_line(&line);
            info!(request = %line, %response, "client");
            match response {
                Response::Success => break,
                Response::Busy | Response::Initializing => thread::sleep(CLIENT_POLL),
                _ => return,
            }
        }
        while !sim_done.load(Ordering::SeqCst) && (handle.gate().is_busy() || handle.gate().is_initializing()) {
            thread::sleep(CLIENT_POLL);
        }
        info!(response = %handle.handle_line("status"), "client");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config(path.as_deref())?;
    let scenario = &config.scenario;

    let mut world = SimWorld::new(build_world(scenario)?, cell(scenario.start));
    let mut nav = Navigator::new(config.nav.clone())?;
    let (handle, pump) = vn_command::channel(&config.nav);
    let goals: Vec<Cell> = scenario.goals.iter().copied().map(cell).collect();
    let tick_period = Duration::from_secs_f64(1.0 / config.nav.tick_rate_hz as f64);

    println!("=== flatland: voxel navigation ===");
    println!("Start: {}  |  Goals: {}  |  Tick rate: {} Hz", cell(scenario.start), goals.len(), config.nav.tick_rate_hz);

    let client_done = AtomicBool::new(false);
    let sim_done = AtomicBool::new(false);
    let mut report = Report::default();
    let started = Instant::now();

    let ticks = thread::scope(|scope| -> Result<u64> {
        scope.spawn(|| {
            run_client(&handle, &goals, &sim_done);
            client_done.store(true, Ordering::SeqCst);
        });

        let mut ticks = 0u64;
        while ticks < scenario.max_ticks {
            if client_done.load(Ordering::SeqCst) && !nav.is_active() {
                break;
            }
            pump.tick(&mut nav, &world, &mut report);
            if let Err(e) = world.step(&nav.controls()) {
                sim_done.store(true, Ordering::SeqCst);
                return Err(e.into());
            }
            ticks += 1;
            if scenario.realtime {
                thread::sleep(tick_period);
            } else if !nav.is_active() {
                // Idle: give the client time to send the next request.
                thread::sleep(Duration::from_millis(1));
            }
        }
        sim_done.store(true, Ordering::SeqCst);
        Ok(ticks)
    })?;

    println!();
    println!("Ticks: {ticks}  |  Segments: {}  |  Wall time: {:.2?}", report.segments, started.elapsed());
    for (journey, outcome) in &report.outcomes {
        println!("  {journey}: {outcome}");
    }
    println!("Final position: {}", world.agent_cell()?);
    Ok(())
}
