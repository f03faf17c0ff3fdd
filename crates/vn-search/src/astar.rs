//! Bounded best-effort A*.
//!
//! # Pluggability
//!
//! The navigator calls search through the [`Pathfinder`] trait so tests and
//! applications can substitute their own implementation.  [`BoundedAStar`]
//! is the default.
//!
//! # Guarantees
//!
//! The search never promises optimality or completeness.  It promises to
//! stop after at most `budget` expansions and to return the most useful
//! chain it has: a path to the goal, to a node within the close-enough
//! radius, or to the node closest to the goal seen so far.  The returned
//! path is never empty and always starts at the start cell.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use vn_core::{Cell, SearchConfig};
use vn_world::World;

use crate::cost::{classify, heuristic, step_cost, wall_penalty};
use crate::node::{NodeArena, NodeIdx, SearchNode};
use crate::{SearchError, SearchResult};

/// Candidate offsets: W, E, N, S, NE, SE, SW, NW, up, down.
const NEIGHBOURS: [(i32, i32, i32); 10] = [
    (-1, 0, 0),
    (1, 0, 0),
    (0, 0, -1),
    (0, 0, 1),
    (1, 0, -1),
    (1, 0, 1),
    (-1, 0, 1),
    (-1, 0, -1),
    (0, 1, 0),
    (0, -1, 0),
];

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Why a search stopped.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// Start equals goal.
    Trivial,
    ReachedGoal,
    /// Expanded a node within the close-enough radius of the goal.
    CloseEnough,
    /// Too many expansions without getting closer to the goal.
    Stalled,
    /// Expanded a node too far from the start.
    RangeExceeded,
    BudgetExhausted,
    OpenSetExhausted,
}

impl Termination {
    /// `true` if the path ends at or near the goal.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Trivial | Self::ReachedGoal | Self::CloseEnough)
    }
}

/// One step of a search result.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub cell:    Cell,
    pub g:       u32,
    pub is_jump: bool,
    pub is_fall: bool,
}

#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub path:        Vec<PathNode>,
    pub termination: Termination,
    pub expansions:  u32,
}

impl SearchOutcome {
    /// Cell the path ends at.
    pub fn end(&self) -> Option<Cell> {
        self.path.last().map(|n| n.cell)
    }
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable segment search.
pub trait Pathfinder {
    /// Search from `start` towards `goal`, expanding at most `budget` nodes.
    fn find_path<W: World + ?Sized>(
        &self,
        world:  &W,
        start:  Cell,
        goal:   Cell,
        budget: u32,
    ) -> SearchResult<SearchOutcome>;
}

// ── BoundedAStar ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct BoundedAStar {
    pub config: SearchConfig,
}

impl BoundedAStar {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

impl Pathfinder for BoundedAStar {
    fn find_path<W: World + ?Sized>(
        &self,
        world:  &W,
        start:  Cell,
        goal:   Cell,
        budget: u32,
    ) -> SearchResult<SearchOutcome> {
        if budget == 0 {
            return Err(SearchError::InvalidBudget);
        }
        let outcome = if start == goal {
            SearchOutcome {
                path: vec![PathNode { cell: start, g: 0, is_jump: false, is_fall: false }],
                termination: Termination::Trivial,
                expansions: 0,
            }
        } else {
            search(&self.config, world, start, goal, budget)?
        };
        debug!(
            %start,
            %goal,
            budget,
            expansions = outcome.expansions,
            len = outcome.path.len(),
            termination = ?outcome.termination,
            "search finished"
        );
        Ok(outcome)
    }
}

// ── Open-set entries ──────────────────────────────────────────────────────────

/// Heap entry.  Lower `f` pops first; equal `f` pops in insertion order.
struct OpenEntry {
    f:   f64,
    seq: u64,
    idx: NodeIdx,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.total_cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

// ── Search internals ──────────────────────────────────────────────────────────

fn search<W: World + ?Sized>(
    config: &SearchConfig,
    world:  &W,
    start:  Cell,
    goal:   Cell,
    budget: u32,
) -> SearchResult<SearchOutcome> {
    let mut arena = NodeArena::with_capacity(budget.min(1 << 16) as usize);
    // Open cell → the arena node currently representing it.  Heap entries
    // whose node no longer matches are stale and skipped.
    let mut open: FxHashMap<Cell, NodeIdx> = FxHashMap::default();
    let mut closed: FxHashSet<Cell> = FxHashSet::default();
    let mut heap: BinaryHeap<OpenEntry> = BinaryHeap::new();
    let mut seq = 0u64;

    let root = arena.push(SearchNode::root(start, heuristic(start, goal)));
    open.insert(start, root);
    heap.push(OpenEntry { f: arena.get(root).f(), seq, idx: root });

    let mut best = root;
    let mut best_dist = f64::INFINITY;
    let mut non_productive = 0u32;
    let mut expansions = 0u32;

    let (winner, termination) = loop {
        if expansions >= budget {
            break (best, Termination::BudgetExhausted);
        }
        let Some(entry) = heap.pop() else {
            break (best, Termination::OpenSetExhausted);
        };
        let cell = arena.get(entry.idx).cell;
        if open.get(&cell) != Some(&entry.idx) {
            continue;
        }
        open.remove(&cell);
        closed.insert(cell);
        expansions += 1;

        if cell == goal {
            break (entry.idx, Termination::ReachedGoal);
        }
        let dist = cell.distance(goal);
        if dist <= config.close_enough {
            break (entry.idx, Termination::CloseEnough);
        }
        if dist < best_dist {
            best_dist = dist;
            best = entry.idx;
            non_productive = 0;
        } else {
            non_productive += 1;
            if non_productive >= config.max_non_productive {
                break (best, Termination::Stalled);
            }
        }
        if cell.distance(start) > config.max_range {
            break (best, Termination::RangeExceeded);
        }

        let (parent_g, parent_falling) = {
            let n = arena.get(entry.idx);
            (n.g, n.is_fall)
        };
        for candidate in ordered_neighbours(cell, goal) {
            if closed.contains(&candidate) {
                continue;
            }
            let Some(mv) = classify(world, cell, parent_falling, candidate)? else {
                continue;
            };
            let g = parent_g
                .saturating_add(step_cost(cell, candidate))
                .saturating_add(wall_penalty(world, candidate)?);
            if let Some(&existing) = open.get(&candidate) {
                if arena.get(existing).g <= g {
                    continue;
                }
            }
            let node = SearchNode::child(candidate, g, heuristic(candidate, goal), entry.idx, mv);
            let f = node.f();
            let idx = arena.push(node);
            open.insert(candidate, idx);
            seq += 1;
            heap.push(OpenEntry { f, seq, idx });
        }
    };

    let path = arena
        .chain(winner)
        .into_iter()
        .map(|n| PathNode { cell: n.cell, g: n.g, is_jump: n.is_jump, is_fall: n.is_fall })
        .collect();
    Ok(SearchOutcome { path, termination, expansions })
}

/// The ten candidate cells around `cell`, most goal-aligned first.  Equal
/// alignment keeps the fixed W, E, N, S, NE, SE, SW, NW, up, down order.
pub(crate) fn ordered_neighbours(cell: Cell, goal: Cell) -> [Cell; 10] {
    let (gx, gy, gz) = goal - cell;
    let (gx, gy, gz) = (gx as f64, gy as f64, gz as f64);
    let goal_len = (gx * gx + gy * gy + gz * gz).sqrt();

    let mut scored = NEIGHBOURS.map(|(dx, dy, dz)| {
        let (fx, fy, fz) = (dx as f64, dy as f64, dz as f64);
        let len = (fx * fx + fy * fy + fz * fz).sqrt();
        let align = if goal_len > 0.0 { (fx * gx + fy * gy + fz * gz) / (len * goal_len) } else { 0.0 };
        (align, cell.offset(dx, dy, dz))
    });
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.map(|(_, c)| c)
}
