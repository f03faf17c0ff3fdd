//! `vn-search`: traversal cost model and bounded A* over voxel cells.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`cost`]  | `Move` classification, step cost, wall penalty, heuristic     |
//! | [`node`]  | `NodeIdx`, `SearchNode`, the per-call node arena              |
//! | [`astar`] | `Pathfinder` trait, `BoundedAStar`, `SearchOutcome`           |
//! | [`error`] | `SearchError`, `SearchResult<T>`                              |
//!
//! # Cost units
//!
//! Costs are integer "tenths of a cell": an axis-aligned step costs 10, a
//! horizontal diagonal 14.  The heuristic is in the same units but
//! fractional.

pub mod astar;
pub mod cost;
pub mod error;
pub mod node;


pub use astar::{BoundedAStar, PathNode, Pathfinder, SearchOutcome, Termination};
pub use cost::Move;
pub use error::{SearchError, SearchResult};
pub use node::{NodeIdx, SearchNode};
