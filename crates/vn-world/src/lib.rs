//! `vn-world`: the voxel-world query surface and in-process worlds.
//!
//! The navigation engine never owns the world.  It reads block solidity and
//! the agent's kinematic state through the [`World`] trait once per tick and
//! treats every answer as a snapshot valid for that tick only.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`world`]  | `World` trait, walkability helpers                           |
//! | [`grid`]   | `GridWorld` (sparse solid set + ground plane), builder       |
//! | [`loader`] | `load_grid_csv` / `load_grid_reader`                         |
//! | [`probe`]  | `ProbeWorld`: agent state set directly, optional failure     |
//! | [`sim`]    | `SimWorld`: kinematic agent driven by `Controls`             |
//! | [`error`]  | `WorldError`, `WorldResult<T>`                               |

pub mod error;
pub mod grid;
pub mod loader;
pub mod probe;
pub mod sim;
pub mod world;


pub use error::{WorldError, WorldResult};
pub use grid::{GridWorld, GridWorldBuilder};
pub use loader::{load_grid_csv, load_grid_reader};
pub use probe::ProbeWorld;
pub use sim::{Body, SimWorld};
pub use world::World;
