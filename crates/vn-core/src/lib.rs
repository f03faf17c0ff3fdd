//! `vn-core`: foundational types for the voxel navigation engine.
//!
//! This crate is a dependency of every other `vn-*` crate.  It intentionally
//! has no `vn-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`cell`]   | `Cell` (voxel coordinate), `Vec3` (continuous point)       |
//! | [`input`]  | `InputState` key signals, `Facing` (yaw/pitch), `Controls` |
//! | [`ids`]    | `JourneyId`, `SegmentId`, the `typed_id!` macro            |
//! | [`time`]   | `Tick`, `TickTimer`                                        |
//! | [`rng`]    | `NavRng` (seeded, deterministic)                           |
//! | [`config`] | `NavConfig` and its per-subsystem sections                 |
//! | [`error`]  | `NavError`, `NavResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//! |         | Required to load `NavConfig` from TOML.                    |

pub mod cell;
pub mod config;
pub mod error;
pub mod ids;
pub mod input;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::{Cell, Vec3};
pub use config::{
    BudgetConfig, CommandConfig, NavConfig, SearchConfig, TravelConfig, WalkerConfig,
};
pub use error::{NavError, NavResult};
pub use ids::{JourneyId, SegmentId};
pub use input::{Controls, Facing, InputState};
pub use rng::NavRng;
pub use time::{Tick, TickTimer};
