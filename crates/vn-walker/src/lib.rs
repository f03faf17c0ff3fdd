//! `vn-walker`: follows one segment of movement primitives, tick by tick.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`target`] | `WalkTarget`, coasting prediction and the arrival predicate     |
//! | [`keys`]   | Eight-sector mapping from heading error to movement keys        |
//! | [`walker`] | `Walker` state machine (`Idle` / `Active`)                      |
//! | [`error`]  | `WalkerError`, `WalkerResult<T>`                                |
//!
//! # Tick model
//!
//! The walker never moves the agent.  Each call to [`Walker::tick`] reads a
//! snapshot from a [`World`][vn_world::World], advances past every element
//! the agent has already reached, and publishes a fresh
//! [`Controls`][vn_core::Controls] value for the caller to apply before the
//! next tick.

pub mod error;
pub mod keys;
pub mod target;
pub mod walker;


pub use error::{WalkerError, WalkerResult};
pub use keys::{movement_keys, sector};
pub use target::{predicted_stop, WalkTarget};
pub use walker::{Walker, WalkerStatus};
