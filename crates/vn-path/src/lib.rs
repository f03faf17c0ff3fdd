//! `vn-path`: movement primitives and the simplification pipeline.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`element`]  | `PathElement` (`Travel`, `TravelVector`, `Jump`, `Fall`)     |
//! | [`convert`]  | `convert`: search nodes → raw elements                       |
//! | [`pass`]     | `Pass` trait and the three standard passes                   |
//! | [`pipeline`] | `Simplifier`: conversion followed by an ordered pass list    |
//!
//! # Design notes
//!
//! Every pass consumes the previous pass's output, never reorders elements,
//! and is idempotent on its own output.  The standard pipeline as a whole is
//! idempotent on paths produced by the search.

pub mod convert;
pub mod element;
pub mod pass;
pub mod pipeline;

#[cfg(test)]
mod tests;

pub use convert::convert;
pub use element::PathElement;
pub use pass::{CollinearTravelPass, FallColumnPass, JumpStepPass, Pass};
pub use pipeline::Simplifier;
