//! `vn-travel`: the travel orchestrator.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`navigator`] | `Navigator<P>`: journeys, segment issue, per-tick monitoring  |
//! | [`builder`]   | `NavigatorBuilder<P>`                                         |
//! | [`journey`]   | `Journey`, `JourneyMode`, `JourneyOutcome`, `SegmentPlan`     |
//! | [`planner`]   | `WaypointPlanner`: candidate generation and scoring           |
//! | [`survey`]    | Walkable-cell scan and straight-line clearance probe          |
//! | [`stuck`]     | `StuckDetector`: raw-displacement stall detection             |
//! | [`observer`]  | `NavObserver` callbacks, `NoopObserver`                       |
//! | [`error`]     | `TravelError`, `TravelResult<T>`                              |
//!
//! # Journey lifecycle
//!
//! 1. [`Navigator::travel`] measures the distance to the goal.  Within the
//!    survey radius it issues a single segment (`Short`); beyond it the
//!    journey is `Long` and the first segment targets a waypoint.
//! 2. Every [`Navigator::tick`] advances the walker, feeds the stuck
//!    detector, and (for long journeys, every recalculation delay once the
//!    walker is idle) evaluates progress and issues the next segment.
//! 3. The journey ends as `Reached`, `Stopped`, `Cancelled` or `Failed`;
//!    [`NavObserver::on_journey_complete`] fires exactly once.

pub mod builder;
pub mod error;
pub mod journey;
pub mod navigator;
pub mod observer;
pub mod planner;
pub mod stuck;
pub mod survey;

#[cfg(test)]
mod tests;

pub use builder::NavigatorBuilder;
pub use error::{TravelError, TravelResult};
pub use journey::{Journey, JourneyMode, JourneyOutcome, SegmentKind, SegmentPlan};
pub use navigator::Navigator;
pub use observer::{NavObserver, NoopObserver};
pub use planner::WaypointPlanner;
pub use stuck::{StuckDetector, StuckVerdict};
