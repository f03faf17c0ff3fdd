//! Navigator callbacks for status reporting and guard release.

use vn_core::{JourneyId, Tick};

use crate::{JourneyOutcome, SegmentPlan};

/// Callbacks invoked by the [`Navigator`][crate::Navigator] as journeys
/// progress.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: status printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl NavObserver for Printer {
///     fn on_status(&mut self, tick: Tick, message: &str) {
///         println!("[{tick}] {message}");
///     }
/// }
/// ```
pub trait NavObserver {
    /// Short human-readable progress message (journey start, waypoint
    /// changes, stuck and retry events, completion).
    fn on_status(&mut self, _tick: Tick, _message: &str) {}

    /// A segment was searched and handed to the walker.
    fn on_segment(&mut self, _plan: &SegmentPlan) {}

    /// The journey ended.  Called exactly once per journey, whatever the
    /// outcome.
    fn on_journey_complete(&mut self, _journey: JourneyId, _outcome: &JourneyOutcome) {}
}

/// A [`NavObserver`] that does nothing.
pub struct NoopObserver;

impl NavObserver for NoopObserver {}

impl<O: NavObserver + ?Sized> NavObserver for &mut O {
    fn on_status(&mut self, tick: Tick, message: &str) {
        (**self).on_status(tick, message);
    }

    fn on_segment(&mut self, plan: &SegmentPlan) {
        (**self).on_segment(plan);
    }

    fn on_journey_complete(&mut self, journey: JourneyId, outcome: &JourneyOutcome) {
        (**self).on_journey_complete(journey, outcome);
    }
}
