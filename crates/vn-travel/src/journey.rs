//! Journey state and the records reported about it.

use std::fmt;

use vn_core::{Cell, JourneyId, SegmentId, Tick, TickTimer};
use vn_search::Termination;

// ── JourneyMode ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JourneyMode {
    /// The goal is within the survey radius: one segment straight to it.
    Short,
    /// Segmented travel through intermediate waypoints.
    Long,
}

// ── JourneyOutcome ────────────────────────────────────────────────────────────

/// How a journey ended.  Reported exactly once per journey.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JourneyOutcome {
    /// The agent ended within the completion radius of the goal.
    Reached,
    /// The walker ran out of path short of the goal.
    Stopped,
    Cancelled,
    /// An internal error ended the journey.
    Failed(String),
}

impl fmt::Display for JourneyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reached => f.write_str("reached destination"),
            Self::Stopped => f.write_str("travel stopped short of destination"),
            Self::Cancelled => f.write_str("travel cancelled"),
            Self::Failed(why) => write!(f, "travel failed: {why}"),
        }
    }
}

// ── SegmentPlan ───────────────────────────────────────────────────────────────

/// Why a segment was issued.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentKind {
    /// The only segment of a short journey.
    Short,
    /// First waypoint of a long journey.
    FirstWaypoint,
    /// A later waypoint after the previous segment ended.
    Waypoint,
    /// Final approach once the destination is in direct range.
    Direct,
    /// Re-issued after the stuck detector fired.
    Restart,
}

/// Everything decided when a segment was issued.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentPlan {
    pub journey:     JourneyId,
    pub segment:     SegmentId,
    pub kind:        SegmentKind,
    pub from:        Cell,
    /// Target handed to the search (after any walkability adjustment).
    pub target:      Cell,
    pub budget:      u32,
    pub termination: Termination,
    pub expansions:  u32,
    /// Number of path elements given to the walker.
    pub elements:    usize,
}

// ── Journey ───────────────────────────────────────────────────────────────────

/// Per-journey bookkeeping owned by the navigator.
#[derive(Clone, Debug)]
pub struct Journey {
    pub id:      JourneyId,
    pub goal:    Cell,
    pub mode:    JourneyMode,
    pub started: Tick,

    /// Current waypoint (the goal itself once on the final approach).
    pub waypoint: Option<Cell>,
    /// Agent cell at the last progress evaluation.
    pub last_check: Cell,
    /// Shared stuck level: raised by failed progress checks and by repeated
    /// auto-restarts, it widens waypoint scatter and search budgets.
    pub stuck_level: u32,
    /// A segment was issued and has not been evaluated yet.
    pub segment_open: bool,
    /// Segments evaluated so far.
    pub completed_segments: u32,
    /// Segments issued so far.
    pub issued_segments: u32,

    pub(crate) recheck: TickTimer,
}

impl Journey {
    pub(crate) fn new(
        id:      JourneyId,
        goal:    Cell,
        mode:    JourneyMode,
        here:    Cell,
        started: Tick,
        recheck: u64,
    ) -> Self {
        Self {
            id,
            goal,
            mode,
            started,
            waypoint: None,
            last_check: here,
            stuck_level: 0,
            segment_open: false,
            completed_segments: 0,
            issued_segments: 0,
            recheck: TickTimer::new(recheck),
        }
    }
}
