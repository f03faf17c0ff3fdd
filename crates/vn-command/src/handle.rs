//! The foreign-thread half of the command surface.

use std::ops::Range;
use std::sync::Arc;

use crossbeam_channel::Sender;
use tracing::{debug, info, warn};

use vn_core::Cell;

use crate::gate::{Admission, CommandGate};
use crate::{Clock, CommandError, CommandResult, Request, Response};

/// Work marshalled onto the simulation thread.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Command {
    Travel(Cell),
    Cancel,
    ForceReset,
}

/// Cloneable, `Send` handle used by listener threads.
///
/// Nothing here touches navigator state: travel and cancel requests are
/// queued for the [`CommandPump`](crate::CommandPump), and status answers
/// come from the flags it publishes.
#[derive(Clone)]
pub struct NavHandle {
    pub(crate) tx:      Sender<Command>,
    pub(crate) gate:    Arc<CommandGate>,
    pub(crate) clock:   Arc<dyn Clock>,
    /// Legal goal heights, half-open.
    pub(crate) heights: Range<i32>,
}

impl NavHandle {
    pub fn gate(&self) -> &CommandGate {
        &self.gate
    }

    /// Ask for a journey to `goal`.
    ///
    /// A goal outside the legal heights fails with
    /// [`CommandError::InvalidCoords`] and leaves the guards untouched.
    /// `Success` means the request was queued; planning failures are
    /// reported later through the navigator's observer.
    pub fn request_travel(&self, goal: Cell) -> CommandResult<Response> {
        if !self.heights.contains(&goal.y) {
            debug!(%goal, "travel request rejected: height out of range");
            return Err(CommandError::InvalidCoords(goal.to_string()));
        }
        match self.gate.admit(self.clock.now_ms()) {
            Admission::Accepted => {}
            Admission::Busy => {
                debug!(%goal, "travel request rejected: journey in progress");
                return Ok(Response::Busy);
            }
            Admission::Initializing => {
                debug!(%goal, "travel request rejected: another request initializing");
                return Ok(Response::Initializing);
            }
        }
        if self.tx.send(Command::Travel(goal)).is_err() {
            self.gate.abandon();
            return Err(CommandError::Disconnected);
        }
        info!(%goal, "travel request queued");
        Ok(Response::Success)
    }

    pub fn cancel(&self) -> CommandResult<Response> {
        self.tx.send(Command::Cancel).map_err(|_| CommandError::Disconnected)?;
        Ok(Response::Cancelled)
    }

    pub fn status(&self) -> Response {
        Response::Status { active: self.gate.sync_status(self.clock.now_ms()) }
    }

    /// Clear both guards now and cancel on the simulation thread.  Always
    /// succeeds, even with the simulation thread gone.
    pub fn force_reset(&self) -> Response {
        warn!("force reset of command guards");
        if self.tx.send(Command::ForceReset).is_err() {
            debug!("force reset: simulation thread gone, guards cleared only");
        }
        self.gate.clear();
        Response::Reset
    }

    pub fn execute(&self, request: Request) -> CommandResult<Response> {
        match request {
            Request::Travel(goal) => self.request_travel(goal),
            Request::Cancel => self.cancel(),
            Request::Status => Ok(self.status()),
            Request::ForceReset => Ok(self.force_reset()),
        }
    }

    /// Parse and execute one protocol line.
    pub fn handle_line(&self, line: &str) -> Response {
        match line.parse::<Request>().and_then(|r| self.execute(r)) {
            Ok(response) => response,
            Err(e) => {
                debug!(line, error = %e, "request failed");
                Response::from(&e)
            }
        }
    }
}
