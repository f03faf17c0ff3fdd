//! Line-oriented text protocol.
//!
//! | Request      | Meaning                                  |
//! |--------------|------------------------------------------|
//! | `x,y,z`      | travel to the cell (integers)            |
//! | `cancel`     | cancel the current journey               |
//! | `status`     | is a journey active?                     |
//! | `forcereset` | cancel and clear every guard             |
//!
//! Keywords are case-insensitive.  Every response is a single
//! `PATHFINDING:` line.

use std::fmt;
use std::str::FromStr;

use vn_core::Cell;

use crate::{CommandError, CommandResult};

const PREFIX: &str = "PATHFINDING:";

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Request {
    Travel(Cell),
    Cancel,
    Status,
    ForceReset,
}

impl FromStr for Request {
    type Err = CommandError;

    fn from_str(line: &str) -> CommandResult<Self> {
        let line = line.trim();
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() >= 3 {
            let coord = |s: &str| {
                s.trim().parse::<i32>().map_err(|_| CommandError::InvalidCoords(line.to_string()))
            };
            return Ok(Self::Travel(Cell::new(coord(parts[0])?, coord(parts[1])?, coord(parts[2])?)));
        }
        match line.to_ascii_lowercase().as_str() {
            "cancel" => Ok(Self::Cancel),
            "status" => Ok(Self::Status),
            "forcereset" => Ok(Self::ForceReset),
            _ => Err(CommandError::InvalidFormat(line.to_string())),
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Travel(c) => write!(f, "{},{},{}", c.x, c.y, c.z),
            Self::Cancel => f.write_str("cancel"),
            Self::Status => f.write_str("status"),
            Self::ForceReset => f.write_str("forcereset"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Response {
    /// The request was handed to the simulation thread.
    Success,
    Busy,
    Initializing,
    InvalidCoords,
    InvalidFormat,
    Cancelled,
    Reset,
    Status { active: bool },
    /// The simulation thread is not running.
    Unavailable,
}

impl Response {
    fn body(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Busy => "BUSY",
            Self::Initializing => "INITIALIZING",
            Self::InvalidCoords => "INVALID_COORDS",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::Cancelled => "CANCELLED",
            Self::Reset => "RESET",
            Self::Status { active: true } => "STATUS:ACTIVE",
            Self::Status { active: false } => "STATUS:INACTIVE",
            Self::Unavailable => "UNAVAILABLE",
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", self.body())
    }
}

impl FromStr for Response {
    type Err = CommandError;

    fn from_str(line: &str) -> CommandResult<Self> {
        let line = line.trim();
        let body = line
            .strip_prefix(PREFIX)
            .ok_or_else(|| CommandError::InvalidFormat(line.to_string()))?;
        let r = match body {
            "SUCCESS" => Self::Success,
            "BUSY" => Self::Busy,
            "INITIALIZING" => Self::Initializing,
            "INVALID_COORDS" => Self::InvalidCoords,
            "INVALID_FORMAT" => Self::InvalidFormat,
            "CANCELLED" => Self::Cancelled,
            "RESET" => Self::Reset,
            "STATUS:ACTIVE" => Self::Status { active: true },
            "STATUS:INACTIVE" => Self::Status { active: false },
            "UNAVAILABLE" => Self::Unavailable,
            _ => return Err(CommandError::InvalidFormat(line.to_string())),
        };
        Ok(r)
    }
}

impl From<&CommandError> for Response {
    fn from(e: &CommandError) -> Self {
        match e {
            CommandError::InvalidCoords(_) => Self::InvalidCoords,
            CommandError::InvalidFormat(_) => Self::InvalidFormat,
            CommandError::Disconnected => Self::Unavailable,
        }
    }
}
