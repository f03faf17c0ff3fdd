//! World-subsystem error type.

use thiserror::Error;

use vn_core::Cell;

/// Errors produced by world queries and grid loading.
#[derive(Debug, Error)]
pub enum WorldError {
    /// The query surface could not answer this tick (agent missing, world
    /// not loaded, connection lost).
    #[error("world unavailable: {0}")]
    Unavailable(String),

    #[error("cell {0} is outside the world's height limits")]
    OutOfBounds(Cell),

    #[error("grid parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WorldResult<T> = Result<T, WorldError>;
