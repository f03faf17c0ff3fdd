//! Error types for vn-command.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Three comma-separated fields whose coordinates are not integers.
    #[error("invalid coordinates: {0:?}")]
    InvalidCoords(String),

    /// Neither a coordinate triple nor a known keyword.
    #[error("unrecognised request: {0:?}")]
    InvalidFormat(String),

    /// The simulation side of the channel has been dropped.
    #[error("simulation thread is gone")]
    Disconnected,
}

/// Alias for `Result<T, CommandError>`.
pub type CommandResult<T> = Result<T, CommandError>;
