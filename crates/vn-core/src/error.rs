//! Engine-wide error type.
//!
//! Sub-crates define their own error enums and wrap lower layers via `From`
//! impls; `NavError` covers what every crate may hit: bad configuration and
//! malformed input.

use thiserror::Error;

/// The top-level error type for `vn-core`.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `vn-core`.
pub type NavResult<T> = Result<T, NavError>;
