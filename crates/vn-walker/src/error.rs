use thiserror::Error;

use vn_world::WorldError;

#[derive(Debug, Error)]
pub enum WalkerError {
    #[error("cannot start an empty segment")]
    EmptySegment,

    #[error(transparent)]
    World(#[from] WorldError),
}

pub type WalkerResult<T> = Result<T, WalkerError>;
