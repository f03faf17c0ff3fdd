use thiserror::Error;

use vn_core::{Cell, NavError};
use vn_search::SearchError;
use vn_walker::WalkerError;
use vn_world::WorldError;

#[derive(Debug, Error)]
pub enum TravelError {
    #[error("a journey is already in progress")]
    Busy,

    #[error("goal {0} is outside the legal height range")]
    InvalidGoal(Cell),

    #[error("invalid configuration: {0}")]
    Config(#[from] NavError),

    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("walker failed: {0}")]
    Walker(#[from] WalkerError),

    #[error(transparent)]
    World(#[from] WorldError),
}

pub type TravelResult<T> = Result<T, TravelError>;
