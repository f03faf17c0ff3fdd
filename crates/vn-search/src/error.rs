//! Search error type.

use thiserror::Error;

use vn_world::WorldError;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("expansion budget must be positive")]
    InvalidBudget,

    #[error(transparent)]
    World(#[from] WorldError),
}

pub type SearchResult<T> = Result<T, SearchError>;
