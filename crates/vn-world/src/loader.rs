//! CSV grid loader.
//!
//! # CSV format
//!
//! One row per solid cell:
//!
//! ```csv
//! x,y,z
//! 10,64,0
//! 10,65,0
//! 11,64,0
//! ```
//!
//! Duplicate rows are harmless.  The ground plane is not part of the file;
//! pass it separately so a sparse obstacle list can sit on an unbounded floor.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use vn_core::Cell;

use crate::{GridWorld, GridWorldBuilder, WorldResult};

#[derive(Deserialize)]
struct SolidRecord {
    x: i32,
    y: i32,
    z: i32,
}

/// Load a [`GridWorld`] from a CSV file of solid cells.
pub fn load_grid_csv(path: &Path, ground: Option<i32>) -> WorldResult<GridWorld> {
    let file = std::fs::File::open(path)?;
    load_grid_reader(file, ground)
}

/// Like [`load_grid_csv`] but accepts any `Read` source.
pub fn load_grid_reader<R: Read>(reader: R, ground: Option<i32>) -> WorldResult<GridWorld> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut builder = GridWorldBuilder::new();
    if let Some(y) = ground {
        builder = builder.ground(y);
    }

    let mut rows = 0usize;
    for record in csv_reader.deserialize::<SolidRecord>() {
        let r = record?;
        builder = builder.solid(Cell::new(r.x, r.y, r.z));
        rows += 1;
    }

    let grid = builder.build();
    debug!(rows, cells = grid.solid_count(), ?ground, "loaded grid");
    Ok(grid)
}
