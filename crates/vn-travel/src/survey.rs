//! Terrain probes run before a segment is searched.

use vn_core::Cell;
use vn_world::{World, WorldResult};

/// Largest square shell scanned around an unwalkable target.
const NEAR_RADIUS: i32 = 30;

/// Vertical offsets tried on each shell cell.
const NEAR_DY: i32 = 3;

/// Lines shorter than this always count as clear.
const SHORT_LINE: f64 = 10.0;

/// Nearest walkable cell around `target`, scanning square shells of growing
/// radius and `±3` cells vertically.  Cells outside `heights` are skipped.
pub fn find_walkable_near<W: World + ?Sized>(
    world:   &W,
    target:  Cell,
    heights: (i32, i32),
) -> WorldResult<Option<Cell>> {
    let (lo, hi) = heights;
    for r in 1..=NEAR_RADIUS {
        for x in -r..=r {
            for z in -r..=r {
                if x.abs() != r && z.abs() != r {
                    continue;
                }
                for y in -NEAR_DY..=NEAR_DY {
                    let c = target.offset(x, y, z);
                    if c.y >= lo && c.y < hi && world.is_walkable(c)? {
                        return Ok(Some(c));
                    }
                }
            }
        }
    }
    Ok(None)
}

/// Rough test for an unobstructed straight line from `from` to `to`.
///
/// Samples one point every five cells (at most ten) and counts those where
/// an upright agent would fit; the line is clear when at least 70% of the
/// sample count is.
pub fn line_mostly_clear<W: World + ?Sized>(
    world:   &W,
    from:    Cell,
    to:      Cell,
    heights: (i32, i32),
) -> WorldResult<bool> {
    let dist = from.distance(to);
    if dist < SHORT_LINE {
        return Ok(true);
    }
    let (lo, hi) = heights;
    let samples = ((dist / 5.0) as i32).min(10);
    let (dx, dy, dz) = to - from;
    let mut clear = 0;
    for i in 1..samples {
        let f = i as f64 / samples as f64;
        let c = Cell::new(
            (from.x as f64 + dx as f64 * f) as i32,
            (from.y as f64 + dy as f64 * f) as i32,
            (from.z as f64 + dz as f64 * f) as i32,
        );
        if c.y >= lo && c.y < hi && world.is_walkable(c)? {
            clear += 1;
        }
    }
    Ok(clear as f64 >= samples as f64 * 0.7)
}
