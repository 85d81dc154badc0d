//! Region extraction and import between a grid and flat cell buffers.

use super::grid::{Grid, Location};
use crate::error::{Result, WormholeError};

/// Clamp `[min, max)` to the grid. Returns `None` for an empty or inverted region.
fn clamp_region(grid: &Grid, min: Location, max: Location) -> Option<(Location, Location)> {
    let min = Location::new(min.row.clamp(0, grid.height), min.col.clamp(0, grid.width));
    let max = Location::new(max.row.clamp(0, grid.height), max.col.clamp(0, grid.width));

    if min.row >= max.row || min.col >= max.col {
        return None;
    }
    Some((min, max))
}

fn region_len(min: Location, max: Location) -> usize {
    (max.row - min.row) as usize * (max.col - min.col) as usize
}

/// Copy the cells of `[min, max)` into `out_buf`, row-major.
///
/// # Returns
/// The number of cells written; 0 for an empty region.
/// Fails if `out_buf` is smaller than the clamped region.
pub fn extract_region(
    grid: &Grid,
    out_buf: &mut [u8],
    min: Location,
    max: Location,
) -> Result<usize> {
    let Some((min, max)) = clamp_region(grid, min, max) else {
        return Ok(0);
    };

    let total = region_len(min, max);
    if out_buf.len() < total {
        return Err(WormholeError::RegionBuffer {
            expected: total,
            actual: out_buf.len(),
        });
    }

    let row_len = (max.col - min.col) as usize;
    for (i, row) in (min.row..max.row).enumerate() {
        let start = grid.index_of(Location::new(row, min.col));
        out_buf[i * row_len..(i + 1) * row_len]
            .copy_from_slice(&grid.cells[start..start + row_len]);
    }

    Ok(total)
}

/// Copy `in_buf` into the cells of `[min, max)`, row-major.
/// Values are normalized: 0 = dead, anything else = alive.
///
/// # Returns
/// The number of cells read; 0 for an empty region.
/// Fails if `in_buf` is smaller than the clamped region.
pub fn import_region(grid: &mut Grid, in_buf: &[u8], min: Location, max: Location) -> Result<usize> {
    let Some((min, max)) = clamp_region(grid, min, max) else {
        return Ok(0);
    };

    let total = region_len(min, max);
    if in_buf.len() < total {
        return Err(WormholeError::RegionBuffer {
            expected: total,
            actual: in_buf.len(),
        });
    }

    let mut offset = 0;
    for row in min.row..max.row {
        for col in min.col..max.col {
            let idx = grid.index_of(Location::new(row, col));
            grid.cells[idx] = u8::from(in_buf[offset] != 0);
            offset += 1;
        }
    }

    Ok(offset)
}
