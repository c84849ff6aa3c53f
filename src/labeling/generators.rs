//! Seed grids built from labeled groups.

use rayon::prelude::*;

use crate::error::{GrowError, GrowResult};
use crate::growing::{Groups, LabelGrid};

/// Place each positive group's label at its centre of mass on an empty grid.
///
/// The centre uses integer division of the summed row and column indices, so
/// it can fall outside a non-convex group. When two groups share a centre the
/// larger label wins.
///
/// # Errors
/// `InvalidGridShape` for a zero dimension; `InvalidConfiguration` if a group
/// refers to a cell outside `height × width`.
pub fn centroid_seeds(groups: &Groups, height: usize, width: usize) -> GrowResult<LabelGrid> {
    let mut grid = LabelGrid::new(height, width)?;
    let cell_count = grid.len();

    let centroids = groups
        .par_iter()
        .filter(|(label, cells)| **label > 0 && !cells.is_empty())
        .map(|(&label, cells)| {
            let mut row_sum = 0usize;
            let mut col_sum = 0usize;
            for &cell in cells {
                if cell >= cell_count {
                    return Err(GrowError::config(format!(
                        "group {label} refers to cell {cell} outside {height}x{width} grid"
                    )));
                }
                row_sum += cell / width;
                col_sum += cell % width;
            }
            let n = cells.len();
            Ok((label, (row_sum / n) * width + col_sum / n))
        })
        .collect::<GrowResult<Vec<_>>>()?;

    for (label, index) in centroids {
        grid.set_label(index, label);
    }
    Ok(grid)
}
