//! Discrete Voronoi labeling by alternating 4/8-connected growth.
//!
//! Every nonzero cell is a seed. All seeds grow at once, switching between
//! 4- and 8-connectivity each wave, so a cell ends up with the label of the
//! seed that is fewest alternating hops away. This approximates an octagonal
//! distance, not a Euclidean one.

use ndarray::{Array2, ArrayView2};
use tracing::debug;

use super::{GroupCollector, RegionLabeler};
use crate::error::GrowResult;
use crate::growing::{Groups, LabelGrid, Neighborhood};

/// Result of Voronoi propagation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoronoiMap {
    /// Propagated labels, same shape as the input.
    pub labels: Array2<i32>,
    /// Waves run; 0 when the input has no seed.
    pub waves: usize,
    /// Cells per label.
    pub groups: Groups,
}

impl RegionLabeler {
    /// Propagate the nonzero labels of `seeds` into every zero cell.
    ///
    /// A grid without seeds is returned unchanged with `waves == 0`.
    ///
    /// # Errors
    /// `InvalidGridShape` if `seeds` has a zero dimension.
    pub fn voronoi(&self, seeds: ArrayView2<'_, i32>) -> GrowResult<VoronoiMap> {
        self.voronoi_grid(LabelGrid::from_array(seeds)?)
    }

    /// Same as [`RegionLabeler::voronoi`] for an existing grid.
    pub fn voronoi_grid(&self, mut grid: LabelGrid) -> GrowResult<VoronoiMap> {
        let frontier = grid.open_labeled();
        let seeds = frontier.len();
        let mut collector = GroupCollector::default();
        let waves = self
            .engine()
            .grow(&mut grid, frontier, Neighborhood::Swap, &mut collector);

        debug!(
            height = grid.height(),
            width = grid.width(),
            seeds,
            waves,
            "voronoi propagation finished"
        );

        Ok(VoronoiMap {
            labels: grid.into_array()?,
            waves,
            groups: collector.into_groups(),
        })
    }
}
