//! Region labeling built on the growth engine.
//!
//! - **Voronoi**: flood every unlabeled cell from the nearest seed
//! - **Cluster**: label 4-connected foreground components, rejecting small ones as noise
//! - **Separate**: split a value grid into same-value regions and absorb the small ones
//! - **Generators**: seed grids from group centroids
//! - **Pipelines**: cluster/separate followed by Voronoi propagation
//!
//! ## Label Conventions
//!
//! | Label | Meaning |
//! |-------|---------|
//! | `0` | unlabeled / background |
//! | `-1` | component rejected as noise (clustering only) |
//! | `>= 1` | region label |
//!
//! The free functions use a default [`RegionLabeler`]; construct one with a
//! custom [`GrowthConfig`] to change the tie-break or parallel threshold.

pub mod cluster;
pub mod generators;
pub mod pipeline;
pub mod separator;
pub mod voronoi;

pub use cluster::{ClusterConfig, ClusterMap, NoiseFilter, DEFAULT_MIN_SIZE};
pub use generators::centroid_seeds;
pub use pipeline::{CentroidVoronoi, MaskVoronoi};
pub use separator::{Separation, SeparatorConfig};
pub use voronoi::VoronoiMap;

use ndarray::ArrayView2;

use crate::error::GrowResult;
use crate::growing::{GrowthConfig, GrowthEngine, GrowthHooks, Groups, LabelGrid};

/// Drives the growth engine for every labeling algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionLabeler {
    engine: GrowthEngine,
}

impl RegionLabeler {
    pub fn new(config: GrowthConfig) -> Self {
        Self {
            engine: GrowthEngine::new(config),
        }
    }

    pub fn engine(&self) -> &GrowthEngine {
        &self.engine
    }
}

/// Hook that records the cells of a pass by their final label.
#[derive(Debug, Default)]
pub struct GroupCollector {
    groups: Groups,
}

impl GroupCollector {
    pub fn into_groups(self) -> Groups {
        self.groups
    }
}

impl GrowthHooks for GroupCollector {
    fn on_complete(&mut self, grid: &mut LabelGrid, visited: &[usize]) {
        for &cell in visited {
            self.groups.entry(grid.label(cell)).or_default().push(cell);
        }
    }
}

/// Propagate the nonzero labels of `seeds` over the whole grid.
pub fn voronoi(seeds: ArrayView2<'_, i32>) -> GrowResult<VoronoiMap> {
    RegionLabeler::default().voronoi(seeds)
}

/// Label the 4-connected components of cells with `value > 0`.
///
/// Components with fewer than `min_size` cells become noise (`-1`).
pub fn cluster<T>(values: ArrayView2<'_, T>, min_size: i64) -> GrowResult<ClusterMap>
where
    T: Copy + PartialOrd + Default,
{
    RegionLabeler::default().cluster(values, &ClusterConfig::new(min_size)?)
}

/// Split `values` into 4-connected same-value regions.
pub fn separate(
    values: ArrayView2<'_, i32>,
    min_size: i64,
    background: Option<i32>,
) -> GrowResult<Separation> {
    RegionLabeler::default().separate(values, &SeparatorConfig::new(min_size, background)?)
}

/// Cluster a foreground mask and propagate the surviving components.
pub fn voronize_mask<T>(mask: ArrayView2<'_, T>, min_size: i64) -> GrowResult<MaskVoronoi>
where
    T: Copy + PartialOrd + Default,
{
    RegionLabeler::default().voronize_mask(mask, &ClusterConfig::new(min_size)?)
}

/// Separate a value grid and propagate from the region centroids.
pub fn voronize_centroids(
    values: ArrayView2<'_, i32>,
    min_size: i64,
    background: Option<i32>,
) -> GrowResult<CentroidVoronoi> {
    RegionLabeler::default().voronize_centroids(values, &SeparatorConfig::new(min_size, background)?)
}
