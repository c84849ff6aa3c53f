//! End-to-end voronization of prepared grids.
//!
//! Two ways to obtain Voronoi generators, both followed by propagation:
//!
//! 1. **Mask**: a foreground mask (e.g. thresholded edges) is clustered; the
//!    kept components are the generators and noise is flooded over.
//! 2. **Centroids**: a value grid (e.g. a color-quantized image) is separated
//!    into same-value regions; each region's centre of mass is a generator.

use ndarray::{Array2, ArrayView2};

use super::generators::centroid_seeds;
use super::{ClusterConfig, ClusterMap, RegionLabeler, Separation, SeparatorConfig, VoronoiMap};
use crate::error::GrowResult;

/// Output of [`RegionLabeler::voronize_mask`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskVoronoi {
    pub clusters: ClusterMap,
    pub cells: VoronoiMap,
}

/// Output of [`RegionLabeler::voronize_centroids`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CentroidVoronoi {
    pub separation: Separation,
    /// One seed cell per region.
    pub seeds: Array2<i32>,
    pub cells: VoronoiMap,
}

impl RegionLabeler {
    /// Cluster `mask` and propagate the kept components over the grid.
    pub fn voronize_mask<T>(&self, mask: ArrayView2<'_, T>, config: &ClusterConfig) -> GrowResult<MaskVoronoi>
    where
        T: Copy + PartialOrd + Default,
    {
        let clusters = self.cluster(mask, config)?;
        let seeds = clusters.seeds();
        let cells = self.voronoi(seeds.view())?;
        Ok(MaskVoronoi { clusters, cells })
    }

    /// Separate `values` and propagate from the region centroids.
    pub fn voronize_centroids(
        &self,
        values: ArrayView2<'_, i32>,
        config: &SeparatorConfig,
    ) -> GrowResult<CentroidVoronoi> {
        let (height, width) = values.dim();
        let separation = self.separate(values, config)?;
        let seeds = centroid_seeds(&separation.groups, height, width)?;
        let seed_labels = seeds.to_array();
        let cells = self.voronoi_grid(seeds)?;
        Ok(CentroidVoronoi {
            separation,
            seeds: seed_labels,
            cells,
        })
    }
}
