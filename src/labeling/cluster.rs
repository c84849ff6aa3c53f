//! Connected-component clustering with a minimum component size.
//!
//! Cells with `value > 0` are foreground. Components are discovered one at a
//! time: the first unseen foreground cell in row-major order is seeded with a
//! fresh label and grown with 4-connectivity. A component smaller than the
//! minimum size is relabeled as noise once its pass completes.
//!
//! Labels are handed out from a counter that starts at 1 and advances after
//! every pass, noise included, so kept labels are unique but may have gaps.

use ndarray::{Array2, ArrayView2};
use tracing::debug;

use super::RegionLabeler;
use crate::error::{GrowError, GrowResult};
use crate::growing::{Frontier, GrowthHooks, LabelGrid, Neighborhood, NOISE, UNLABELED};

/// Default minimum component size.
pub const DEFAULT_MIN_SIZE: usize = 50;

/// Clustering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterConfig {
    /// Components with fewer cells are noise. 0 keeps everything.
    pub min_size: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
        }
    }
}

impl ClusterConfig {
    /// # Errors
    /// `InvalidConfiguration` if `min_size` is negative.
    pub fn new(min_size: i64) -> GrowResult<Self> {
        let min_size = usize::try_from(min_size).map_err(|_| {
            GrowError::config(format!("minimum component size must be >= 0, got {min_size}"))
        })?;
        Ok(Self { min_size })
    }
}

/// Completion hook that relabels an undersized pass as noise.
#[derive(Debug, Clone, Copy)]
pub struct NoiseFilter {
    min_size: usize,
    rejected: bool,
}

impl NoiseFilter {
    pub fn new(min_size: usize) -> Self {
        Self {
            min_size,
            rejected: false,
        }
    }

    /// Whether the last completed pass was rejected.
    pub fn rejected(&self) -> bool {
        self.rejected
    }
}

impl GrowthHooks for NoiseFilter {
    fn on_complete(&mut self, grid: &mut LabelGrid, visited: &[usize]) {
        self.rejected = visited.len() < self.min_size;
        if self.rejected {
            for &cell in visited {
                grid.set_label(cell, NOISE);
            }
        }
    }
}

/// Result of clustering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterMap {
    /// `0` background, `-1` noise, `>= 1` component label.
    pub labels: Array2<i32>,
    /// Component passes run (kept plus noise).
    pub passes: usize,
    /// Components that reached the minimum size.
    pub components: usize,
    /// Components rejected as noise.
    pub noise: usize,
    /// Waves summed over all passes.
    pub waves: usize,
}

impl ClusterMap {
    /// Labels as a seed grid for Voronoi propagation: noise becomes unlabeled.
    pub fn seeds(&self) -> Array2<i32> {
        self.labels.mapv(|label| label.max(UNLABELED))
    }

    /// Labels in the shifted convention: background and noise both map to 0
    /// and component `n` to `n + 1`.
    pub fn legacy_shifted(&self) -> Array2<i32> {
        self.labels
            .mapv(|label| if label > UNLABELED { label + 1 } else { UNLABELED })
    }
}

impl RegionLabeler {
    /// Label the 4-connected components of cells with `value > T::default()`.
    ///
    /// # Errors
    /// `InvalidGridShape` if `values` has a zero dimension.
    pub fn cluster<T>(&self, values: ArrayView2<'_, T>, config: &ClusterConfig) -> GrowResult<ClusterMap>
    where
        T: Copy + PartialOrd + Default,
    {
        let (height, width) = values.dim();
        let mut grid = LabelGrid::new(height, width)?;
        let foreground: Vec<bool> = values.iter().map(|&v| v > T::default()).collect();
        grid.reset_states(|index, _| foreground[index]);
        self.cluster_grid(grid, config)
    }

    /// Cluster the `Unseen` cells of a prepared grid.
    ///
    /// Closed cells are background and keep their labels.
    pub fn cluster_grid(&self, mut grid: LabelGrid, config: &ClusterConfig) -> GrowResult<ClusterMap> {
        let mut label: i32 = 1;
        let mut cursor = 0;
        let (mut passes, mut components, mut noise, mut waves) = (0, 0, 0, 0);

        loop {
            let mut frontier = Frontier::new();
            if let Some(seed) = grid.next_unseen(cursor) {
                grid.open(&mut frontier, seed, label)?;
                cursor = seed + 1;
            }

            let mut filter = NoiseFilter::new(config.min_size);
            let pass_waves = self
                .engine()
                .grow(&mut grid, frontier, Neighborhood::N4, &mut filter);
            if pass_waves == 0 {
                break;
            }

            passes += 1;
            waves += pass_waves;
            if filter.rejected() {
                noise += 1;
            } else {
                components += 1;
            }
            label = label
                .checked_add(1)
                .ok_or_else(|| GrowError::config("component labels exhausted the i32 range"))?;
        }

        debug!(
            height = grid.height(),
            width = grid.width(),
            min_size = config.min_size,
            components,
            noise,
            "clustering finished"
        );

        Ok(ClusterMap {
            labels: grid.into_array()?,
            passes,
            components,
            noise,
            waves,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::cluster;
    use super::*;
    use ndarray::array;
    use std::collections::{BTreeMap, BTreeSet};

    #[test]
    fn test_small_component_is_noise() {
        let values = array![[0u8, 0, 0, 0], [0, 255, 255, 0], [0, 0, 255, 0]];
        let result = cluster(values.view(), 50).unwrap();
        assert_eq!(result.labels, array![[0, 0, 0, 0], [0, -1, -1, 0], [0, 0, -1, 0]]);
        assert_eq!(result.noise, 1);
        assert_eq!(result.components, 0);
        assert_eq!(result.legacy_shifted(), Array2::<i32>::zeros((3, 4)));
    }

    #[test]
    fn test_components_labeled_in_row_major_discovery_order() {
        let values = array![[1, 1, 0, 2], [0, 0, 0, 2], [3, 0, 4, 0]];
        let result = cluster(values.view(), 0).unwrap();
        assert_eq!(result.labels, array![[1, 1, 0, 2], [0, 0, 0, 2], [3, 0, 4, 0]]);
        assert_eq!(result.passes, 4);
        assert_eq!(result.components, 4);
    }

    #[test]
    fn test_diagonal_cells_are_separate_components() {
        let values = array![[1.0f32, 0.0], [0.0, 0.5]];
        let result = cluster(values.view(), 1).unwrap();
        assert_eq!(result.labels, array![[1, 0], [0, 2]]);
    }

    #[test]
    fn test_noise_consumes_a_label() {
        // 1-cell component first (noise), then a 3-cell component.
        let values = array![[1, 0, 1, 1, 1]];
        let result = cluster(values.view(), 2).unwrap();
        assert_eq!(result.labels, array![[-1, 0, 2, 2, 2]]);
        assert_eq!(result.seeds(), array![[0, 0, 2, 2, 2]]);
        assert_eq!(result.legacy_shifted(), array![[0, 0, 3, 3, 3]]);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let values = array![[1]];
        let err = cluster(values.view(), -3).unwrap_err();
        assert!(matches!(err, GrowError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_all_background() {
        let values = Array2::<i32>::zeros((3, 3));
        let result = cluster(values.view(), 5).unwrap();
        assert_eq!(result.passes, 0);
        assert_eq!(result.labels, values);
    }

    #[test]
    fn test_threshold_law_and_determinism() {
        // Pseudo-random foreground pattern.
        let values = Array2::from_shape_fn((24, 31), |(r, c)| ((r * 7 + c * 13 + r * c) % 5 < 2) as u8);
        let first = cluster(values.view(), 4).unwrap();
        let second = cluster(values.view(), 4).unwrap();
        assert_eq!(first, second);

        let mut members: BTreeMap<i32, Vec<(usize, usize)>> = BTreeMap::new();
        for ((r, c), &label) in first.labels.indexed_iter() {
            if values[[r, c]] == 0 {
                assert_eq!(label, 0);
            } else {
                assert_ne!(label, 0);
            }
            members.entry(label).or_default().push((r, c));
        }
        for (label, cells) in &members {
            if *label > 0 {
                assert!(cells.len() >= 4, "label {label} kept with {} cells", cells.len());
            }
        }
        let kept: BTreeSet<i32> = members.keys().copied().filter(|&l| l > 0).collect();
        assert_eq!(kept.len(), first.components);
        assert!(first.passes <= values.iter().filter(|&&v| v > 0).count());
    }
}
