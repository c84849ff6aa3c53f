//! Voronizer Rust Extensions
//!
//! Wavefront region growing over 2D label grids, with Python bindings via
//! PyO3 and WASM bindings for JavaScript.
//!
//! ## Grid Format
//! All algorithms work on rectangular grids of shape (height, width):
//! - **Input**: `i32` labels/values, or any ordered scalar for foreground masks
//! - **Output**: `i32` labels, same shape as the input
//!
//! ## Label Convention
//! - `0`: unlabeled / background
//! - `-1`: component rejected as noise
//! - `>= 1`: region label
//!
//! ## Algorithms
//! - **Voronoi**: propagate seed labels with alternating 4/8-connectivity
//! - **Cluster**: 4-connected components with a minimum size
//! - **Separate**: same-value regions, small ones absorbed by neighbours
//! - **Voronize**: cluster or separate, then propagate
//!
//! Image decoding, edge detection, color quantization and rendering belong
//! to the caller.

pub mod error;
pub mod growing;
pub mod labeling;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{GrowError, GrowResult};
pub use growing::{
    Frontier, Groups, GrowthConfig, GrowthEngine, GrowthHooks, LabelGrid, Neighborhood, TieBreak,
    VisitState, NOISE, UNLABELED,
};
pub use labeling::{
    centroid_seeds, cluster, separate, voronize_centroids, voronize_mask, voronoi, ClusterConfig,
    ClusterMap, RegionLabeler, Separation, SeparatorConfig, VoronoiMap,
};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::GrowError;
    use crate::labeling::{self, DEFAULT_MIN_SIZE};

    impl From<GrowError> for PyErr {
        fn from(err: GrowError) -> Self {
            PyValueError::new_err(err.to_string())
        }
    }

    // ========================================================================
    // Voronoi
    // ========================================================================

    /// Propagate nonzero seed labels over the whole grid.
    ///
    /// Returns (labels, waves). A grid without seeds comes back unchanged.
    #[pyfunction]
    pub fn voronoi<'py>(
        py: Python<'py>,
        seeds: PyReadonlyArray2<'py, i32>,
    ) -> PyResult<(Bound<'py, PyArray2<i32>>, usize)> {
        let result = labeling::voronoi(seeds.as_array())?;
        Ok((result.labels.into_pyarray(py), result.waves))
    }

    // ========================================================================
    // Clustering
    // ========================================================================

    /// Label 4-connected components of pixels > 0 (u8 mask).
    ///
    /// # Arguments
    /// * `mask` - Foreground mask (height, width)
    /// * `min_size` - Components with fewer pixels become noise
    /// * `shifted` - Map background and noise to 0 and component n to n + 1
    #[pyfunction]
    #[pyo3(signature = (mask, min_size=DEFAULT_MIN_SIZE as i64, shifted=false))]
    pub fn cluster<'py>(
        py: Python<'py>,
        mask: PyReadonlyArray2<'py, u8>,
        min_size: i64,
        shifted: bool,
    ) -> PyResult<Bound<'py, PyArray2<i32>>> {
        let result = labeling::cluster(mask.as_array(), min_size)?;
        let labels = if shifted { result.legacy_shifted() } else { result.labels };
        Ok(labels.into_pyarray(py))
    }

    /// Label 4-connected components of pixels > 0.0 (f32 mask).
    #[pyfunction]
    #[pyo3(signature = (mask, min_size=DEFAULT_MIN_SIZE as i64, shifted=false))]
    pub fn cluster_f32<'py>(
        py: Python<'py>,
        mask: PyReadonlyArray2<'py, f32>,
        min_size: i64,
        shifted: bool,
    ) -> PyResult<Bound<'py, PyArray2<i32>>> {
        let result = labeling::cluster(mask.as_array(), min_size)?;
        let labels = if shifted { result.legacy_shifted() } else { result.labels };
        Ok(labels.into_pyarray(py))
    }

    // ========================================================================
    // Separation
    // ========================================================================

    /// Split a value grid into 4-connected same-value regions.
    ///
    /// Pass `background=None` to make every pixel assignable.
    #[pyfunction]
    #[pyo3(signature = (values, min_size=DEFAULT_MIN_SIZE as i64, background=Some(0)))]
    pub fn separate<'py>(
        py: Python<'py>,
        values: PyReadonlyArray2<'py, i32>,
        min_size: i64,
        background: Option<i32>,
    ) -> PyResult<Bound<'py, PyArray2<i32>>> {
        let result = labeling::separate(values.as_array(), min_size, background)?;
        Ok(result.labels.into_pyarray(py))
    }

    // ========================================================================
    // Pipelines
    // ========================================================================

    /// Cluster a mask and propagate the kept components over the grid.
    #[pyfunction]
    #[pyo3(signature = (mask, min_size=15))]
    pub fn voronize_mask<'py>(
        py: Python<'py>,
        mask: PyReadonlyArray2<'py, u8>,
        min_size: i64,
    ) -> PyResult<Bound<'py, PyArray2<i32>>> {
        let result = labeling::voronize_mask(mask.as_array(), min_size)?;
        Ok(result.cells.labels.into_pyarray(py))
    }

    /// Separate a value grid and propagate from the region centroids.
    #[pyfunction]
    #[pyo3(signature = (values, min_size=15, background=None))]
    pub fn voronize_centroids<'py>(
        py: Python<'py>,
        values: PyReadonlyArray2<'py, i32>,
        min_size: i64,
        background: Option<i32>,
    ) -> PyResult<Bound<'py, PyArray2<i32>>> {
        let result = labeling::voronize_centroids(values.as_array(), min_size, background)?;
        Ok(result.cells.labels.into_pyarray(py))
    }

    /// Voronizer Rust extension module
    #[pymodule]
    pub fn voronizer_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(voronoi, m)?)?;

        m.add_function(wrap_pyfunction!(cluster, m)?)?;
        m.add_function(wrap_pyfunction!(cluster_f32, m)?)?;
        m.add_function(wrap_pyfunction!(separate, m)?)?;

        m.add_function(wrap_pyfunction!(voronize_mask, m)?)?;
        m.add_function(wrap_pyfunction!(voronize_centroids, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::voronizer_rust;
