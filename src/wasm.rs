//! WebAssembly exports for the voronizer.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//!
//! ## Buffer Layout
//!
//! Grids travel as flat row-major buffers with explicit `width` and `height`.
//! Shape and parameter errors are thrown as JavaScript exceptions.

use ndarray::ArrayView2;
use wasm_bindgen::prelude::*;

use crate::error::{GrowError, GrowResult};
use crate::labeling;

impl From<GrowError> for JsValue {
    fn from(err: GrowError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn view<T>(data: &[T], width: usize, height: usize) -> GrowResult<ArrayView2<'_, T>> {
    ArrayView2::from_shape((height, width), data).map_err(|_| {
        GrowError::shape(format!(
            "buffer holds {} cells, expected {height}x{width}",
            data.len()
        ))
    })
}

// ============================================================================
// Voronoi
// ============================================================================

/// Propagate nonzero seed labels over the whole grid.
///
/// # Arguments
/// * `data` - Flat array of seed labels (length = width * height)
/// * `width` - Grid width in cells
/// * `height` - Grid height in cells
///
/// # Returns
/// Flat array of propagated labels
#[wasm_bindgen]
pub fn voronoi_wasm(data: &[i32], width: usize, height: usize) -> Result<Vec<i32>, JsValue> {
    let result = labeling::voronoi(view(data, width, height)?)?;
    Ok(result.labels.into_raw_vec_and_offset().0)
}

// ============================================================================
// Clustering
// ============================================================================

/// Label 4-connected components of mask bytes > 0.
///
/// # Returns
/// Flat array: 0 background, -1 noise, >= 1 component label
#[wasm_bindgen]
pub fn cluster_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    min_size: i32,
) -> Result<Vec<i32>, JsValue> {
    let result = labeling::cluster(view(data, width, height)?, i64::from(min_size))?;
    Ok(result.labels.into_raw_vec_and_offset().0)
}

/// Label 4-connected components of mask floats > 0.0.
#[wasm_bindgen]
pub fn cluster_f32_wasm(
    data: &[f32],
    width: usize,
    height: usize,
    min_size: i32,
) -> Result<Vec<i32>, JsValue> {
    let result = labeling::cluster(view(data, width, height)?, i64::from(min_size))?;
    Ok(result.labels.into_raw_vec_and_offset().0)
}

// ============================================================================
// Pipelines
// ============================================================================

/// Cluster a mask and propagate the kept components over the grid.
#[wasm_bindgen]
pub fn voronize_mask_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    min_size: i32,
) -> Result<Vec<i32>, JsValue> {
    let result = labeling::voronize_mask(view(data, width, height)?, i64::from(min_size))?;
    Ok(result.cells.labels.into_raw_vec_and_offset().0)
}

/// Separate a value grid and propagate from the region centroids.
///
/// Every cell is assignable; pass already-quantized values.
#[wasm_bindgen]
pub fn voronize_centroids_wasm(
    data: &[i32],
    width: usize,
    height: usize,
    min_size: i32,
) -> Result<Vec<i32>, JsValue> {
    let result = labeling::voronize_centroids(view(data, width, height)?, i64::from(min_size), None)?;
    Ok(result.cells.labels.into_raw_vec_and_offset().0)
}
