//! Wavefront region growing over rectangular grids.
//!
//! - **Grid**: flat arena of labels and visit states ([`LabelGrid`])
//! - **Neighborhood**: 4-, 8- or alternating connectivity ([`Neighborhood`])
//! - **Engine**: multi-source breadth-first growth ([`GrowthEngine`])
//!
//! The labeling algorithms in [`crate::labeling`] are thin drivers that seed a
//! frontier and pick hooks for this engine.

pub mod engine;
pub mod grid;
pub mod neighborhood;

pub use engine::{GrowthConfig, GrowthEngine, GrowthHooks, TieBreak, DEFAULT_PARALLEL_MIN_WAVE};
pub use grid::{Frontier, Groups, LabelGrid, VisitState, NOISE, UNLABELED};
pub use neighborhood::{neighbors, Connectivity, Neighborhood};
