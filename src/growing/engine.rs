//! Breadth-first, multi-source wavefront growth.
//!
//! Growth proceeds in waves. Every cell of the current frontier offers its
//! label to its unseen neighbours; the newly opened neighbours form the next
//! frontier. Processed cells are closed and recorded in visit order.
//!
//! ## Ties
//!
//! A cell can be offered labels by several frontier cells of the same wave.
//! [`TieBreak`] decides which label it keeps, so the outcome never depends on
//! hashing or thread scheduling.
//!
//! ## Parallelism
//!
//! Large waves collect their offers with Rayon. Offers are then applied on the
//! calling thread in frontier order, so parallel and sequential runs produce
//! identical grids.

use rayon::prelude::*;
use tracing::{debug, trace};

use super::grid::{Frontier, LabelGrid, VisitState};
use super::neighborhood::{neighbors, Connectivity, Neighborhood};

/// Waves with at least this many cells collect offers in parallel by default.
pub const DEFAULT_PARALLEL_MIN_WAVE: usize = 4096;

/// Rule for a cell reached by several frontier cells in the same wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// The smallest offered label wins.
    #[default]
    LowestLabel,
    /// The first offer in frontier order wins.
    FirstWriter,
}

/// Callbacks that specialise a growth pass.
///
/// `admit` runs during the read-only part of a wave and may be called from
/// several threads at once.
pub trait GrowthHooks: Sync {
    /// Whether `to` may take the label of `from`. Only asked for unseen cells.
    fn admit(&self, _grid: &LabelGrid, _from: usize, _to: usize) -> bool {
        true
    }

    /// Called once after growth stops with every closed cell, in visit order.
    fn on_complete(&mut self, _grid: &mut LabelGrid, _visited: &[usize]) {}
}

impl GrowthHooks for () {}

impl<H: GrowthHooks> GrowthHooks for &mut H {
    fn admit(&self, grid: &LabelGrid, from: usize, to: usize) -> bool {
        (**self).admit(grid, from, to)
    }

    fn on_complete(&mut self, grid: &mut LabelGrid, visited: &[usize]) {
        (**self).on_complete(grid, visited);
    }
}

/// Engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthConfig {
    pub tie_break: TieBreak,
    /// Minimum wave size for parallel offer collection. `usize::MAX` disables it.
    pub parallel_min_wave: usize,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::default(),
            parallel_min_wave: DEFAULT_PARALLEL_MIN_WAVE,
        }
    }
}

impl GrowthConfig {
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_parallel_min_wave(mut self, size: usize) -> Self {
        self.parallel_min_wave = size;
        self
    }

    pub fn sequential(self) -> Self {
        self.with_parallel_min_wave(usize::MAX)
    }
}

/// Runs wavefront growth over a [`LabelGrid`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GrowthEngine {
    config: GrowthConfig,
}

impl GrowthEngine {
    pub fn new(config: GrowthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// Grow from `frontier` until no unseen cell can be reached.
    ///
    /// `frontier` must hold opened, labeled cells (see [`LabelGrid::open`]).
    /// Only `Unseen` cells are ever written. Returns the number of waves run,
    /// which is 0 exactly when `frontier` is empty. `hooks.on_complete` is
    /// called once, also when nothing grew.
    pub fn grow<H: GrowthHooks>(
        &self,
        grid: &mut LabelGrid,
        frontier: Frontier,
        neighborhood: Neighborhood,
        mut hooks: H,
    ) -> usize {
        let mut wave = frontier.into_cells();
        let mut connectivity = neighborhood.initial();
        let mut visited = Vec::with_capacity(wave.len());
        let mut waves = 0;

        while !wave.is_empty() {
            let offers = self.collect_offers(grid, &wave, connectivity, &hooks);
            let mut next = Vec::new();
            for (cell, label) in offers {
                match grid.state(cell) {
                    VisitState::Unseen => {
                        grid.set_label(cell, label);
                        grid.set_state(cell, VisitState::Opened);
                        next.push(cell);
                    }
                    // Offers only target cells that were unseen when the wave
                    // started, so an opened target belongs to `next`.
                    VisitState::Opened => {
                        if self.config.tie_break == TieBreak::LowestLabel && label < grid.label(cell) {
                            grid.set_label(cell, label);
                        }
                    }
                    VisitState::Closed => {}
                }
            }

            for &cell in &wave {
                grid.set_state(cell, VisitState::Closed);
            }
            visited.extend_from_slice(&wave);
            waves += 1;
            trace!(wave = waves, closed = wave.len(), opened = next.len(), ?connectivity, "wave done");

            connectivity = neighborhood.advance(connectivity);
            wave = next;
        }

        debug!(waves, visited = visited.len(), ?neighborhood, "growth finished");
        hooks.on_complete(grid, &visited);
        waves
    }

    /// `(neighbour, label)` offers of one wave, in frontier order.
    fn collect_offers<H: GrowthHooks>(
        &self,
        grid: &LabelGrid,
        wave: &[usize],
        connectivity: Connectivity,
        hooks: &H,
    ) -> Vec<(usize, i32)> {
        let (height, width) = (grid.height(), grid.width());
        let offers_of = move |&cell: &usize| {
            let label = grid.label(cell);
            neighbors(cell, height, width, connectivity)
                .into_iter()
                .filter(move |&n| grid.state(n) == VisitState::Unseen && hooks.admit(grid, cell, n))
                .map(move |n| (n, label))
        };

        if wave.len() >= self.config.parallel_min_wave {
            wave.par_iter().flat_map_iter(offers_of).collect()
        } else {
            wave.iter().flat_map(offers_of).collect()
        }
    }
}
