//! Separation of a value grid into same-value regions.
//!
//! Cells with equal values that touch (4-connectivity) form one region, so two
//! patches of the same value that are apart get different labels. Regions
//! below the minimum size are dropped and then filled by growing the
//! surviving neighbours into them. Labels are finally remapped to `1..=k`.

use std::collections::BTreeMap;

use ndarray::{Array2, ArrayView2};
use tracing::debug;

use super::RegionLabeler;
use crate::error::{GrowError, GrowResult};
use crate::growing::{Frontier, GrowthHooks, Groups, LabelGrid, Neighborhood, UNLABELED};

/// Separation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparatorConfig {
    /// Regions with fewer cells are absorbed by their neighbours. 0 keeps everything.
    pub min_size: usize,
    /// Cells with this value are background. `None` makes every cell assignable.
    pub background: Option<i32>,
}

impl Default for SeparatorConfig {
    fn default() -> Self {
        Self {
            min_size: super::DEFAULT_MIN_SIZE,
            background: Some(0),
        }
    }
}

impl SeparatorConfig {
    /// # Errors
    /// `InvalidConfiguration` if `min_size` is negative.
    pub fn new(min_size: i64, background: Option<i32>) -> GrowResult<Self> {
        let min_size = usize::try_from(min_size).map_err(|_| {
            GrowError::config(format!("minimum region size must be >= 0, got {min_size}"))
        })?;
        Ok(Self {
            min_size,
            background,
        })
    }
}

/// Result of separation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separation {
    /// `0` for background and unabsorbed cells, `1..=regions` otherwise.
    pub labels: Array2<i32>,
    /// Cells per region label (label 0 excluded).
    pub groups: Groups,
    /// Regions kept.
    pub regions: usize,
    /// Regions dropped for being too small.
    pub dropped: usize,
}

/// Admits only equal values; drops undersized regions on completion.
struct SameValue<'a> {
    values: &'a [i32],
    min_size: usize,
    dropped: bool,
}

impl GrowthHooks for SameValue<'_> {
    fn admit(&self, _grid: &LabelGrid, from: usize, to: usize) -> bool {
        self.values[from] == self.values[to]
    }

    fn on_complete(&mut self, grid: &mut LabelGrid, visited: &[usize]) {
        self.dropped = visited.len() < self.min_size;
        if self.dropped {
            for &cell in visited {
                grid.set_label(cell, UNLABELED);
            }
        }
    }
}

impl RegionLabeler {
    /// Split `values` into 4-connected regions of equal value.
    ///
    /// # Errors
    /// `InvalidGridShape` if `values` has a zero dimension.
    pub fn separate(&self, values: ArrayView2<'_, i32>, config: &SeparatorConfig) -> GrowResult<Separation> {
        let (height, width) = values.dim();
        let flat: Vec<i32> = values.iter().copied().collect();
        let assignable: Vec<bool> = flat
            .iter()
            .map(|&v| config.background.map_or(true, |bg| v != bg))
            .collect();

        let mut grid = LabelGrid::new(height, width)?;
        grid.reset_states(|index, _| assignable[index]);

        let mut label: i32 = 1;
        let mut cursor = 0;
        let (mut regions, mut dropped) = (0, 0);
        loop {
            let mut frontier = Frontier::new();
            if let Some(seed) = grid.next_unseen(cursor) {
                grid.open(&mut frontier, seed, label)?;
                cursor = seed + 1;
            }

            let mut hooks = SameValue {
                values: &flat,
                min_size: config.min_size,
                dropped: false,
            };
            if self.engine().grow(&mut grid, frontier, Neighborhood::N4, &mut hooks) == 0 {
                break;
            }
            if hooks.dropped {
                dropped += 1;
            } else {
                regions += 1;
            }
            label = label
                .checked_add(1)
                .ok_or_else(|| GrowError::config("region labels exhausted the i32 range"))?;
        }

        if dropped > 0 {
            self.absorb_dropped(&mut grid, &assignable)?;
        }
        let groups = remap_contiguous(&mut grid);

        debug!(height, width, regions, dropped, "separation finished");

        Ok(Separation {
            labels: grid.into_array()?,
            groups,
            regions,
            dropped,
        })
    }

    /// Grow kept regions into the cells of dropped ones.
    fn absorb_dropped(&self, grid: &mut LabelGrid, assignable: &[bool]) -> GrowResult<()> {
        grid.reset_states(|index, _| assignable[index]);
        let mut frontier = Frontier::new();
        for index in 0..grid.len() {
            let label = grid.label(index);
            if assignable[index] && label != UNLABELED {
                grid.open(&mut frontier, index, label)?;
            }
        }
        let waves = self.engine().grow(grid, frontier, Neighborhood::N4, ());
        debug!(waves, "dropped regions absorbed");
        Ok(())
    }
}

/// Relabel positive labels to `1..=k` by ascending old label; returns the groups.
fn remap_contiguous(grid: &mut LabelGrid) -> Groups {
    let mut groups = grid.groups();
    groups.remove(&UNLABELED);

    let mut remapped = BTreeMap::new();
    for (new_label, (_, cells)) in (1..).zip(groups) {
        for &cell in &cells {
            grid.set_label(cell, new_label);
        }
        remapped.insert(new_label, cells);
    }
    remapped
}
