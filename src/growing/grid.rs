//! Arena storage for label grids.
//!
//! Cells live in flat vectors indexed by `row * width + col`. A cell's index
//! is its identity; frontiers and visit histories are plain index lists.

use std::collections::BTreeMap;

use ndarray::{Array2, ArrayView2};

use crate::error::{GrowError, GrowResult};

/// Label of a cell that has not been assigned yet.
pub const UNLABELED: i32 = 0;

/// Label of a cell whose component was rejected as noise.
pub const NOISE: i32 = -1;

/// Label → flat cell indices, in the order the cells were visited.
pub type Groups = BTreeMap<i32, Vec<usize>>;

/// Visit state of a cell during one growth pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitState {
    /// Not reached yet; the only state growth may write into.
    #[default]
    Unseen,
    /// Labeled and waiting in a frontier.
    Opened,
    /// Processed, or excluded from growth altogether.
    Closed,
}

/// Ordered set of opened cells forming one wave.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontier {
    cells: Vec<usize>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    pub(crate) fn push(&mut self, index: usize) {
        self.cells.push(index);
    }

    pub(crate) fn into_cells(self) -> Vec<usize> {
        self.cells
    }
}

/// Rectangular grid of labels with per-cell visit state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGrid {
    height: usize,
    width: usize,
    labels: Vec<i32>,
    states: Vec<VisitState>,
}

impl LabelGrid {
    /// Create an all-unlabeled grid.
    ///
    /// # Errors
    /// `InvalidGridShape` if either dimension is zero.
    pub fn new(height: usize, width: usize) -> GrowResult<Self> {
        Self::from_flat(vec![UNLABELED; height * width], height, width)
    }

    /// Wrap a row-major label buffer.
    ///
    /// # Errors
    /// `InvalidGridShape` if a dimension is zero or the buffer length does not
    /// equal `height * width`.
    pub fn from_flat(labels: Vec<i32>, height: usize, width: usize) -> GrowResult<Self> {
        if height == 0 || width == 0 {
            return Err(GrowError::shape(format!(
                "grid must be non-empty, got {height}x{width}"
            )));
        }
        if labels.len() != height * width {
            return Err(GrowError::shape(format!(
                "buffer holds {} cells, expected {height}x{width} = {}",
                labels.len(),
                height * width
            )));
        }
        let states = vec![VisitState::Unseen; labels.len()];
        Ok(Self {
            height,
            width,
            labels,
            states,
        })
    }

    /// Build a grid from nested rows.
    ///
    /// # Errors
    /// `InvalidGridShape` for an empty grid, empty rows, or ragged rows.
    pub fn from_rows(rows: &[Vec<i32>]) -> GrowResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(GrowError::shape(format!(
                "row {row} has {} cells, expected {width}",
                cells.len()
            )));
        }
        let labels = rows.iter().flatten().copied().collect();
        Self::from_flat(labels, height, width)
    }

    /// Copy labels out of a 2D array view (any memory layout).
    ///
    /// # Errors
    /// `InvalidGridShape` if the view has a zero dimension.
    pub fn from_array(labels: ArrayView2<'_, i32>) -> GrowResult<Self> {
        let (height, width) = labels.dim();
        Self::from_flat(labels.iter().copied().collect(), height, width)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    #[inline]
    pub fn label(&self, index: usize) -> i32 {
        self.labels[index]
    }

    #[inline]
    pub fn label_at(&self, row: usize, col: usize) -> i32 {
        self.labels[self.index(row, col)]
    }

    #[inline]
    pub fn state(&self, index: usize) -> VisitState {
        self.states[index]
    }

    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    #[inline]
    pub fn set_label(&mut self, index: usize, label: i32) {
        self.labels[index] = label;
    }

    #[inline]
    pub(crate) fn set_state(&mut self, index: usize, state: VisitState) {
        self.states[index] = state;
    }

    /// Mark every cell as `Closed` (not growable).
    pub fn close_all(&mut self) {
        self.states.fill(VisitState::Closed);
    }

    /// Reset visit state: cells matching `growable` become `Unseen`, the rest `Closed`.
    pub fn reset_states(&mut self, mut growable: impl FnMut(usize, i32) -> bool) {
        for (index, (state, &label)) in self.states.iter_mut().zip(&self.labels).enumerate() {
            *state = if growable(index, label) {
                VisitState::Unseen
            } else {
                VisitState::Closed
            };
        }
    }

    /// Assign `label` to an `Unseen` cell and add it to `frontier`.
    ///
    /// Opening a cell that is already opened only relabels it, so a frontier
    /// never holds a cell twice.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `index` is outside the grid or the cell is closed.
    pub fn open(&mut self, frontier: &mut Frontier, index: usize, label: i32) -> GrowResult<()> {
        if index >= self.len() {
            return Err(GrowError::config(format!(
                "seed index {index} outside {}x{} grid",
                self.height, self.width
            )));
        }
        match self.states[index] {
            VisitState::Unseen => {
                self.labels[index] = label;
                self.states[index] = VisitState::Opened;
                frontier.push(index);
                Ok(())
            }
            VisitState::Opened => {
                self.labels[index] = label;
                Ok(())
            }
            VisitState::Closed => {
                let (row, col) = self.coords(index);
                Err(GrowError::config(format!(
                    "seed cell ({row}, {col}) is already closed"
                )))
            }
        }
    }

    /// Open every labeled cell with its own label as a seed; unlabeled cells
    /// become `Unseen`.
    pub fn open_labeled(&mut self) -> Frontier {
        let mut frontier = Frontier::new();
        for (index, (state, &label)) in self.states.iter_mut().zip(&self.labels).enumerate() {
            if label == UNLABELED {
                *state = VisitState::Unseen;
            } else {
                *state = VisitState::Opened;
                frontier.push(index);
            }
        }
        frontier
    }

    /// First `Unseen` cell at or after `start`, in row-major order.
    pub fn next_unseen(&self, start: usize) -> Option<usize> {
        self.states
            .get(start..)?
            .iter()
            .position(|&s| s == VisitState::Unseen)
            .map(|offset| start + offset)
    }

    /// Group cell indices by label, in row-major order.
    pub fn groups(&self) -> Groups {
        let mut groups = Groups::new();
        for (index, &label) in self.labels.iter().enumerate() {
            groups.entry(label).or_default().push(index);
        }
        groups
    }

    /// Copy the labels into a `(height, width)` array.
    pub fn to_array(&self) -> Array2<i32> {
        Array2::from_shape_fn((self.height, self.width), |(row, col)| {
            self.labels[row * self.width + col]
        })
    }

    /// Move the labels into a `(height, width)` array.
    pub fn into_array(self) -> GrowResult<Array2<i32>> {
        Array2::from_shape_vec((self.height, self.width), self.labels)
            .map_err(|err| GrowError::shape(err.to_string()))
    }

    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.labels.chunks(self.width).map(<[i32]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = LabelGrid::from_rows(&[vec![0, 0], vec![0]]).unwrap_err();
        assert!(matches!(err, GrowError::InvalidGridShape { .. }));
    }

    #[test]
    fn test_from_rows_rejects_empty() {
        assert!(LabelGrid::from_rows(&[]).is_err());
        assert!(LabelGrid::from_rows(&[vec![], vec![]]).is_err());
    }

    #[test]
    fn test_from_flat_length_mismatch() {
        let err = LabelGrid::from_flat(vec![0; 5], 2, 3).unwrap_err();
        assert!(matches!(err, GrowError::InvalidGridShape { .. }));
    }

    #[test]
    fn test_index_and_coords() {
        let grid = LabelGrid::new(3, 4).unwrap();
        assert_eq!(grid.index(2, 1), 9);
        assert_eq!(grid.coords(9), (2, 1));
    }

    #[test]
    fn test_array_round_trip_keeps_layout() {
        let input = array![[1, 2, 3], [4, 5, 6]];
        let grid = LabelGrid::from_array(input.view()).unwrap();
        assert_eq!(grid.label_at(1, 0), 4);
        assert_eq!(grid.into_array().unwrap(), input);
    }

    #[test]
    fn test_transposed_view_is_read_logically() {
        let input = array![[1, 2], [3, 4]];
        let grid = LabelGrid::from_array(input.t()).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![1, 3], vec![2, 4]]);
    }

    #[test]
    fn test_open_dedupes_and_validates() {
        let mut grid = LabelGrid::new(2, 2).unwrap();
        let mut frontier = Frontier::new();
        grid.open(&mut frontier, 1, 5).unwrap();
        grid.open(&mut frontier, 1, 6).unwrap();
        assert_eq!(frontier.cells(), &[1]);
        assert_eq!(grid.label(1), 6);
        assert_eq!(grid.state(1), VisitState::Opened);

        let err = grid.open(&mut frontier, 4, 1).unwrap_err();
        assert!(matches!(err, GrowError::InvalidConfiguration { .. }));

        grid.close_all();
        assert!(grid.open(&mut frontier, 0, 1).is_err());
    }

    #[test]
    fn test_open_labeled_seeds_nonzero() {
        let mut grid = LabelGrid::from_rows(&[vec![0, 3], vec![-1, 0]]).unwrap();
        let frontier = grid.open_labeled();
        assert_eq!(frontier.cells(), &[1, 2]);
        assert_eq!(grid.state(0), VisitState::Unseen);
        assert_eq!(grid.state(2), VisitState::Opened);
    }

    #[test]
    fn test_next_unseen_scans_row_major() {
        let mut grid = LabelGrid::from_rows(&[vec![1, 0], vec![0, 1]]).unwrap();
        grid.reset_states(|_, label| label == 0);
        assert_eq!(grid.next_unseen(0), Some(1));
        assert_eq!(grid.next_unseen(2), Some(2));
        assert_eq!(grid.next_unseen(3), None);
        assert_eq!(grid.next_unseen(10), None);
    }

    #[test]
    fn test_groups_by_label() {
        let grid = LabelGrid::from_rows(&[vec![2, 1], vec![2, 0]]).unwrap();
        let groups = grid.groups();
        assert_eq!(groups[&2], vec![0, 2]);
        assert_eq!(groups[&1], vec![1]);
        assert_eq!(groups[&0], vec![3]);
    }
}
