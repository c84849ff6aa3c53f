//! Neighbourhood policies and in-bounds neighbour enumeration.

/// Which cells count as neighbours while growing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Neighborhood {
    /// Up, down, left, right.
    #[default]
    N4,
    /// N4 plus the four diagonals.
    N8,
    /// N4 on the first wave, N8 on the second, and so on.
    ///
    /// Produces rounder regions than either fixed rule (an octagonal metric).
    Swap,
}

/// Connectivity used for a single wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Four,
    Eight,
}

impl Neighborhood {
    /// Connectivity of the first wave.
    pub fn initial(self) -> Connectivity {
        match self {
            Neighborhood::N4 | Neighborhood::Swap => Connectivity::Four,
            Neighborhood::N8 => Connectivity::Eight,
        }
    }

    /// Connectivity of the wave following one that used `current`.
    pub fn advance(self, current: Connectivity) -> Connectivity {
        match (self, current) {
            (Neighborhood::Swap, Connectivity::Four) => Connectivity::Eight,
            (Neighborhood::Swap, Connectivity::Eight) => Connectivity::Four,
            _ => current,
        }
    }
}

/// Up to eight neighbour indices of one cell.
#[derive(Debug, Clone, Copy)]
pub struct Neighbors {
    cells: [usize; 8],
    len: usize,
}

impl Neighbors {
    #[inline]
    fn push(&mut self, index: usize) {
        self.cells[self.len] = index;
        self.len += 1;
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.cells[..self.len]
    }
}

impl IntoIterator for Neighbors {
    type Item = usize;
    type IntoIter = std::iter::Take<std::array::IntoIter<usize, 8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter().take(self.len)
    }
}

/// Row or column offsets that stay inside `0..extent`.
#[inline]
fn offsets(position: usize, extent: usize) -> &'static [isize] {
    match (position == 0, position + 1 == extent) {
        (true, true) => &[0],
        (true, false) => &[0, 1],
        (false, true) => &[-1, 0],
        (false, false) => &[-1, 0, 1],
    }
}

/// In-bounds neighbours of `index` on a `height × width` grid.
///
/// Four-connected order is up, down, left, right. Eight-connected order walks
/// row offsets -1, 0, 1 and within each row column offsets -1, 0, 1.
#[inline]
pub fn neighbors(index: usize, height: usize, width: usize, connectivity: Connectivity) -> Neighbors {
    let row = index / width;
    let col = index % width;
    let row_offsets = offsets(row, height);
    let col_offsets = offsets(col, width);
    let at = |dr: isize, dc: isize| {
        (row as isize + dr) as usize * width + (col as isize + dc) as usize
    };

    let mut out = Neighbors {
        cells: [0; 8],
        len: 0,
    };
    match connectivity {
        Connectivity::Four => {
            for &dr in row_offsets.iter().filter(|&&dr| dr != 0) {
                out.push(at(dr, 0));
            }
            for &dc in col_offsets.iter().filter(|&&dc| dc != 0) {
                out.push(at(0, dc));
            }
        }
        Connectivity::Eight => {
            for &dr in row_offsets {
                for &dc in col_offsets {
                    if dr != 0 || dc != 0 {
                        out.push(at(dr, dc));
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_four() {
        // 3x3, centre cell 4
        let n = neighbors(4, 3, 3, Connectivity::Four);
        assert_eq!(n.as_slice(), &[1, 7, 3, 5]);
    }

    #[test]
    fn test_interior_eight() {
        let n = neighbors(4, 3, 3, Connectivity::Eight);
        assert_eq!(n.as_slice(), &[0, 1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn test_corners_stay_in_bounds() {
        assert_eq!(neighbors(0, 3, 3, Connectivity::Four).as_slice(), &[3, 1]);
        assert_eq!(neighbors(0, 3, 3, Connectivity::Eight).as_slice(), &[1, 3, 4]);
        assert_eq!(neighbors(8, 3, 3, Connectivity::Four).as_slice(), &[5, 7]);
        assert_eq!(neighbors(8, 3, 3, Connectivity::Eight).as_slice(), &[4, 5, 7]);
    }

    #[test]
    fn test_single_row_and_single_cell() {
        assert_eq!(neighbors(1, 1, 3, Connectivity::Eight).as_slice(), &[0, 2]);
        assert!(neighbors(0, 1, 1, Connectivity::Eight).as_slice().is_empty());
    }

    #[test]
    fn test_swap_alternates() {
        let policy = Neighborhood::Swap;
        let first = policy.initial();
        assert_eq!(first, Connectivity::Four);
        assert_eq!(policy.advance(first), Connectivity::Eight);
        assert_eq!(policy.advance(Connectivity::Eight), Connectivity::Four);
        assert_eq!(Neighborhood::N8.advance(Connectivity::Eight), Connectivity::Eight);
    }
}
