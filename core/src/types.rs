use smallvec::SmallVec;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u16;

/// Largest accepted number of rows or columns.
pub const MAX_SIDE: Coord = 1024;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// A cell position on the board, `(row, col)`, 0-based.
pub type Position = Coord2;

/// Neighbor list, never more than 8 entries.
pub type Neighbors = SmallVec<[Position; 8]>;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Row-major flat index of `pos` on a board of `size`.
pub const fn flat_index(pos: Position, size: Coord2) -> CellCount {
    pos.0 as CellCount * size.1 as CellCount + pos.1 as CellCount
}

/// Inverse of [`flat_index`].
pub const fn from_flat_index(index: CellCount, size: Coord2) -> Position {
    let cols = size.1 as CellCount;
    ((index / cols) as Coord, (index % cols) as Coord)
}

const DISPLACEMENTS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i32, i32), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (dr, dc) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(dr.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(dc.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates the in-bounds positions within Chebyshev distance 1 of a center, excluding the center.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

/// All in-bounds neighbors of `pos` on a `nrows` x `ncols` board.
pub fn neighbors_of(pos: Position, nrows: Coord, ncols: Coord) -> Neighbors {
    NeighborIter::new(pos, (nrows, ncols)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let neighbors = neighbors_of((1, 1), 3, 3);

        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&(1, 1)));
    }

    #[test]
    fn corner_and_edge_cells_are_clipped() {
        assert_eq!(
            neighbors_of((0, 0), 3, 3).as_slice(),
            &[(0, 1), (1, 0), (1, 1)]
        );
        assert_eq!(neighbors_of((2, 1), 3, 3).len(), 5);
        assert_eq!(neighbors_of((0, 0), 1, 1).len(), 0);
    }

    #[test]
    fn single_row_board_has_only_horizontal_neighbors() {
        assert_eq!(neighbors_of((0, 2), 1, 5).as_slice(), &[(0, 1), (0, 3)]);
    }

    #[test]
    fn flat_index_is_row_major() {
        let size = (3, 4);
        assert_eq!(flat_index((0, 3), size), 3);
        assert_eq!(flat_index((2, 1), size), 9);
        assert_eq!(from_flat_index(9, size), (2, 1));
    }
}
