//! Row-major arena of cells addressed by `(row, col)`.
//!
//! Ships never hold references into the grid; they store coordinates and go
//! through the grid for every read or write.

use core::fmt;

use crate::cell::{Cell, ShotState};
use crate::common::GridError;

/// A `(row, col)` pair.
pub type Coord = (usize, usize);

const AROUND: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid of empty, unshot cells.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(row, col));
            }
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if self.in_bounds(row, col) {
            Ok(row * self.cols + col)
        } else {
            Err(GridError::IndexOutOfBounds { row, col })
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<&Cell, GridError> {
        let idx = self.index(row, col)?;
        Ok(&self.cells[idx])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell, GridError> {
        let idx = self.index(row, col)?;
        Ok(&mut self.cells[idx])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterate cells row by row.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1))
    }

    fn offsets<'a>(
        &'a self,
        row: usize,
        col: usize,
        deltas: &'a [(isize, isize)],
    ) -> impl Iterator<Item = Coord> + 'a {
        deltas.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            self.in_bounds(r, c).then_some((r, c))
        })
    }

    /// In-bounds coordinates of the eight cells surrounding `(row, col)`.
    pub fn around(&self, row: usize, col: usize) -> impl Iterator<Item = Coord> + '_ {
        self.offsets(row, col, &AROUND)
    }

    /// In-bounds coordinates of the four edge-sharing neighbours.
    pub fn orthogonal(&self, row: usize, col: usize) -> impl Iterator<Item = Coord> + '_ {
        self.offsets(row, col, &ORTHOGONAL)
    }
}

impl fmt::Debug for Grid {
    /// `x` killed, `*` hit, `o` miss, ship id digit for intact segments.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}:", self.rows, self.cols)?;
        for row in self.iter_rows() {
            for cell in row {
                let ch = match (cell.state(), cell.ship_id()) {
                    (ShotState::Killed, _) => 'x',
                    (ShotState::Hit, Some(_)) => '*',
                    (ShotState::Hit, None) => 'o',
                    (ShotState::None, Some(id)) => {
                        char::from_digit((id % 10) as u32, 10).unwrap_or('#')
                    }
                    (ShotState::None, None) => '-',
                };
                write!(f, " {} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
