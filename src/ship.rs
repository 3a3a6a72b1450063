//! Ships: an ordered run of grid coordinates with hit/kill bookkeeping.

use serde::{Deserialize, Serialize};

use crate::cell::{Occupancy, Segment, ShotState};
use crate::common::ShipError;
use crate::grid::{Coord, Grid};

/// Identifier of a ship, unique within one board.
pub type ShipId = u32;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn from_vertical(vertical: bool) -> Self {
        if vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    pub fn is_vertical(self) -> bool {
        self == Orientation::Vertical
    }
}

/// A ship placed on a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    id: ShipId,
    orientation: Orientation,
    cells: Vec<Coord>,
    killed: bool,
}

impl Ship {
    /// Stamp a ship of `size` over `cells` of `grid`.
    ///
    /// Fails without touching the grid when the run length differs from
    /// `size` or any cell is already occupied.
    pub fn new(
        id: ShipId,
        size: usize,
        orientation: Orientation,
        cells: Vec<Coord>,
        grid: &mut Grid,
    ) -> Result<Self, ShipError> {
        if cells.len() != size {
            return Err(ShipError::WrongCellCount {
                expected: size,
                actual: cells.len(),
            });
        }
        for &(row, col) in &cells {
            if !grid.get(row, col)?.is_empty() {
                return Err(ShipError::CellNotEmpty { row, col });
            }
        }

        for (index, &(row, col)) in cells.iter().enumerate() {
            grid.get_mut(row, col)?.set_occupancy(Occupancy::Ship(Segment {
                ship_id: id,
                size,
                orientation,
                index,
            }));
        }

        Ok(Ship {
            id,
            orientation,
            cells,
            killed: false,
        })
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Coordinates of the ship, bow first.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.contains(&(row, col))
    }

    pub fn is_killed(&self) -> bool {
        self.killed
    }

    /// Register a shot at `(row, col)`, one of this ship's cells.
    ///
    /// No-op if the cell was already shot. When the last segment is hit every
    /// segment is promoted to `Killed`.
    pub fn take_shot(&mut self, row: usize, col: usize, grid: &mut Grid) -> Result<(), ShipError> {
        if !grid.get_mut(row, col)?.mark_hit() {
            return Ok(());
        }
        let mut all_hit = true;
        for &(r, c) in &self.cells {
            if grid.get(r, c)?.state() == ShotState::None {
                all_hit = false;
                break;
            }
        }
        if all_hit {
            for &(r, c) in &self.cells {
                grid.get_mut(r, c)?.mark_killed();
            }
            self.killed = true;
        }
        Ok(())
    }

    /// Reset every segment back to open water.
    pub(crate) fn lift(&self, grid: &mut Grid) {
        for &(row, col) in &self.cells {
            if let Ok(cell) = grid.get_mut(row, col) {
                cell.reset();
            }
        }
    }
}
