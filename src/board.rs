//! Game board: cell grid, ship registry and remaining fleet inventory.

use std::collections::BTreeMap;
use core::fmt;

use log::{debug, error};
use rand::Rng;

use crate::cell::{Cell, ShotState};
use crate::common::GameError;
use crate::config::{ShipInventory, MAX_SHIP_SIZE};
use crate::domain::{BoardView, CellView};
use crate::grid::{Coord, Grid};
use crate::ship::{Orientation, Ship, ShipId};

/// Random anchors tried for a single ship before the layout is abandoned.
const MAX_PLACEMENT_ATTEMPTS: usize = 200;
/// Whole layouts tried by [`Board::auto_fill`] before giving up.
const MAX_LAYOUT_ATTEMPTS: usize = 50;

/// A successfully placed ship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipHandle {
    pub id: ShipId,
    pub cells: Vec<Cell>,
}

/// How a shot resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShotOutcome {
    /// Open water.
    Miss,
    /// Ship segment hit, ship still afloat.
    Hit,
    /// Ship segment hit and the ship is now sunk.
    Killed(ShipId),
    /// The cell had already been shot; nothing changed.
    Repeat,
}

impl ShotOutcome {
    /// Whether the shot struck a ship for the first time.
    pub fn is_hit(self) -> bool {
        matches!(self, ShotOutcome::Hit | ShotOutcome::Killed(_))
    }
}

/// Result of [`Board::fire_at`]: the outcome plus the affected cells after
/// mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shot {
    pub outcome: ShotOutcome,
    pub cells: Vec<Cell>,
}

pub struct Board {
    grid: Grid,
    ships: BTreeMap<ShipId, Ship>,
    inventory: ShipInventory,
    fleet: ShipInventory,
    next_ship_id: ShipId,
}

impl Board {
    /// Create an empty board expecting the fleet described by `fleet`.
    pub fn new(rows: usize, cols: usize, fleet: ShipInventory) -> Self {
        Board {
            grid: Grid::new(rows, cols),
            ships: BTreeMap::new(),
            inventory: fleet,
            fleet,
            next_ship_id: 1,
        }
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.grid.get(row, col).ok()
    }

    /// Ships still waiting to be placed, per size.
    pub fn inventory(&self) -> ShipInventory {
        self.inventory
    }

    /// The full fleet this board expects.
    pub fn fleet(&self) -> ShipInventory {
        self.fleet
    }

    /// Registered ships in id order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.values()
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(&id)
    }

    pub fn placed_ship_count(&self) -> usize {
        self.ships.len()
    }

    pub fn required_ship_count(&self) -> usize {
        self.fleet.total() as usize
    }

    /// `true` once every ship of the fleet is on the board.
    pub fn is_complete(&self) -> bool {
        self.placed_ship_count() == self.required_ship_count()
    }

    /// Reset to an empty board with the whole fleet back in inventory.
    pub fn clear(&mut self) {
        self.grid = Grid::new(self.grid.rows(), self.grid.cols());
        self.ships.clear();
        self.inventory = self.fleet;
        self.next_ship_id = 1;
    }

    /// Cells a ship of `size` anchored at `(row, col)` would cover.
    ///
    /// A run that would overflow the board is shifted back so it ends on the
    /// last row/column. Returns `None` if no such run exists.
    fn ship_run(&self, row: usize, col: usize, size: usize, orientation: Orientation) -> Option<Vec<Coord>> {
        let (rows, cols) = (self.rows(), self.cols());
        match orientation {
            Orientation::Horizontal => {
                if row >= rows || size > cols {
                    return None;
                }
                let start = if col + size > cols { cols - size } else { col };
                Some((start..start + size).map(|c| (row, c)).collect())
            }
            Orientation::Vertical => {
                if col >= cols || size > rows {
                    return None;
                }
                let start = if row + size > rows { rows - size } else { row };
                Some((start..start + size).map(|r| (r, col)).collect())
            }
        }
    }

    /// Every cell of the run and its surroundings must be open water.
    fn is_free(&self, run: &[Coord]) -> bool {
        run.iter().all(|&(row, col)| {
            self.grid.get(row, col).map_or(false, Cell::is_empty)
                && self
                    .grid
                    .around(row, col)
                    .all(|(r, c)| self.grid.get(r, c).map_or(false, Cell::is_empty))
        })
    }

    /// Try to place a ship of `size` at `(row, col)`.
    ///
    /// Returns `None` when the size is exhausted, the run does not fit, or it
    /// would overlap or touch another ship. The board is unchanged in that case.
    pub fn place_ship(
        &mut self,
        row: usize,
        col: usize,
        size: usize,
        orientation: Orientation,
    ) -> Option<ShipHandle> {
        if size == 0 || size > MAX_SHIP_SIZE || self.inventory.get(size) == 0 {
            return None;
        }
        let run = self.ship_run(row, col, size, orientation)?;
        if !self.is_free(&run) {
            return None;
        }

        let id = self.next_ship_id;
        let ship = match Ship::new(id, size, orientation, run, &mut self.grid) {
            Ok(ship) => ship,
            Err(e) => {
                error!("ship construction failed after validation: {}", e);
                return None;
            }
        };
        let cells = ship
            .cells()
            .iter()
            .filter_map(|&(r, c)| self.grid.get(r, c).ok().copied())
            .collect();

        self.inventory.take(size);
        self.ships.insert(id, ship);
        self.next_ship_id += 1;
        debug!("placed ship {} size {} at ({}, {}) {:?}", id, size, row, col, orientation);
        Some(ShipHandle { id, cells })
    }

    /// Remove the ship covering `(row, col)`, returning it to the inventory.
    pub fn remove_ship(&mut self, row: usize, col: usize) -> bool {
        let Some(id) = self.cell(row, col).and_then(Cell::ship_id) else {
            return false;
        };
        let Some(ship) = self.ships.remove(&id) else {
            return false;
        };
        ship.lift(&mut self.grid);
        self.inventory.put_back(ship.len());
        debug!("removed ship {} at ({}, {})", id, row, col);
        true
    }

    /// Fire at `(row, col)`.
    ///
    /// Returns `None` when out of bounds. Firing at a cell that was already
    /// shot changes nothing and reports [`ShotOutcome::Repeat`].
    pub fn fire_at(&mut self, row: usize, col: usize) -> Option<Shot> {
        let cell = *self.grid.get(row, col).ok()?;
        if cell.is_shot() {
            return Some(Shot {
                outcome: ShotOutcome::Repeat,
                cells: vec![cell],
            });
        }

        let outcome = match cell.ship_id() {
            None => {
                self.grid.get_mut(row, col).ok()?.mark_hit();
                ShotOutcome::Miss
            }
            Some(id) => {
                let Some(ship) = self.ships.get_mut(&id) else {
                    error!("cell ({}, {}) references unknown ship {}", row, col, id);
                    return None;
                };
                if let Err(e) = ship.take_shot(row, col, &mut self.grid) {
                    error!("shot on ship {} failed: {}", id, e);
                    return None;
                }
                if ship.is_killed() {
                    ShotOutcome::Killed(id)
                } else {
                    ShotOutcome::Hit
                }
            }
        };

        let cell = *self.grid.get(row, col).ok()?;
        debug!("shot at ({}, {}): {:?}", row, col, outcome);
        Some(Shot {
            outcome,
            cells: vec![cell],
        })
    }

    /// Whether the ship covering `(row, col)` is sunk. `false` for water.
    pub fn is_ship_killed(&self, row: usize, col: usize) -> bool {
        self.cell(row, col)
            .and_then(Cell::ship_id)
            .and_then(|id| self.ships.get(&id))
            .map_or(false, Ship::is_killed)
    }

    /// Candidate cells to fire at after a hit at `(row, col)`.
    ///
    /// For a live ship these are its unshot segments; otherwise the unshot
    /// orthogonal neighbours of the cell.
    pub fn possible_adjacent_targets(&self, row: usize, col: usize) -> Vec<Cell> {
        let live_ship = self
            .cell(row, col)
            .and_then(Cell::ship_id)
            .and_then(|id| self.ships.get(&id))
            .filter(|ship| !ship.is_killed());

        let coords: Vec<Coord> = match live_ship {
            Some(ship) => ship.cells().to_vec(),
            None => self.grid.orthogonal(row, col).collect(),
        };
        coords
            .into_iter()
            .filter_map(|(r, c)| self.grid.get(r, c).ok().copied())
            .filter(|cell| !cell.is_shot())
            .collect()
    }

    /// `true` iff every registered ship is sunk.
    pub fn all_ships_killed(&self) -> bool {
        self.ships.values().all(Ship::is_killed)
    }

    /// Snapshot of the grid. With `hide_ships`, unshot segments read as water.
    pub fn public_view(&self, hide_ships: bool) -> BoardView {
        let cells = self
            .grid
            .iter_rows()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        if hide_ships && cell.state() == ShotState::None {
                            CellView::water(cell.row(), cell.col())
                        } else {
                            CellView::from(cell)
                        }
                    })
                    .collect()
            })
            .collect();
        BoardView {
            rows: self.rows(),
            cols: self.cols(),
            cells,
        }
    }

    /// Replace the current layout with a random one covering the whole fleet.
    ///
    /// Ships go down largest first. Each layout is retried a bounded number of
    /// times; on failure the board is left empty.
    pub fn auto_fill<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        for _ in 0..MAX_LAYOUT_ATTEMPTS {
            self.clear();
            if self.try_random_layout(rng) {
                debug!("auto-filled board with {} ships", self.ships.len());
                return Ok(());
            }
        }
        self.clear();
        Err(GameError::AutoFillFailed)
    }

    fn try_random_layout<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        for size in (1..=MAX_SHIP_SIZE).rev() {
            while self.inventory.get(size) > 0 {
                let placed = (0..MAX_PLACEMENT_ATTEMPTS).any(|_| {
                    let row = rng.random_range(0..self.rows());
                    let col = rng.random_range(0..self.cols());
                    let orientation = Orientation::from_vertical(rng.random_bool(0.5));
                    self.place_ship(row, col, size, orientation).is_some()
                });
                if !placed {
                    return false;
                }
            }
        }
        true
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  ships: {},\n  inventory: {:?},\n  next_ship_id: {}\n}}",
            self.ships.len(),
            self.inventory,
            self.next_ship_id
        )?;
        write!(f, "{:?}", self.grid)
    }
}
