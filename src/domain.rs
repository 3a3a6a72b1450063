//! Read-only snapshots handed to the session layer for broadcasting.

use serde::{Deserialize, Serialize};

use crate::board::ShotOutcome;
use crate::cell::{Cell, ShotState};
use crate::config::{Settings, ShipInventory};
use crate::game::{GameState, Side};
use crate::ship::ShipId;

/// One cell as a client sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub row: usize,
    pub col: usize,
    /// `empty` or a segment tag such as `ship-x2-v-1`.
    pub kind: String,
    pub ship_id: Option<ShipId>,
    pub state: ShotState,
}

impl CellView {
    /// Unshot open water, also used to mask hidden segments.
    pub fn water(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            kind: "empty".to_string(),
            ship_id: None,
            state: ShotState::None,
        }
    }

    pub fn is_ship(&self) -> bool {
        self.ship_id.is_some()
    }
}

impl From<&Cell> for CellView {
    fn from(cell: &Cell) -> Self {
        Self {
            row: cell.row(),
            col: cell.col(),
            kind: cell.occupancy().to_string(),
            ship_id: cell.ship_id(),
            state: cell.state(),
        }
    }
}

/// Grid snapshot, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Vec<CellView>>,
}

impl BoardView {
    pub fn get(&self, row: usize, col: usize) -> Option<&CellView> {
        self.cells.get(row)?.get(col)
    }

    /// Number of visible ship segments.
    pub fn visible_segments(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_ship()).count()
    }
}

/// A resolved shot, ready to be broadcast to both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotReport {
    pub shooter: Side,
    pub row: usize,
    pub col: usize,
    pub outcome: ShotOutcome,
    pub cells: Vec<CellView>,
    pub state: GameState,
    /// Side holding the turn after this shot.
    pub turn: Side,
    pub winner: Option<Side>,
}

/// Per-seat part of a [`PlayerUpdate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatUpdate {
    pub nickname: String,
    pub board: BoardView,
    pub ships: ShipInventory,
    pub is_ready: bool,
}

/// Everything one participant needs to redraw its screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerUpdate {
    pub state: GameState,
    pub settings: Settings,
    pub player: SeatUpdate,
    pub rival: Option<SeatUpdate>,
    pub is_player_turn: bool,
    pub is_player_win: bool,
}
