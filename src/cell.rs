//! Board cells: position, occupancy and shot state.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::ship::{Orientation, ShipId};

/// Shot state of a cell. Only ever advances `None -> Hit -> Killed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShotState {
    #[default]
    None,
    Hit,
    Killed,
}

/// Part of a ship occupying one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub ship_id: ShipId,
    pub size: usize,
    pub orientation: Orientation,
    /// Zero-based position of this segment within the ship.
    pub index: usize,
}

impl fmt::Display for Segment {
    /// Renders the tag clients use to pick a sprite, e.g. `ship-x3-v-2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.orientation {
            Orientation::Horizontal => write!(f, "ship-x{}-{}", self.size, self.index + 1),
            Orientation::Vertical => write!(f, "ship-x{}-v-{}", self.size, self.index + 1),
        }
    }
}

/// What a cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Occupancy {
    #[default]
    Empty,
    Ship(Segment),
}

impl Occupancy {
    pub fn is_empty(&self) -> bool {
        matches!(self, Occupancy::Empty)
    }

    pub fn ship_id(&self) -> Option<ShipId> {
        match self {
            Occupancy::Empty => None,
            Occupancy::Ship(seg) => Some(seg.ship_id),
        }
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupancy::Empty => f.write_str("empty"),
            Occupancy::Ship(seg) => seg.fmt(f),
        }
    }
}

/// Smallest addressable unit of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    row: usize,
    col: usize,
    occupancy: Occupancy,
    state: ShotState,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            occupancy: Occupancy::Empty,
            state: ShotState::None,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn coord(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn occupancy(&self) -> Occupancy {
        self.occupancy
    }

    pub fn state(&self) -> ShotState {
        self.state
    }

    pub fn ship_id(&self) -> Option<ShipId> {
        self.occupancy.ship_id()
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy.is_empty()
    }

    /// Whether the cell has been fired upon.
    pub fn is_shot(&self) -> bool {
        self.state != ShotState::None
    }

    pub(crate) fn set_occupancy(&mut self, occupancy: Occupancy) {
        self.occupancy = occupancy;
    }

    /// Mark the cell hit. Returns `false` if it was already shot.
    pub(crate) fn mark_hit(&mut self) -> bool {
        if self.is_shot() {
            return false;
        }
        self.state = ShotState::Hit;
        true
    }

    pub(crate) fn mark_killed(&mut self) {
        self.state = ShotState::Killed;
    }

    /// Clear occupancy and shot state; used when a ship is lifted off the board.
    pub(crate) fn reset(&mut self) {
        self.occupancy = Occupancy::Empty;
        self.state = ShotState::None;
    }
}
