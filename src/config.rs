//! Game settings and fleet configuration.

use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::common::GameError;

pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLS: usize = 10;
/// Largest ship length supported by the rules.
pub const MAX_SHIP_SIZE: usize = 4;
/// Widest and tallest board accepted; columns are addressed by a single letter.
pub const MAX_BOARD_DIM: usize = 26;

/// Whether the second seat is taken by the computer or by another human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    SinglePlay,
    MultiPlay,
}

/// Pace of the computer opponent's shot sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BotSpeed {
    Low,
    #[default]
    Medium,
    High,
}

impl BotSpeed {
    /// Pause taken before each bot shot. Faster tiers pause less.
    pub fn delay(self) -> Duration {
        match self {
            BotSpeed::Low => Duration::from_millis(1200),
            BotSpeed::Medium => Duration::from_millis(800),
            BotSpeed::High => Duration::from_millis(400),
        }
    }
}

/// Number of ships per length (1..=4) still to be placed, or originally
/// required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipInventory {
    pub x1: u32,
    pub x2: u32,
    pub x3: u32,
    pub x4: u32,
}

impl ShipInventory {
    pub const fn new(x1: u32, x2: u32, x3: u32, x4: u32) -> Self {
        Self { x1, x2, x3, x4 }
    }

    pub const fn empty() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Count for ships of `size`; zero for unsupported sizes.
    pub fn get(&self, size: usize) -> u32 {
        match size {
            1 => self.x1,
            2 => self.x2,
            3 => self.x3,
            4 => self.x4,
            _ => 0,
        }
    }

    fn slot_mut(&mut self, size: usize) -> Option<&mut u32> {
        match size {
            1 => Some(&mut self.x1),
            2 => Some(&mut self.x2),
            3 => Some(&mut self.x3),
            4 => Some(&mut self.x4),
            _ => None,
        }
    }

    /// Take one ship of `size`. Returns `false` when none are left.
    pub fn take(&mut self, size: usize) -> bool {
        match self.slot_mut(size) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }

    /// Give back one ship of `size`.
    pub fn put_back(&mut self, size: usize) {
        if let Some(n) = self.slot_mut(size) {
            *n += 1;
        }
    }

    /// Total number of ships across all sizes.
    pub fn total(&self) -> u64 {
        u64::from(self.x1) + u64::from(self.x2) + u64::from(self.x3) + u64::from(self.x4)
    }

    /// Total number of cells the fleet occupies.
    pub fn total_cells(&self) -> u64 {
        u64::from(self.x1)
            + 2 * u64::from(self.x2)
            + 3 * u64::from(self.x3)
            + 4 * u64::from(self.x4)
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Default for ShipInventory {
    fn default() -> Self {
        Self::new(4, 3, 2, 1)
    }
}

/// Settings a game is created with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub rows: usize,
    pub cols: usize,
    pub mode: GameMode,
    pub ships: ShipInventory,
    #[serde(default)]
    pub bot_speed: BotSpeed,
    /// Let the computer read ship positions directly.
    #[serde(default)]
    pub god_mode: bool,
    /// Fixed seed for reproducible games.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Settings {
    pub fn single_play() -> Self {
        Self::default()
    }

    pub fn multi_play() -> Self {
        Self {
            mode: GameMode::MultiPlay,
            ..Self::default()
        }
    }

    /// Reject boards that can never hold the configured fleet.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidSettings("board has no cells"));
        }
        if self.rows > MAX_BOARD_DIM || self.cols > MAX_BOARD_DIM {
            return Err(GameError::InvalidSettings("board too large"));
        }
        if self.ships.is_empty() {
            return Err(GameError::InvalidSettings("fleet is empty"));
        }
        let longest = (1..=MAX_SHIP_SIZE)
            .rev()
            .find(|&size| self.ships.get(size) > 0)
            .unwrap_or(0);
        if longest > self.rows.max(self.cols) {
            return Err(GameError::InvalidSettings("ship longer than board"));
        }
        // both dimensions are capped, so the product cannot overflow
        if self.ships.total_cells() > (self.rows * self.cols) as u64 {
            return Err(GameError::InvalidSettings("fleet larger than board"));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            mode: GameMode::SinglePlay,
            ships: ShipInventory::default(),
            bot_speed: BotSpeed::default(),
            god_mode: false,
            seed: None,
        }
    }
}
