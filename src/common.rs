//! Common types for the engine: error enums shared across modules.

use thiserror::Error;
use uuid::Uuid;

/// Errors returned by grid addressing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Row or column index is out of bounds.
    #[error("IndexOutOfBounds: row={row}, col={col}")]
    IndexOutOfBounds { row: usize, col: usize },
}

/// Construction invariant violations for a ship.
///
/// These indicate a bug in board validation, never a user mistake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShipError {
    /// Supplied cell run does not match the declared size.
    #[error("wrong number of cells: expected {expected}, got {actual}")]
    WrongCellCount { expected: usize, actual: usize },
    /// A supplied cell already holds a ship segment.
    #[error("cell ({row}, {col}) is not empty")]
    CellNotEmpty { row: usize, col: usize },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Errors returned by game and lobby operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The access token does not belong to a participant of this game.
    #[error("unknown access token: {0}")]
    InvalidToken(Uuid),
    /// No game is registered under the given id.
    #[error("game not found: {0}")]
    GameNotFound(Uuid),
    /// Both seats are already taken.
    #[error("game is full")]
    GameFull,
    /// Joining is only possible in two-player games.
    #[error("game does not accept a second human player")]
    WrongMode,
    /// Random ship layout could not be generated for the board settings.
    #[error("unable to place ships automatically")]
    AutoFillFailed,
    /// Settings describe a board that cannot hold the requested fleet.
    #[error("invalid settings: {0}")]
    InvalidSettings(&'static str),
}
