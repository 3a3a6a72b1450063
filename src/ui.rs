//! Plain-text rendering of board snapshots and coordinate parsing for the
//! terminal front end.

use std::fmt::Write;

use crate::cell::ShotState;
use crate::common::GameError;
use crate::config::ShipInventory;
use crate::domain::BoardView;
use crate::game::Game;
use crate::player::Token;
use crate::ship::Orientation;

/// Column letter + 1-based row, e.g. `(6, 1)` -> `B7`.
pub fn coord_to_string(row: usize, col: usize) -> String {
    let letter = (b'A' + (col % 26) as u8) as char;
    format!("{}{}", letter, row + 1)
}

/// Parse `B7`-style input against a `rows` x `cols` board.
pub fn parse_coord(input: &str, rows: usize, cols: usize) -> Result<(usize, usize), String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter", col_ch));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= cols {
        return Err(format!("Column '{}' out of bounds", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-{}", row_str, rows))?;
    if row == 0 || row > rows {
        return Err(format!("Row {} out of bounds - must be 1-{}", row, rows));
    }
    Ok((row - 1, col))
}

fn glyph(state: ShotState, is_ship: bool) -> char {
    match (state, is_ship) {
        (ShotState::Killed, _) => '#',
        (ShotState::Hit, true) => 'X',
        (ShotState::Hit, false) => 'o',
        (ShotState::None, true) => 'S',
        (ShotState::None, false) => '.',
    }
}

/// Render a snapshot with a column-letter header and 1-based row labels.
pub fn render_board(view: &BoardView) -> String {
    let mut out = String::new();
    out.push_str("    ");
    for c in 0..view.cols {
        let _ = write!(out, " {}", (b'A' + (c % 26) as u8) as char);
    }
    out.push('\n');
    for (r, row) in view.cells.iter().enumerate() {
        let _ = write!(out, "  {:2}", r + 1);
        for cell in row {
            let _ = write!(out, " {}", glyph(cell.state, cell.is_ship()));
        }
        out.push('\n');
    }
    out
}

/// One-line summary of ships left to place, largest first.
pub fn render_inventory(inventory: &ShipInventory) -> String {
    (1..=crate::config::MAX_SHIP_SIZE)
        .rev()
        .map(|size| format!("{}x{}", size, inventory.get(size)))
        .collect::<Vec<_>>()
        .join(" ")
}

pub const LEGEND: &str = "Legend: S=Ship  X=Hit  #=Sunk  o=Miss  .=Water";

/// Apply one placement-phase command (`place B7 SIZE [v]`, `remove B7`,
/// `auto`, `ready`) and return the line to show the user.
///
/// Rejected moves, including a failed auto-fill, are reported in the returned
/// text. Only an invalid token is an error.
pub fn apply_placement(game: &mut Game, token: Token, line: &str) -> Result<String, GameError> {
    let (rows, cols) = (game.settings().rows, game.settings().cols);
    let words: Vec<&str> = line.split_whitespace().collect();
    let reply = match words.as_slice() {
        ["place", at, size, rest @ ..] => {
            let (row, col) = match parse_coord(at, rows, cols) {
                Ok(c) => c,
                Err(e) => return Ok(e),
            };
            let Ok(size) = size.parse::<usize>() else {
                return Ok(format!("Invalid size '{}'", size));
            };
            let orientation = Orientation::from_vertical(rest.first() == Some(&"v"));
            match game.place_ship(token, row, col, size, orientation)? {
                Some(handle) => format!("Placed ship {}", handle.id),
                None => "Cannot place a ship there".to_string(),
            }
        }
        ["remove", at] => match parse_coord(at, rows, cols) {
            Ok((row, col)) if game.remove_ship(token, row, col)? => "Ship removed".to_string(),
            Ok(_) => "No ship there".to_string(),
            Err(e) => e,
        },
        ["auto"] => match game.auto_fill(token) {
            Ok(true) => "Fleet placed".to_string(),
            Ok(false) => "Fleet can no longer be changed".to_string(),
            Err(GameError::AutoFillFailed) => GameError::AutoFillFailed.to_string(),
            Err(e) => return Err(e),
        },
        ["ready"] => {
            if game.set_ready(token)? {
                "Ready".to_string()
            } else {
                "Place all ships first".to_string()
            }
        }
        _ => "Unknown command".to_string(),
    };
    Ok(reply)
}
