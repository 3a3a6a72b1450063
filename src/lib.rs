mod ai;
mod board;
mod cell;
mod common;
mod config;
pub mod domain;
mod game;
mod grid;
mod lobby;
mod logging;
pub mod notify;
mod player;
mod player_ai;
pub mod protocol;
mod ship;
mod sim;
pub mod ui;

pub use ai::*;
pub use board::*;
pub use cell::*;
pub use common::*;
pub use config::*;
pub use domain::{BoardView, CellView, PlayerUpdate, SeatUpdate, ShotReport};
pub use game::*;
pub use grid::*;
pub use lobby::*;
pub use logging::{init_logging, level_from, LOG_ENV};
pub use notify::ShotListener;
pub use player::{Autopilot, HumanPlayer, Participant, Profile, Token};
pub use player_ai::*;
pub use protocol::{decode_frame, encode_frame, Command, Reply, MAX_FRAME_LEN};
pub use ship::*;
pub use sim::*;
