//! Registry of running games and routing of inbound commands.

use std::collections::HashMap;

use log::{info, warn};
use uuid::Uuid;

use crate::{
    common::GameError,
    config::Settings,
    domain::ShotReport,
    game::{Game, GameState, Side},
    player::Token,
    protocol::{Command, Reply},
    ship::Orientation,
};

#[derive(Default)]
pub struct Lobby {
    games: HashMap<Uuid, Game>,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn game(&self, id: Uuid) -> Result<&Game, GameError> {
        self.games.get(&id).ok_or(GameError::GameNotFound(id))
    }

    pub fn game_mut(&mut self, id: Uuid) -> Result<&mut Game, GameError> {
        self.games.get_mut(&id).ok_or(GameError::GameNotFound(id))
    }

    /// Drop finished games. Returns how many were removed.
    pub fn clean_finished(&mut self) -> usize {
        let before = self.games.len();
        self.games.retain(|_, game| game.state() != GameState::Finished);
        before - self.games.len()
    }

    /// Register a new game hosted by `nickname`.
    pub fn create_game(&mut self, settings: Settings, nickname: &str) -> Result<(Uuid, Token), GameError> {
        let removed = self.clean_finished();
        if removed > 0 {
            info!("cleaned up {} finished games", removed);
        }
        let game = Game::from_settings(settings, nickname)?;
        let id = game.id();
        let token = game
            .token(Side::A)
            .ok_or(GameError::GameNotFound(id))?;
        self.games.insert(id, game);
        Ok((id, token))
    }

    pub fn join_game(&mut self, id: Uuid, nickname: &str) -> Result<Token, GameError> {
        self.game_mut(id)?.join(nickname)
    }

    /// Apply `command` and build the reply. Failures become [`Reply::Error`].
    pub async fn dispatch(&mut self, command: Command) -> Reply {
        match self.try_dispatch(command).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("command rejected: {}", e);
                Reply::Error {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn try_dispatch(&mut self, command: Command) -> anyhow::Result<Reply> {
        let reply = match command {
            Command::CreateGame { nickname, settings } => {
                let (game_id, token) = self.create_game(settings, &nickname)?;
                Reply::GameCreated {
                    game_id,
                    token,
                    state: GameState::Created,
                }
            }
            Command::JoinGame { game_id, nickname } => {
                let token = self.join_game(game_id, &nickname)?;
                let game = self.game(game_id)?;
                let rival = game
                    .participant(Side::A)
                    .map(|p| p.nickname().to_string())
                    .unwrap_or_default();
                Reply::GameJoined {
                    game_id,
                    token,
                    rival,
                }
            }
            Command::AutoFill { game_id, token } => {
                Reply::Accepted(self.game_mut(game_id)?.auto_fill(token)?)
            }
            Command::AddShip {
                game_id,
                token,
                row,
                col,
                size,
                vertical,
            } => {
                let placed = self.game_mut(game_id)?.place_ship(
                    token,
                    row,
                    col,
                    size,
                    Orientation::from_vertical(vertical),
                )?;
                Reply::Accepted(placed.is_some())
            }
            Command::DeleteShip {
                game_id,
                token,
                row,
                col,
            } => Reply::Accepted(self.game_mut(game_id)?.remove_ship(token, row, col)?),
            Command::PlayerReady { game_id, token } => {
                let game = self.game_mut(game_id)?;
                if !game.set_ready(token)? {
                    return Ok(Reply::Accepted(false));
                }
                if game.state() != GameState::Started {
                    return Ok(Reply::Accepted(true));
                }
                // The computer may hold the opening move.
                let mut bot: Vec<ShotReport> = Vec::new();
                game.drive_bot(&mut bot).await?;
                Reply::Started { bot }
            }
            Command::TakeShot {
                game_id,
                token,
                row,
                col,
            } => {
                let game = self.game_mut(game_id)?;
                let player = game.fire(token, row, col)?;
                let mut bot: Vec<ShotReport> = Vec::new();
                if player.is_some() {
                    game.drive_bot(&mut bot).await?;
                }
                Reply::Shots { player, bot }
            }
            Command::GameUpdate { game_id, token } => {
                Reply::Update(Box::new(self.game(game_id)?.player_update(token)?))
            }
        };
        Ok(reply)
    }
}
