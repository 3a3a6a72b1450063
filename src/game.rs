//! Match state: two seats, their boards, the turn state machine and the
//! computer player's shot loop.

use core::time::Duration;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    board::{Board, ShipHandle, ShotOutcome},
    common::GameError,
    config::{GameMode, Settings, ShipInventory},
    domain::{BoardView, CellView, PlayerUpdate, SeatUpdate, ShotReport},
    notify::ShotListener,
    player::{HumanPlayer, Participant, Token},
    player_ai::BotPlayer,
    ship::Orientation,
};

/// Lifecycle of a game. Only ever advances `Created -> Started -> Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameState {
    /// Boards are being populated.
    Created,
    /// Shots are being exchanged.
    Started,
    /// One fleet is sunk.
    Finished,
}

/// One of the two seats of a game. `A` is the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

struct Seat {
    participant: Option<Box<dyn Participant>>,
    board: Board,
}

impl Seat {
    fn new(participant: Option<Box<dyn Participant>>, settings: &Settings) -> Self {
        Self {
            participant,
            board: Board::new(settings.rows, settings.cols, settings.ships),
        }
    }

    fn is_ready(&self) -> bool {
        self.participant.as_ref().map_or(false, |p| p.is_ready())
    }
}

/// Build the game RNG from an optional fixed seed.
pub fn rng_from_seed(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

pub struct Game {
    id: Uuid,
    settings: Settings,
    seats: [Seat; 2],
    state: GameState,
    turn: Side,
    rng: SmallRng,
}

impl Game {
    /// Create a game hosted by `host_nickname`.
    ///
    /// In single-player mode the second seat is taken by a computer player
    /// whose fleet is placed immediately.
    pub fn new(settings: Settings, host_nickname: &str, rng: SmallRng) -> Result<Self, GameError> {
        let host: Box<dyn Participant> = Box::new(HumanPlayer::new(host_nickname));
        let guest: Option<Box<dyn Participant>> = match settings.mode {
            GameMode::SinglePlay => Some(Box::new(BotPlayer::new(settings.bot_speed, settings.god_mode))),
            GameMode::MultiPlay => None,
        };
        Self::with_participants(settings, host, guest, rng)
    }

    /// Create a game seeded from [`Settings::seed`].
    pub fn from_settings(settings: Settings, host_nickname: &str) -> Result<Self, GameError> {
        let rng = rng_from_seed(settings.seed);
        Self::new(settings, host_nickname, rng)
    }

    /// Create a game from explicit participants. Autonomous participants get
    /// a random fleet and are marked ready.
    pub fn with_participants(
        settings: Settings,
        host: Box<dyn Participant>,
        guest: Option<Box<dyn Participant>>,
        rng: SmallRng,
    ) -> Result<Self, GameError> {
        settings.validate()?;
        let seats = [Seat::new(Some(host), &settings), Seat::new(None, &settings)];
        let mut game = Game {
            id: Uuid::new_v4(),
            settings,
            seats,
            state: GameState::Created,
            turn: Side::A,
            rng,
        };
        if let Some(guest) = guest {
            game.seat_guest(guest)?;
        }
        info!("created game {} ({:?})", game.id, game.settings.mode);
        Ok(game)
    }

    fn seat_guest(&mut self, mut guest: Box<dyn Participant>) -> Result<Token, GameError> {
        let token = guest.token();
        let seat = &mut self.seats[Side::B.index()];
        if guest.has_autopilot() {
            seat.board.auto_fill(&mut self.rng)?;
            guest.set_ready(true);
        }
        seat.participant = Some(guest);
        Ok(token)
    }

    /// Seat a second human in a two-player game.
    pub fn join(&mut self, nickname: &str) -> Result<Token, GameError> {
        if self.settings.mode != GameMode::MultiPlay {
            return Err(GameError::WrongMode);
        }
        if self.seats[Side::B.index()].participant.is_some() {
            return Err(GameError::GameFull);
        }
        let token = self.seat_guest(Box::new(HumanPlayer::new(nickname)))?;
        info!("{} joined game {}", nickname, self.id);
        Ok(token)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Side whose shot is expected. Meaningful only once started.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn winner(&self) -> Option<Side> {
        [Side::A, Side::B]
            .into_iter()
            .find(|&side| self.participant(side).map_or(false, |p| p.is_winner()))
    }

    pub fn board(&self, side: Side) -> &Board {
        &self.seats[side.index()].board
    }

    pub fn participant(&self, side: Side) -> Option<&dyn Participant> {
        self.seats[side.index()].participant.as_deref()
    }

    fn participant_mut(&mut self, side: Side) -> Option<&mut Box<dyn Participant>> {
        self.seats[side.index()].participant.as_mut()
    }

    pub fn token(&self, side: Side) -> Option<Token> {
        self.participant(side).map(|p| p.token())
    }

    /// Resolve an access token to its seat.
    pub fn side_of(&self, token: Token) -> Result<Side, GameError> {
        [Side::A, Side::B]
            .into_iter()
            .find(|&side| self.token(side) == Some(token))
            .ok_or_else(|| {
                warn!("game {}: rejected unknown token {}", self.id, token);
                GameError::InvalidToken(token)
            })
    }

    pub fn rival_of(&self, token: Token) -> Result<Option<Token>, GameError> {
        let side = self.side_of(token)?;
        Ok(self.token(side.other()))
    }

    pub fn nickname(&self, token: Token) -> Result<&str, GameError> {
        let side = self.side_of(token)?;
        self.participant(side)
            .map(|p| p.nickname())
            .ok_or(GameError::InvalidToken(token))
    }

    fn is_placing(&self, side: Side) -> bool {
        self.state == GameState::Created && !self.seats[side.index()].is_ready()
    }

    /// Place a ship on the caller's board. `Ok(None)` is a rejected attempt.
    pub fn place_ship(
        &mut self,
        token: Token,
        row: usize,
        col: usize,
        size: usize,
        orientation: Orientation,
    ) -> Result<Option<ShipHandle>, GameError> {
        let side = self.side_of(token)?;
        if !self.is_placing(side) {
            return Ok(None);
        }
        Ok(self.seats[side.index()]
            .board
            .place_ship(row, col, size, orientation))
    }

    /// Lift the ship covering `(row, col)` off the caller's board.
    pub fn remove_ship(&mut self, token: Token, row: usize, col: usize) -> Result<bool, GameError> {
        let side = self.side_of(token)?;
        if !self.is_placing(side) {
            return Ok(false);
        }
        Ok(self.seats[side.index()].board.remove_ship(row, col))
    }

    /// Replace the caller's layout with a random complete fleet.
    pub fn auto_fill(&mut self, token: Token) -> Result<bool, GameError> {
        let side = self.side_of(token)?;
        if !self.is_placing(side) {
            return Ok(false);
        }
        self.seats[side.index()].board.auto_fill(&mut self.rng)?;
        Ok(true)
    }

    /// Declare the caller ready. Succeeds only once the whole fleet is placed;
    /// the game starts when both seats are ready.
    pub fn set_ready(&mut self, token: Token) -> Result<bool, GameError> {
        let side = self.side_of(token)?;
        let seat = &mut self.seats[side.index()];
        if self.state != GameState::Created || !seat.board.is_complete() {
            return Ok(false);
        }
        if let Some(p) = seat.participant.as_mut() {
            p.set_ready(true);
        }
        self.try_start();
        Ok(true)
    }

    fn try_start(&mut self) {
        if !self.seats.iter().all(Seat::is_ready) {
            return;
        }
        // The host opens two games out of three.
        self.turn = if self.rng.random_range(0..3) == 0 {
            Side::B
        } else {
            Side::A
        };
        self.state = GameState::Started;
        info!("game {} started, {:?} to move", self.id, self.turn);
    }

    /// Fire at the rival board on behalf of `token`.
    ///
    /// `Ok(None)` when it is not the caller's turn or the game is not running;
    /// nothing changes in that case.
    pub fn fire(&mut self, token: Token, row: usize, col: usize) -> Result<Option<ShotReport>, GameError> {
        let side = self.side_of(token)?;
        if self.state != GameState::Started || self.turn != side {
            debug!("game {}: ignored out-of-turn shot from {:?}", self.id, side);
            return Ok(None);
        }
        Ok(self.resolve_shot(side, row, col))
    }

    fn resolve_shot(&mut self, shooter: Side, row: usize, col: usize) -> Option<ShotReport> {
        let target = shooter.other();
        let shot = self.seats[target.index()].board.fire_at(row, col)?;

        if shot.outcome == ShotOutcome::Miss {
            self.turn = target;
        }
        if shot.outcome.is_hit() && self.seats[target.index()].board.all_ships_killed() {
            self.state = GameState::Finished;
            if let Some(p) = self.participant_mut(shooter) {
                p.set_winner(true);
            }
            info!("game {} finished, {:?} wins", self.id, shooter);
        }

        Some(ShotReport {
            shooter,
            row,
            col,
            outcome: shot.outcome,
            cells: shot.cells.iter().map(CellView::from).collect(),
            state: self.state,
            turn: self.turn,
            winner: self.winner(),
        })
    }

    /// Whether the computer player holds the turn of a running game.
    pub fn bot_turn_pending(&self) -> bool {
        self.state == GameState::Started
            && self.participant(self.turn).map_or(false, |p| p.has_autopilot())
    }

    fn bot_delay(&mut self) -> Option<Duration> {
        if !self.bot_turn_pending() {
            return None;
        }
        let turn = self.turn;
        let pilot = self.participant_mut(turn)?.autopilot()?;
        Some(pilot.delay())
    }

    /// Let the computer player take a single shot, without waiting.
    ///
    /// Returns `None` when it is not the bot's turn or it has nothing left to
    /// fire at.
    pub fn bot_step(&mut self) -> Option<ShotReport> {
        if !self.bot_turn_pending() {
            return None;
        }
        let shooter = self.turn;
        let (row, col) = {
            let [a, b] = &mut self.seats;
            let (own, rival) = match shooter {
                Side::A => (a, b),
                Side::B => (b, a),
            };
            let pilot = own.participant.as_mut()?.autopilot()?;
            pilot.select_target(&rival.board, &mut self.rng)?
        };

        let report = self.resolve_shot(shooter, row, col)?;
        if let Some(pilot) = self
            .participant_mut(shooter)
            .and_then(|p| p.autopilot())
        {
            pilot.handle_shot_result((row, col), report.outcome);
        }
        debug!("game {}: bot fired at ({}, {}): {:?}", self.id, row, col, report.outcome);
        Some(report)
    }

    /// Drive the computer player until it misses, wins or runs out of cells,
    /// pausing before each shot. Returns the number of shots taken.
    pub async fn drive_bot<L>(&mut self, listener: &mut L) -> anyhow::Result<usize>
    where
        L: ShotListener + ?Sized,
    {
        let mut shots = 0;
        while let Some(delay) = self.bot_delay() {
            tokio::time::sleep(delay).await;
            let Some(report) = self.bot_step() else {
                break;
            };
            listener.on_shot(&report).await?;
            shots += 1;
        }
        Ok(shots)
    }

    /// The caller's own board with ships visible.
    pub fn own_view(&self, token: Token) -> Result<BoardView, GameError> {
        let side = self.side_of(token)?;
        Ok(self.board(side).public_view(false))
    }

    /// The rival's board with unshot ships hidden.
    pub fn rival_view(&self, token: Token) -> Result<BoardView, GameError> {
        let side = self.side_of(token)?;
        Ok(self.board(side.other()).public_view(true))
    }

    /// Ships the caller still has to place.
    pub fn inventory(&self, token: Token) -> Result<ShipInventory, GameError> {
        let side = self.side_of(token)?;
        Ok(self.board(side).inventory())
    }

    pub fn is_player_turn(&self, token: Token) -> Result<bool, GameError> {
        let side = self.side_of(token)?;
        Ok(self.state == GameState::Started && self.turn == side)
    }

    pub fn is_player_win(&self, token: Token) -> Result<bool, GameError> {
        let side = self.side_of(token)?;
        Ok(self.participant(side).map_or(false, |p| p.is_winner()))
    }

    fn seat_update(&self, side: Side, hide_ships: bool) -> Option<SeatUpdate> {
        let participant = self.participant(side)?;
        let board = self.board(side);
        Some(SeatUpdate {
            nickname: participant.nickname().to_string(),
            board: board.public_view(hide_ships),
            ships: board.inventory(),
            is_ready: participant.is_ready(),
        })
    }

    /// Full redraw snapshot for the caller.
    pub fn player_update(&self, token: Token) -> Result<PlayerUpdate, GameError> {
        let side = self.side_of(token)?;
        let player = self
            .seat_update(side, false)
            .ok_or(GameError::InvalidToken(token))?;
        Ok(PlayerUpdate {
            state: self.state,
            settings: self.settings.clone(),
            player,
            rival: self.seat_update(side.other(), true),
            is_player_turn: self.is_player_turn(token)?,
            is_player_win: self.is_player_win(token)?,
        })
    }
}
