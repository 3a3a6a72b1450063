// Search-and-destroy targeting for the computer opponent.
// Random probing until a hit, then work the hit ship until it sinks.

use std::collections::HashSet;

use rand::Rng;

use crate::board::{Board, ShotOutcome};
use crate::grid::Coord;

/// Proposals tried before falling back to a scan for a never-shot cell.
pub const MAX_PICK_ATTEMPTS: usize = 20;

#[derive(Debug, Clone, Default)]
pub struct TargetingAgent {
    active_target: Option<Coord>,
    history: HashSet<Coord>,
    god_mode: bool,
}

impl TargetingAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agent that may read live ship positions when it has no target.
    pub fn with_god_mode(god_mode: bool) -> Self {
        Self {
            god_mode,
            ..Self::default()
        }
    }

    pub fn god_mode(&self) -> bool {
        self.god_mode
    }

    pub fn set_god_mode(&mut self, god_mode: bool) {
        self.god_mode = god_mode;
    }

    /// Last hit still being worked, if any.
    pub fn active_target(&self) -> Option<Coord> {
        self.active_target
    }

    pub fn set_active_target(&mut self, coord: Coord) {
        self.active_target = Some(coord);
    }

    /// Every coordinate this agent has fired upon.
    pub fn history(&self) -> &HashSet<Coord> {
        &self.history
    }

    pub fn has_fired_at(&self, coord: Coord) -> bool {
        self.history.contains(&coord)
    }

    /// Pick and record the next coordinate to fire at on `rival`.
    ///
    /// Returns `None` only when every cell has already been fired upon.
    pub fn next_target<R: Rng + ?Sized>(&mut self, rival: &Board, rng: &mut R) -> Option<Coord> {
        for _ in 0..MAX_PICK_ATTEMPTS {
            let coord = self.propose(rival, rng);
            if self.history.insert(coord) {
                return Some(coord);
            }
        }
        let coord = self.random_unshot(rival, rng)?;
        self.history.insert(coord);
        Some(coord)
    }

    /// Feed back the result of a shot. Only a hit moves the active target.
    pub fn observe(&mut self, coord: Coord, outcome: ShotOutcome) {
        if outcome.is_hit() {
            self.active_target = Some(coord);
        }
    }

    fn propose<R: Rng + ?Sized>(&mut self, rival: &Board, rng: &mut R) -> Coord {
        if let Some((row, col)) = self.active_target {
            if rival.is_ship_killed(row, col) {
                self.active_target = None;
            } else if let Some(coord) = rival
                .possible_adjacent_targets(row, col)
                .iter()
                .map(|cell| cell.coord())
                .find(|coord| !self.history.contains(coord))
            {
                return coord;
            }
        }

        if self.god_mode {
            if let Some(coord) = self.reveal(rival) {
                return coord;
            }
        }
        random_coord(rival, rng)
    }

    /// First unshot, unvisited segment of the lowest-id live ship.
    fn reveal(&self, rival: &Board) -> Option<Coord> {
        rival
            .ships()
            .filter(|ship| !ship.is_killed())
            .flat_map(|ship| ship.cells().iter().copied())
            .find(|&(r, c)| {
                !self.history.contains(&(r, c))
                    && rival.cell(r, c).map_or(false, |cell| !cell.is_shot())
            })
    }

    /// Uniform choice among cells neither fired upon nor already shot.
    fn random_unshot<R: Rng + ?Sized>(&self, rival: &Board, rng: &mut R) -> Option<Coord> {
        let open: Vec<Coord> = rival
            .grid()
            .cells()
            .filter(|cell| !cell.is_shot() && !self.history.contains(&cell.coord()))
            .map(|cell| cell.coord())
            .collect();
        if open.is_empty() {
            return None;
        }
        Some(open[rng.random_range(0..open.len())])
    }
}

fn random_coord<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Coord {
    (
        rng.random_range(0..board.rows()),
        rng.random_range(0..board.cols()),
    )
}
