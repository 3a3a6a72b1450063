//! Self-play harness: the host seat is driven by its own targeting agent
//! against the built-in computer player.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::{
    ai::TargetingAgent,
    config::{GameMode, Settings},
    game::{rng_from_seed, Game, GameState, Side},
};

/// Result of one simulated game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimSummary {
    pub winner: Option<Side>,
    pub state: GameState,
    pub shots_a: usize,
    pub shots_b: usize,
}

/// Play a full single-player game without delays.
///
/// The game is seeded from `seed`; the host agent uses `seed + 1`.
pub fn simulate(mut settings: Settings, seed: u64) -> anyhow::Result<SimSummary> {
    settings.mode = GameMode::SinglePlay;
    settings.seed = Some(seed);
    let mut game = Game::new(settings, "Simulator", rng_from_seed(Some(seed)))?;
    let token = game
        .token(Side::A)
        .ok_or_else(|| anyhow::anyhow!("host seat is empty"))?;
    game.auto_fill(token)?;
    game.set_ready(token)?;

    let mut agent = TargetingAgent::new();
    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));
    let (mut shots_a, mut shots_b) = (0, 0);
    // Each shot is at a fresh cell, so both boards are exhausted by this point.
    let max_shots = 2 * game.board(Side::A).rows() * game.board(Side::A).cols();

    while game.state() == GameState::Started && shots_a + shots_b < max_shots {
        if game.bot_turn_pending() {
            if game.bot_step().is_none() {
                break;
            }
            shots_b += 1;
            continue;
        }
        let Some((row, col)) = agent.next_target(game.board(Side::B), &mut rng) else {
            break;
        };
        let Some(report) = game.fire(token, row, col)? else {
            break;
        };
        agent.observe((row, col), report.outcome);
        shots_a += 1;
    }

    Ok(SimSummary {
        winner: game.winner(),
        state: game.state(),
        shots_a,
        shots_b,
    })
}
