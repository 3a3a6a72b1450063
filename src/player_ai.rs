use core::time::Duration;

use rand::rngs::SmallRng;

use crate::{
    ai::TargetingAgent,
    board::{Board, ShotOutcome},
    config::BotSpeed,
    grid::Coord,
    player::{impl_profile_accessors, Autopilot, Participant, Profile},
};

pub const BOT_NICKNAME: &str = "Computer";

/// Computer opponent using search-and-destroy targeting.
pub struct BotPlayer {
    profile: Profile,
    agent: TargetingAgent,
    speed: BotSpeed,
}

impl BotPlayer {
    pub fn new(speed: BotSpeed, god_mode: bool) -> Self {
        Self {
            profile: Profile::new(BOT_NICKNAME),
            agent: TargetingAgent::with_god_mode(god_mode),
            speed,
        }
    }

    pub fn agent(&self) -> &TargetingAgent {
        &self.agent
    }

    pub fn speed(&self) -> BotSpeed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: BotSpeed) {
        self.speed = speed;
    }

    pub fn set_god_mode(&mut self, god_mode: bool) {
        self.agent.set_god_mode(god_mode);
    }
}

impl Participant for BotPlayer {
    impl_profile_accessors!();

    fn has_autopilot(&self) -> bool {
        true
    }

    fn autopilot(&mut self) -> Option<&mut dyn Autopilot> {
        Some(self)
    }
}

impl Autopilot for BotPlayer {
    fn select_target(&mut self, rival: &Board, rng: &mut SmallRng) -> Option<Coord> {
        self.agent.next_target(rival, rng)
    }

    fn handle_shot_result(&mut self, coord: Coord, outcome: ShotOutcome) {
        self.agent.observe(coord, outcome);
    }

    fn delay(&self) -> Duration {
        self.speed.delay()
    }
}
