//! Participants: identity, readiness and win flag, shared by humans and bots.

use core::time::Duration;

use rand::rngs::SmallRng;
use uuid::Uuid;

use crate::board::{Board, ShotOutcome};
use crate::grid::Coord;

/// Opaque per-participant access token.
pub type Token = Uuid;

/// Interface implemented by every participant type.
///
/// A game only looks at the concrete kind through [`Participant::autopilot`],
/// which bots use to expose their shot loop.
pub trait Participant: Send {
    fn token(&self) -> Token;

    fn nickname(&self) -> &str;

    fn set_nickname(&mut self, nickname: String);

    fn is_ready(&self) -> bool;

    fn set_ready(&mut self, ready: bool);

    fn is_winner(&self) -> bool;

    fn set_winner(&mut self, win: bool);

    /// Whether [`Participant::autopilot`] yields a shot loop.
    fn has_autopilot(&self) -> bool {
        false
    }

    /// Autonomous shot capability; `None` for participants driven from outside.
    fn autopilot(&mut self) -> Option<&mut dyn Autopilot> {
        None
    }
}

/// A participant that chooses its own shots.
pub trait Autopilot: Send {
    /// Choose the next coordinate to fire at on `rival`.
    fn select_target(&mut self, rival: &Board, rng: &mut SmallRng) -> Option<Coord>;

    /// Inform the autopilot of the result of its last shot.
    fn handle_shot_result(&mut self, _coord: Coord, _outcome: ShotOutcome) {}

    /// Pause before each shot.
    fn delay(&self) -> Duration;
}

/// Identity and flags common to all participants.
#[derive(Debug, Clone)]
pub struct Profile {
    pub(crate) token: Token,
    pub(crate) nickname: String,
    pub(crate) ready: bool,
    pub(crate) winner: bool,
}

impl Profile {
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            token: Uuid::new_v4(),
            nickname: nickname.into(),
            ready: false,
            winner: false,
        }
    }
}

/// A participant whose moves arrive through the session layer.
#[derive(Debug, Clone)]
pub struct HumanPlayer {
    profile: Profile,
}

impl HumanPlayer {
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            profile: Profile::new(nickname),
        }
    }
}

macro_rules! impl_profile_accessors {
    () => {
        fn token(&self) -> $crate::player::Token {
            self.profile.token
        }

        fn nickname(&self) -> &str {
            &self.profile.nickname
        }

        fn set_nickname(&mut self, nickname: String) {
            self.profile.nickname = nickname;
        }

        fn is_ready(&self) -> bool {
            self.profile.ready
        }

        fn set_ready(&mut self, ready: bool) {
            self.profile.ready = ready;
        }

        fn is_winner(&self) -> bool {
            self.profile.winner
        }

        fn set_winner(&mut self, win: bool) {
            self.profile.winner = win;
        }
    };
}
pub(crate) use impl_profile_accessors;

impl Participant for HumanPlayer {
    impl_profile_accessors!();
}
