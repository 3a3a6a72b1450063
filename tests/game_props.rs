use broadside::{Game, GameState, Settings, ShotOutcome, Side};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn started_duel(seed: u64) -> Game {
    let mut game = Game::new(Settings::multi_play(), "alice", SmallRng::seed_from_u64(seed)).unwrap();
    let alice = game.token(Side::A).unwrap();
    let bob = game.join("bob").unwrap();
    for token in [alice, bob] {
        assert!(game.auto_fill(token).unwrap());
        assert!(game.set_ready(token).unwrap());
    }
    game
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn turn_passes_only_on_a_miss(
        seed in any::<u64>(),
        shots in prop::collection::vec((0usize..10, 0usize..10), 1..250)
    ) {
        let mut game = started_duel(seed);
        let mut finished = false;
        for (r, c) in shots {
            let shooter = game.turn();
            let token = game.token(shooter).unwrap();
            let Some(report) = game.fire(token, r, c).unwrap() else {
                prop_assert!(finished);
                continue;
            };
            prop_assert_eq!(report.shooter, shooter);
            if report.outcome == ShotOutcome::Miss {
                prop_assert_eq!(game.turn(), shooter.other());
            } else {
                prop_assert_eq!(game.turn(), shooter);
            }

            let sunk = game.board(shooter.other()).all_ships_killed();
            prop_assert_eq!(game.state() == GameState::Finished, sunk);
            if finished {
                prop_assert!(false, "shot accepted after the game finished");
            }
            if sunk {
                finished = true;
                prop_assert_eq!(game.winner(), Some(shooter));
            }
        }
        // never reverts
        if finished {
            prop_assert_eq!(game.state(), GameState::Finished);
        }
    }

    #[test]
    fn waiting_side_cannot_change_anything(seed in any::<u64>(), row in 0usize..10, col in 0usize..10) {
        let mut game = started_duel(seed);
        let waiting = game.turn().other();
        let token = game.token(waiting).unwrap();
        let before = game.board(waiting.other()).public_view(false);

        prop_assert!(game.fire(token, row, col).unwrap().is_none());
        prop_assert_eq!(game.board(waiting.other()).public_view(false), before);
        prop_assert_eq!(game.turn(), waiting.other());
    }
}
