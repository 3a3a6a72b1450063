use broadside::{
    BotSpeed, Game, GameError, GameMode, GameState, Orientation, Settings, ShipInventory,
    ShotOutcome, Side, Token, MAX_BOARD_DIM,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use uuid::Uuid;

fn duel_settings(fleet: ShipInventory) -> Settings {
    Settings {
        mode: GameMode::MultiPlay,
        ships: fleet,
        ..Settings::default()
    }
}

/// Two-player game where both sides hold the same layout and are ready.
fn started_duel(fleet: ShipInventory, ships: &[(usize, usize, usize, Orientation)], seed: u64) -> (Game, Token, Token) {
    let mut game = Game::new(duel_settings(fleet), "alice", SmallRng::seed_from_u64(seed)).unwrap();
    let alice = game.token(Side::A).unwrap();
    let bob = game.join("bob").unwrap();
    for &token in &[alice, bob] {
        for &(r, c, size, o) in ships {
            assert!(game.place_ship(token, r, c, size, o).unwrap().is_some());
        }
        assert!(game.set_ready(token).unwrap());
    }
    assert_eq!(game.state(), GameState::Started);
    (game, alice, bob)
}

fn token_of(game: &Game, side: Side) -> Token {
    game.token(side).unwrap()
}

#[test]
fn test_single_ship_kill_ends_game() {
    let (mut game, _, _) = started_duel(
        ShipInventory::new(1, 0, 0, 0),
        &[(0, 0, 1, Orientation::Horizontal)],
        1,
    );
    let shooter = game.turn();
    let report = game.fire(token_of(&game, shooter), 0, 0).unwrap().unwrap();

    assert_eq!(report.outcome, ShotOutcome::Killed(1));
    assert_eq!(report.cells[0].state, broadside::ShotState::Killed);
    assert_eq!(report.state, GameState::Finished);
    assert_eq!(report.winner, Some(shooter));
    assert_eq!(game.state(), GameState::Finished);
    assert!(game.is_player_win(token_of(&game, shooter)).unwrap());
    assert!(!game.is_player_win(token_of(&game, shooter.other())).unwrap());

    // nothing is accepted once finished
    for side in [Side::A, Side::B] {
        assert!(game.fire(token_of(&game, side), 5, 5).unwrap().is_none());
    }
    assert_eq!(game.state(), GameState::Finished);
}

#[test]
fn test_miss_passes_turn_and_hit_keeps_it() {
    let (mut game, _, _) = started_duel(
        ShipInventory::new(0, 1, 0, 0),
        &[(0, 0, 2, Orientation::Horizontal)],
        2,
    );
    let first = game.turn();

    let report = game.fire(token_of(&game, first), 5, 5).unwrap().unwrap();
    assert_eq!(report.outcome, ShotOutcome::Miss);
    assert_eq!(report.turn, first.other());
    assert_eq!(game.turn(), first.other());

    let second = first.other();
    let report = game.fire(token_of(&game, second), 0, 0).unwrap().unwrap();
    assert_eq!(report.outcome, ShotOutcome::Hit);
    assert_eq!(game.turn(), second);

    // firing at the same cell again changes nothing, turn included
    let report = game.fire(token_of(&game, second), 0, 0).unwrap().unwrap();
    assert_eq!(report.outcome, ShotOutcome::Repeat);
    assert_eq!(game.turn(), second);

    let report = game.fire(token_of(&game, second), 0, 1).unwrap().unwrap();
    assert_eq!(report.outcome, ShotOutcome::Killed(1));
    assert_eq!(game.state(), GameState::Finished);
    assert_eq!(game.winner(), Some(second));
}

#[test]
fn test_out_of_turn_shot_is_ignored() {
    let (mut game, _, _) = started_duel(
        ShipInventory::new(1, 0, 0, 0),
        &[(0, 0, 1, Orientation::Horizontal)],
        3,
    );
    let waiting = game.turn().other();
    let before = game.board(waiting.other()).public_view(false);

    assert!(game.fire(token_of(&game, waiting), 0, 0).unwrap().is_none());
    assert_eq!(game.board(waiting.other()).public_view(false), before);
    assert_eq!(game.turn(), waiting.other());
    assert_eq!(game.state(), GameState::Started);
}

#[test]
fn test_out_of_bounds_shot_is_ignored() {
    let (mut game, _, _) = started_duel(
        ShipInventory::new(1, 0, 0, 0),
        &[(0, 0, 1, Orientation::Horizontal)],
        4,
    );
    let shooter = game.turn();
    assert!(game.fire(token_of(&game, shooter), 10, 10).unwrap().is_none());
    assert_eq!(game.turn(), shooter);
}

#[test]
fn test_invalid_token_is_rejected() {
    let mut game = Game::new(Settings::default(), "alice", SmallRng::seed_from_u64(5)).unwrap();
    let stranger = Uuid::new_v4();
    assert_eq!(
        game.place_ship(stranger, 0, 0, 1, Orientation::Horizontal).unwrap_err(),
        GameError::InvalidToken(stranger)
    );
    assert_eq!(game.fire(stranger, 0, 0).unwrap_err(), GameError::InvalidToken(stranger));
    assert_eq!(game.set_ready(stranger).unwrap_err(), GameError::InvalidToken(stranger));
    assert!(game.own_view(stranger).is_err());
}

#[test]
fn test_shooting_before_start_is_ignored() {
    let mut game = Game::new(Settings::default(), "alice", SmallRng::seed_from_u64(6)).unwrap();
    let alice = game.token(Side::A).unwrap();
    assert_eq!(game.state(), GameState::Created);
    assert!(game.fire(alice, 0, 0).unwrap().is_none());
    assert!(!game.board(Side::B).cell(0, 0).unwrap().is_shot());
}

#[test]
fn test_ready_requires_complete_fleet() {
    let mut game = Game::new(duel_settings(ShipInventory::new(1, 1, 0, 0)), "alice", SmallRng::seed_from_u64(7)).unwrap();
    let alice = game.token(Side::A).unwrap();
    game.place_ship(alice, 0, 0, 1, Orientation::Horizontal).unwrap().unwrap();
    assert!(!game.set_ready(alice).unwrap());

    game.place_ship(alice, 5, 5, 2, Orientation::Vertical).unwrap().unwrap();
    assert!(game.set_ready(alice).unwrap());
    // second seat still empty
    assert_eq!(game.state(), GameState::Created);

    // layout is frozen once ready
    assert!(!game.remove_ship(alice, 0, 0).unwrap());
    assert!(!game.auto_fill(alice).unwrap());
    assert_eq!(game.board(Side::A).placed_ship_count(), 2);
}

#[test]
fn test_join_rules() {
    let mut single = Game::new(Settings::default(), "alice", SmallRng::seed_from_u64(8)).unwrap();
    assert_eq!(single.join("bob").unwrap_err(), GameError::WrongMode);

    let mut duel = Game::new(Settings::multi_play(), "alice", SmallRng::seed_from_u64(8)).unwrap();
    let bob = duel.join("bob").unwrap();
    assert_eq!(duel.rival_of(bob).unwrap(), duel.token(Side::A));
    assert_eq!(duel.join("carol").unwrap_err(), GameError::GameFull);
    assert_eq!(duel.participant(Side::B).unwrap().nickname(), "bob");
    assert_eq!(duel.nickname(bob).unwrap(), "bob");
}

#[test]
fn test_single_play_seats_a_ready_computer() {
    let mut game = Game::new(Settings::default(), "alice", SmallRng::seed_from_u64(9)).unwrap();
    let bot = game.participant(Side::B).unwrap();
    assert_eq!(bot.nickname(), "Computer");
    assert!(bot.is_ready());
    assert!(bot.has_autopilot());
    assert!(game.board(Side::B).is_complete());

    let alice = game.token(Side::A).unwrap();
    assert!(game.auto_fill(alice).unwrap());
    assert!(game.set_ready(alice).unwrap());
    assert_eq!(game.state(), GameState::Started);
}

#[test]
fn test_host_moves_first_about_two_times_in_three() {
    let mut host_first = 0;
    let games = 300;
    for seed in 0..games {
        let mut game = Game::new(Settings::multi_play(), "alice", SmallRng::seed_from_u64(seed)).unwrap();
        let alice = game.token(Side::A).unwrap();
        let bob = game.join("bob").unwrap();
        for token in [alice, bob] {
            game.auto_fill(token).unwrap();
            game.set_ready(token).unwrap();
        }
        if game.turn() == Side::A {
            host_first += 1;
        }
    }
    assert!((150..250).contains(&host_first), "host opened {} of {}", host_first, games);
}

#[test]
fn test_player_update_hides_rival_ships() {
    let mut game = Game::new(Settings::default(), "alice", SmallRng::seed_from_u64(10)).unwrap();
    let alice = game.token(Side::A).unwrap();
    game.auto_fill(alice).unwrap();

    let update = game.player_update(alice).unwrap();
    assert_eq!(update.state, GameState::Created);
    assert_eq!(update.player.nickname, "alice");
    assert_eq!(update.player.board.visible_segments(), 20);
    assert!(update.player.ships.is_empty());
    assert!(!update.player.is_ready);

    let rival = update.rival.unwrap();
    assert_eq!(rival.nickname, "Computer");
    assert_eq!(rival.board.visible_segments(), 0);
    assert!(rival.is_ready);
    assert!(!update.is_player_turn);
    assert!(!update.is_player_win);

    assert_eq!(game.rival_view(alice).unwrap().visible_segments(), 0);
    assert_eq!(game.own_view(alice).unwrap().visible_segments(), 20);
}

#[test]
fn test_invalid_settings_are_rejected() {
    let settings = Settings {
        rows: 3,
        cols: 3,
        ..Settings::default()
    };
    assert!(matches!(
        Game::new(settings, "alice", SmallRng::seed_from_u64(0)),
        Err(GameError::InvalidSettings(_))
    ));
}

#[test]
fn test_oversized_or_overflowing_settings_are_rejected() {
    let huge = [
        Settings {
            rows: usize::MAX,
            cols: 2,
            ..Settings::default()
        },
        Settings {
            rows: 1_000_000,
            cols: 1_000_000,
            ..Settings::default()
        },
        Settings {
            cols: MAX_BOARD_DIM + 1,
            ..Settings::default()
        },
        Settings {
            ships: ShipInventory::new(u32::MAX, 1, 0, 0),
            ..Settings::default()
        },
        Settings {
            ships: ShipInventory::new(u32::MAX, u32::MAX, u32::MAX, u32::MAX),
            ..Settings::default()
        },
    ];
    for settings in huge {
        assert!(matches!(
            Game::new(settings, "alice", SmallRng::seed_from_u64(0)),
            Err(GameError::InvalidSettings(_))
        ));
    }

    let widest = Settings {
        rows: MAX_BOARD_DIM,
        cols: MAX_BOARD_DIM,
        ..Settings::default()
    };
    assert!(widest.validate().is_ok());
    assert_eq!(ShipInventory::new(u32::MAX, 0, 0, 1).total_cells(), u64::from(u32::MAX) + 4);
}

#[test]
fn test_bot_speed_defaults_to_medium() {
    assert_eq!(BotSpeed::default(), BotSpeed::Medium);
    assert_eq!(Settings::default().bot_speed, BotSpeed::Medium);
}
