use std::collections::HashSet;

use broadside::{
    Autopilot, Board, BotPlayer, BotSpeed, Orientation, Participant, ShipInventory, ShotOutcome,
    TargetingAgent,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_agent_never_repeats_and_exhausts_board() {
    let board = Board::new(3, 3, ShipInventory::new(1, 0, 0, 0));
    let mut agent = TargetingAgent::new();
    let mut rng = SmallRng::seed_from_u64(11);

    let mut seen = HashSet::new();
    for _ in 0..9 {
        let coord = agent.next_target(&board, &mut rng).unwrap();
        assert!(coord.0 < 3 && coord.1 < 3);
        assert!(seen.insert(coord), "repeated {:?}", coord);
    }
    assert_eq!(agent.history().len(), 9);
    assert!(agent.next_target(&board, &mut rng).is_none());
}

#[test]
fn test_agent_follows_a_hit_until_the_ship_sinks() {
    let mut board = Board::new(10, 10, ShipInventory::new(0, 0, 1, 0));
    board.place_ship(4, 4, 3, Orientation::Horizontal).unwrap();
    let mut agent = TargetingAgent::new();
    let mut rng = SmallRng::seed_from_u64(3);

    let outcome = board.fire_at(4, 5).unwrap().outcome;
    assert_eq!(outcome, ShotOutcome::Hit);
    agent.observe((4, 5), outcome);
    assert_eq!(agent.active_target(), Some((4, 5)));

    let next = agent.next_target(&board, &mut rng).unwrap();
    assert_eq!(next, (4, 4));
    let outcome = board.fire_at(next.0, next.1).unwrap().outcome;
    agent.observe(next, outcome);
    assert_eq!(agent.active_target(), Some((4, 4)));

    let next = agent.next_target(&board, &mut rng).unwrap();
    assert_eq!(next, (4, 6));
    let outcome = board.fire_at(next.0, next.1).unwrap().outcome;
    assert_eq!(outcome, ShotOutcome::Killed(1));
    agent.observe(next, outcome);

    // the sunk ship is dropped on the next pick
    assert!(agent.next_target(&board, &mut rng).is_some());
    assert!(agent.active_target().is_none());
    assert!(agent.has_fired_at((4, 6)));
}

#[test]
fn test_pick_after_a_kill_returns_to_random_search() {
    let mut neighbour_picks = 0;
    let seeds = 100;
    for seed in 0..seeds {
        let mut board = Board::new(10, 10, ShipInventory::new(1, 0, 0, 0));
        board.place_ship(4, 4, 1, Orientation::Horizontal).unwrap();
        let mut rng = SmallRng::seed_from_u64(seed);

        // reveal the lone segment and sink it, then hunt blind
        let mut agent = TargetingAgent::with_god_mode(true);
        let first = agent.next_target(&board, &mut rng).unwrap();
        assert_eq!(first, (4, 4));
        let outcome = board.fire_at(4, 4).unwrap().outcome;
        assert_eq!(outcome, ShotOutcome::Killed(1));
        agent.observe(first, outcome);
        agent.set_god_mode(false);
        assert_eq!(agent.active_target(), Some((4, 4)));

        let pick = agent.next_target(&board, &mut rng).unwrap();
        assert!(agent.active_target().is_none());
        assert_ne!(pick, (4, 4));
        assert!(!board.cell(pick.0, pick.1).unwrap().is_shot());
        if board.grid().orthogonal(4, 4).any(|n| n == pick) {
            neighbour_picks += 1;
        }
    }
    // uniform choice lands on one of the four neighbours about 4% of the time
    assert!(neighbour_picks < 20, "{} of {} picks landed beside the dead ship", neighbour_picks, seeds);
}

#[test]
fn test_miss_keeps_active_target() {
    let mut agent = TargetingAgent::new();
    agent.observe((2, 2), ShotOutcome::Hit);
    agent.observe((2, 3), ShotOutcome::Miss);
    agent.observe((2, 3), ShotOutcome::Repeat);
    assert_eq!(agent.active_target(), Some((2, 2)));
}

#[test]
fn test_stale_active_target_falls_back_to_water_neighbours() {
    // a hit on water is never produced by the board, but an injected target
    // still has to yield legal shots
    let board = Board::new(10, 10, ShipInventory::new(1, 0, 0, 0));
    let mut agent = TargetingAgent::new();
    agent.set_active_target((0, 0));
    let mut rng = SmallRng::seed_from_u64(5);

    assert_eq!(agent.next_target(&board, &mut rng), Some((0, 1)));
    assert_eq!(agent.next_target(&board, &mut rng), Some((1, 0)));
}

#[test]
fn test_god_mode_goes_straight_for_ships() {
    let mut board = Board::new(10, 10, ShipInventory::new(1, 1, 0, 0));
    board.place_ship(5, 5, 1, Orientation::Horizontal).unwrap();
    board.place_ship(0, 8, 2, Orientation::Vertical).unwrap();
    let mut agent = TargetingAgent::with_god_mode(true);
    let mut rng = SmallRng::seed_from_u64(9);

    let mut shots = Vec::new();
    while !board.all_ships_killed() {
        let coord = agent.next_target(&board, &mut rng).unwrap();
        let outcome = board.fire_at(coord.0, coord.1).unwrap().outcome;
        assert!(outcome.is_hit(), "god mode missed at {:?}", coord);
        agent.observe(coord, outcome);
        shots.push(coord);
    }
    assert_eq!(shots[0], (5, 5));
    assert_eq!(shots.len(), 3);
}

#[test]
fn test_bot_player_is_an_autopilot() {
    let mut bot = BotPlayer::new(BotSpeed::High, false);
    assert_eq!(bot.nickname(), "Computer");
    assert!(bot.has_autopilot());
    assert_eq!(bot.speed(), BotSpeed::High);
    bot.set_god_mode(true);
    assert!(bot.agent().god_mode());

    let mut board = Board::new(10, 10, ShipInventory::new(1, 0, 0, 0));
    board.place_ship(7, 2, 1, Orientation::Horizontal).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);
    let pilot = bot.autopilot().unwrap();
    assert_eq!(pilot.delay(), BotSpeed::High.delay());
    assert_eq!(pilot.select_target(&board, &mut rng), Some((7, 2)));
}
