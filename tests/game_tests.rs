use rand::rngs::SmallRng;
use rand::SeedableRng;
use seabattle::{
    AiPlayer, Board, BoardError, Orientation, Ship, Coord, GameConfig, GameEvent, GameSession, GameStatus, Phase, Player,
    ShotOutcome, Side,
};

fn single_boat_config() -> GameConfig {
    GameConfig {
        board_size: 8,
        fleet: vec![1],
        enforce_no_touch: true,
        allow_move: true,
    }
}

/// Session in play with the player's boat at `(0, 0)`.
fn started_session(rng: &mut SmallRng) -> (GameSession, String) {
    let mut session = GameSession::new(single_boat_config(), rng).unwrap();
    let id = session.add_player_ship(1, rng).unwrap();
    assert_eq!(session.start().unwrap_err(), BoardError::FleetIncomplete);
    session.move_player_ship(&id, Coord::new(0, 0)).unwrap();
    session.start().unwrap();
    (session, id)
}

fn opponent_cell(session: &GameSession) -> Coord {
    session.opponent_board().ships()[0].bow()
}

fn water_cell(session: &GameSession) -> Coord {
    let boat = opponent_cell(session);
    if boat == Coord::new(7, 7) {
        Coord::new(6, 6)
    } else {
        Coord::new(7, 7)
    }
}

#[test]
fn test_new_session_is_in_setup() {
    let mut rng = SmallRng::seed_from_u64(1);
    let session = GameSession::new(GameConfig::default(), &mut rng).unwrap();
    assert_eq!(session.phase(), Phase::Setup);
    assert_eq!(session.turn(), Side::Player);
    assert!(session.player_board().ships().is_empty());
    assert_eq!(session.opponent_board().ships().len(), 10);
    assert_eq!(session.opponent_board().occupied_count(), 21);
    assert_eq!(session.status(), GameStatus::InProgress);
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut rng = SmallRng::seed_from_u64(1);
    let config = GameConfig {
        fleet: vec![],
        ..GameConfig::default()
    };
    assert_eq!(GameSession::new(config, &mut rng).err(), Some(BoardError::EmptyFleet));
}

#[test]
fn test_setup_commands() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut session = GameSession::new(GameConfig::default(), &mut rng).unwrap();
    let before = session.opponent_board().clone();
    session.regenerate_opponent(&mut rng).unwrap();
    assert_ne!(session.opponent_board(), &before);

    session.auto_place_player(&mut rng).unwrap();
    assert!(session.fleet_ready());
    session.remove_last_player_ship().unwrap();
    assert!(!session.fleet_ready());
    session.auto_place_player(&mut rng).unwrap();
    session.start().unwrap();

    assert_eq!(session.auto_place_player(&mut rng).unwrap_err(), BoardError::WrongPhase);
    assert_eq!(session.regenerate_opponent(&mut rng).unwrap_err(), BoardError::WrongPhase);
    assert_eq!(session.events().next(), Some(&GameEvent::Started));
}

#[test]
fn test_hit_keeps_turn_and_repeat_is_free() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut session = GameSession::new(
        GameConfig {
            fleet: vec![2],
            ..single_boat_config()
        },
        &mut rng,
    )
    .unwrap();
    session.auto_place_player(&mut rng).unwrap();
    session.start().unwrap();

    let target = opponent_cell(&session);
    assert_eq!(session.player_fire(target).unwrap(), ShotOutcome::Hit);
    assert_eq!(session.turn(), Side::Player);
    let events = session.event_count();
    assert_eq!(session.player_fire(target).unwrap(), ShotOutcome::Repeat);
    assert_eq!(session.turn(), Side::Player);
    assert_eq!(session.event_count(), events);
    assert_eq!(session.shots_fired(Side::Player), 1);
}

#[test]
fn test_miss_hands_turn_to_opponent() {
    let mut rng = SmallRng::seed_from_u64(4);
    let (mut session, _) = started_session(&mut rng);
    let water = water_cell(&session);
    assert_eq!(session.player_fire(water).unwrap(), ShotOutcome::Miss);
    assert_eq!(session.turn(), Side::Opponent);
    assert_eq!(session.player_fire(water).unwrap_err(), BoardError::NotYourTurn);

    let shot = session.opponent_turn(&mut rng).unwrap();
    assert!(session.strategy().is_tried(shot.at));
    match shot.outcome {
        ShotOutcome::Miss => assert_eq!(session.turn(), Side::Player),
        ShotOutcome::Sunk => assert_eq!(session.status(), GameStatus::Lost),
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn test_one_move_per_turn() {
    let mut rng = SmallRng::seed_from_u64(5);
    let (mut session, id) = started_session(&mut rng);
    session.move_player_ship(&id, Coord::new(4, 4)).unwrap();
    assert!(session.moved_this_turn());
    assert_eq!(
        session.move_player_ship(&id, Coord::new(5, 5)).unwrap_err(),
        BoardError::MoveAlreadyUsed
    );
    assert_eq!(session.events().next(), Some(&GameEvent::ShipMoved { size: 1 }));

    let water = water_cell(&session);
    session.player_fire(water).unwrap();
    assert_eq!(session.rotate_player_ship(&id).unwrap_err(), BoardError::NotYourTurn);

    let shot = session.opponent_turn(&mut rng).unwrap();
    if shot.outcome == ShotOutcome::Miss {
        assert!(!session.moved_this_turn());
        let dx = if shot.at == Coord::new(5, 4) { -1 } else { 1 };
        session.nudge_player_ship(&id, dx, 0).unwrap();
    }
}

#[test]
fn test_moving_can_be_disabled() {
    let mut rng = SmallRng::seed_from_u64(6);
    let mut session = GameSession::new(
        GameConfig {
            allow_move: false,
            ..single_boat_config()
        },
        &mut rng,
    )
    .unwrap();
    session.auto_place_player(&mut rng).unwrap();
    let id = session.player_board().ships()[0].id().to_string();
    session.start().unwrap();
    assert_eq!(
        session.move_player_ship(&id, Coord::new(3, 3)).unwrap_err(),
        BoardError::MovingDisabled
    );
}

#[test]
fn test_sinking_last_ship_wins() {
    let mut rng = SmallRng::seed_from_u64(7);
    let (mut session, _) = started_session(&mut rng);
    let target = opponent_cell(&session);
    assert_eq!(session.player_fire(target).unwrap(), ShotOutcome::Sunk);
    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.status(), GameStatus::Won);
    assert_eq!(session.events().next(), Some(&GameEvent::Won));
    assert_eq!(session.remaining_opponent_ships(), 0);
    assert_eq!(session.player_fire(target).unwrap_err(), BoardError::WrongPhase);
}

#[test]
fn test_reset_returns_to_setup() {
    let mut rng = SmallRng::seed_from_u64(8);
    let (mut session, _) = started_session(&mut rng);
    session.player_fire(water_cell(&session)).unwrap();
    session.reset(&mut rng).unwrap();
    assert_eq!(session.phase(), Phase::Setup);
    assert_eq!(session.turn(), Side::Player);
    assert_eq!(session.event_count(), 0);
    assert_eq!(session.strategy().tried_count(), 0);
    assert!(session.player_board().ships().is_empty());
}

#[test]
fn test_ai_vs_ai_game_finishes() {
    let mut rng = SmallRng::seed_from_u64(123);
    let mut opponent_rng = SmallRng::seed_from_u64(321);
    let mut session = GameSession::new(GameConfig::default(), &mut opponent_rng).unwrap();
    let mut bot = AiPlayer::new(8);
    let board = bot
        .place_ships(&mut rng, session.player_board(), session.config())
        .unwrap();
    session.set_player_board(board).unwrap();
    session.start().unwrap();

    let mut opponent_turns = 0;
    let mut shots = 0;
    while session.phase() == Phase::InProgress {
        shots += 1;
        assert!(shots <= 128, "game took too many shots");
        match session.turn() {
            Side::Player => {
                let at = bot.select_target(&mut rng, &session.opponent_view()).unwrap();
                let outcome = session.player_fire(at).unwrap();
                assert_ne!(outcome, ShotOutcome::Repeat);
                bot.handle_shot_result(at, outcome);
            }
            Side::Opponent => {
                let shot = session.opponent_turn(&mut opponent_rng).unwrap();
                assert_ne!(shot.outcome, ShotOutcome::Repeat);
                opponent_turns += 1;
            }
        }
    }
    assert!(matches!(session.status(), GameStatus::Won | GameStatus::Lost));
    assert_eq!(session.shots_fired(Side::Opponent), opponent_turns);
    assert_eq!(session.strategy().tried_count(), opponent_turns);
}

/// Player board holding one boat at `boat`, with the opponent having
/// already fired at every cell in `shots`.
fn pre_shot_board(boat: Coord, shots: &[Coord]) -> Board {
    let mut board = Board::new(8).unwrap();
    let ship = Ship::new("boat", 1, boat, Orientation::Horizontal, Side::Player);
    board.apply_ship(&ship).unwrap();
    board.push_ship(ship);
    for c in shots {
        board = board.fire_at(c.x, c.y, Side::Opponent).unwrap().board;
    }
    board
}

#[test]
fn test_move_onto_opponent_shot_is_rejected() {
    let mut rng = SmallRng::seed_from_u64(9);
    let mut session = GameSession::new(single_boat_config(), &mut rng).unwrap();
    session
        .set_player_board(pre_shot_board(Coord::new(0, 0), &[Coord::new(4, 4)]))
        .unwrap();
    session.start().unwrap();

    assert_eq!(
        session.move_player_ship("boat", Coord::new(4, 4)).unwrap_err(),
        BoardError::CellAlreadyShot { x: 4, y: 4 }
    );
    assert!(!session.moved_this_turn());
    assert_eq!(session.player_board().ship_id_at(Coord::new(0, 0)), Some("boat"));

    session.move_player_ship("boat", Coord::new(5, 5)).unwrap();
    assert!(session.moved_this_turn());
}

#[test]
fn test_opponent_skips_cells_already_shot_on_board() {
    let mut rng = SmallRng::seed_from_u64(10);
    let boat = Coord::new(6, 7);
    let shots: Vec<Coord> = (0..8)
        .flat_map(|y| (0..8).map(move |x| Coord::new(x, y)))
        .filter(|&c| c != boat)
        .collect();
    let mut session = GameSession::new(single_boat_config(), &mut rng).unwrap();
    session.set_player_board(pre_shot_board(boat, &shots)).unwrap();
    session.start().unwrap();
    assert_eq!(session.strategy().tried_count(), 0);

    session.player_fire(water_cell(&session)).unwrap();
    let shot = session.opponent_turn(&mut rng).unwrap();
    assert_eq!(shot.at, boat);
    assert_eq!(shot.outcome, ShotOutcome::Sunk);
    assert_eq!(session.status(), GameStatus::Lost);
    assert!(shots.iter().all(|&c| session.strategy().is_tried(c)));
    assert_eq!(session.shots_fired(Side::Opponent), 64);
}
