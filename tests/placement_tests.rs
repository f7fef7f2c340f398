use rand::rngs::SmallRng;
use rand::SeedableRng;
use seabattle::placement::{
    add_ship, check_placement, move_ship_to, nudge_ship, random_placement_with_limits, relocate,
    remove_last_ship, rotate_ship,
};
use seabattle::{
    placeable, random_placement, Board, BoardError, Coord, Orientation, PlacementLimits, Ship,
    Side, DEFAULT_FLEET,
};

fn place(board: &mut Board, ship: Ship) {
    board.apply_ship(&ship).unwrap();
    board.push_ship(ship);
}

#[test]
fn test_out_of_bounds_four_decker() {
    let board = Board::new(8).unwrap();
    let ship = Ship::new("s", 4, Coord::new(6, 0), Orientation::Horizontal, Side::Player);
    assert!(!placeable(&board, &ship, true));
    assert!(!placeable(&board, &ship, false));
    assert_eq!(check_placement(&board, &ship, false), Err(BoardError::ShipOutOfBounds));
    let fits = Ship::new("s", 4, Coord::new(4, 0), Orientation::Horizontal, Side::Player);
    assert!(placeable(&board, &fits, true));
}

#[test]
fn test_overlap_and_touch_rules() {
    let mut board = Board::new(8).unwrap();
    place(&mut board, Ship::new("a", 3, Coord::new(2, 2), Orientation::Horizontal, Side::Player));

    let overlapping = Ship::new("b", 2, Coord::new(3, 1), Orientation::Vertical, Side::Player);
    assert_eq!(check_placement(&board, &overlapping, false), Err(BoardError::ShipOverlaps));

    let diagonal = Ship::new("b", 1, Coord::new(5, 3), Orientation::Vertical, Side::Player);
    assert_eq!(check_placement(&board, &diagonal, true), Err(BoardError::ShipTouches));
    assert!(placeable(&board, &diagonal, false));

    let clear = Ship::new("b", 1, Coord::new(6, 4), Orientation::Vertical, Side::Player);
    assert!(placeable(&board, &clear, true));
}

#[test]
fn test_default_fleet_placement() {
    let mut rng = SmallRng::seed_from_u64(42);
    let board = random_placement(&Board::new(8).unwrap(), &DEFAULT_FLEET, Side::Player, true, &mut rng).unwrap();
    assert_eq!(board.ships().len(), 10);
    assert_eq!(board.occupied_count(), 21);
    assert!(!board.all_sunk());
    let sizes: Vec<_> = board.ships().iter().map(|s| s.size()).collect();
    assert_eq!(sizes, DEFAULT_FLEET.to_vec());
    assert!(board.ships().iter().all(|s| s.owner() == Side::Player));
    assert!(board.ships().iter().all(|s| board.is_placed(s.id())));
}

#[test]
fn test_placement_is_reproducible() {
    let empty = Board::new(8).unwrap();
    let a = random_placement(&empty, &DEFAULT_FLEET, Side::Opponent, true, &mut SmallRng::seed_from_u64(7)).unwrap();
    let b = random_placement(&empty, &DEFAULT_FLEET, Side::Opponent, true, &mut SmallRng::seed_from_u64(7)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_impossible_fleet_reports_error() {
    let mut rng = SmallRng::seed_from_u64(1);
    let limits = PlacementLimits {
        attempts_per_ship: 50,
        max_restarts: 3,
    };
    let err = random_placement_with_limits(&Board::new(3).unwrap(), &[3, 3, 3], Side::Player, true, limits, &mut rng)
        .unwrap_err();
    assert_eq!(err, BoardError::FleetDoesNotFit { restarts: 3 });
}

#[test]
fn test_oversized_ship_is_rejected_up_front() {
    let mut rng = SmallRng::seed_from_u64(1);
    let err = random_placement(&Board::new(4).unwrap(), &[5], Side::Player, false, &mut rng).unwrap_err();
    assert_eq!(err, BoardError::InvalidShipSize { size: 5, board: 4 });
}

#[test]
fn test_tight_fleet_without_no_touch_fills_board() {
    let mut rng = SmallRng::seed_from_u64(3);
    let board = random_placement(&Board::new(2).unwrap(), &[2, 2], Side::Player, false, &mut rng).unwrap();
    assert_eq!(board.occupied_count(), 4);
}

#[test]
fn test_relocate_commits_or_leaves_board_alone() {
    let mut board = Board::new(8).unwrap();
    place(&mut board, Ship::new("a", 3, Coord::new(0, 0), Orientation::Horizontal, Side::Player));
    place(&mut board, Ship::new("b", 2, Coord::new(0, 4), Orientation::Horizontal, Side::Player));

    // overlapping its own old cells is fine
    let moved = move_ship_to(&board, "a", Coord::new(1, 0), true).unwrap();
    assert_eq!(moved.ship_id_at(Coord::new(0, 0)), None);
    assert_eq!(moved.ship_id_at(Coord::new(3, 0)), Some("a"));
    assert_eq!(moved.occupied_count(), 5);

    let err = relocate(&board, "a", Coord::new(0, 3), Orientation::Horizontal, true).unwrap_err();
    assert_eq!(err, BoardError::ShipTouches);
    assert_eq!(board.ship("a").unwrap().bow(), Coord::new(0, 0));
    assert_eq!(board.ship_id_at(Coord::new(0, 0)), Some("a"));

    let err = move_ship_to(&board, "missing", Coord::new(5, 5), true).unwrap_err();
    assert_eq!(err, BoardError::UnknownShip("missing".into()));
}

#[test]
fn test_rotate_and_nudge() {
    let mut board = Board::new(8).unwrap();
    place(&mut board, Ship::new("a", 3, Coord::new(6, 5), Orientation::Vertical, Side::Player));

    let rotated = rotate_ship(&board, "a", true);
    assert_eq!(rotated.unwrap_err(), BoardError::ShipOutOfBounds);

    let nudged = nudge_ship(&board, "a", -2, 0, true).unwrap();
    assert_eq!(nudged.ship("a").unwrap().bow(), Coord::new(4, 5));
    let rotated = rotate_ship(&nudged, "a", true).unwrap();
    assert_eq!(rotated.ship("a").unwrap().orientation(), Orientation::Horizontal);
    assert_eq!(rotated.ship_id_at(Coord::new(6, 5)), Some("a"));
    assert_eq!(rotated.ship_id_at(Coord::new(4, 6)), None);

    assert_eq!(nudge_ship(&board, "a", 0, 1, true).unwrap_err(), BoardError::ShipOutOfBounds);
    assert_eq!(nudge_ship(&rotated, "a", 0, -9, true).unwrap_err(), BoardError::ShipOutOfBounds);
}

#[test]
fn test_damaged_ship_stays_put() {
    let mut board = Board::new(8).unwrap();
    place(&mut board, Ship::new("a", 2, Coord::new(0, 0), Orientation::Horizontal, Side::Player));
    let board = board.fire_at(0, 0, Side::Opponent).unwrap().board;
    assert_eq!(move_ship_to(&board, "a", Coord::new(4, 4), true).unwrap_err(), BoardError::ShipDamaged);
}

#[test]
fn test_add_and_remove_ships() {
    let mut rng = SmallRng::seed_from_u64(9);
    let board = Board::new(8).unwrap();
    let (board, first) = add_ship(&board, 3, Side::Player, &mut rng).unwrap();
    let (board, second) = add_ship(&board, 2, Side::Player, &mut rng).unwrap();
    assert_ne!(first, second);
    assert!(first.starts_with("player-3-"));
    assert_eq!(board.ships().len(), 2);
    assert!(!board.is_placed(&first));
    assert_eq!(board.occupied_count(), 0);

    let board = move_ship_to(&board, &second, Coord::new(5, 5), true).unwrap();
    assert!(board.is_placed(&second));
    let board = remove_last_ship(&board).unwrap();
    assert_eq!(board.ships().len(), 1);
    assert_eq!(board.occupied_count(), 0);
    assert!(board.ship(&first).is_some());

    let empty = remove_last_ship(&remove_last_ship(&board).unwrap()).unwrap();
    assert!(empty.ships().is_empty());

    assert_eq!(
        add_ship(&board, 9, Side::Player, &mut rng).unwrap_err(),
        BoardError::InvalidShipSize { size: 9, board: 8 }
    );
}

#[test]
fn test_ship_cannot_move_onto_enemy_shot() {
    let mut board = Board::new(8).unwrap();
    place(&mut board, Ship::new("a", 2, Coord::new(0, 0), Orientation::Horizontal, Side::Player));
    let board = board.fire_at(5, 5, Side::Opponent).unwrap().board;

    assert_eq!(
        move_ship_to(&board, "a", Coord::new(4, 5), true).unwrap_err(),
        BoardError::CellAlreadyShot { x: 5, y: 5 }
    );
    assert!(board.is_placed("a"));
    assert_eq!(board.ship_id_at(Coord::new(5, 5)), None);

    // the player's own shots on this board do not block the move
    let board = board.fire_at(3, 3, Side::Player).unwrap().board;
    let moved = move_ship_to(&board, "a", Coord::new(3, 3), true).unwrap();
    assert_eq!(moved.ship_id_at(Coord::new(4, 3)), Some("a"));
}
