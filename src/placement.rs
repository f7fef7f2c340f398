//! Placement validation, randomized fleet placement and ship relocation.

use alloc::format;
use alloc::string::{String, ToString};
use rand::Rng;

use crate::board::Board;
use crate::common::{BoardError, Coord, Side};
use crate::config::{validate_fleet, MAX_PLACEMENT_RESTARTS, PLACEMENT_ATTEMPTS};
use crate::ship::{Orientation, Ship};

/// Returns `true` when `ship` may occupy its cells on `board`.
///
/// Cells already claimed by the ship's own id are ignored, so a ship can be
/// tested against the board it currently sits on.
pub fn placeable(board: &Board, ship: &Ship, enforce_no_touch: bool) -> bool {
    check_placement(board, ship, enforce_no_touch).is_ok()
}

/// Like [`placeable`] but reports why a placement is rejected.
pub fn check_placement(board: &Board, ship: &Ship, enforce_no_touch: bool) -> Result<(), BoardError> {
    if ship.occupied_cells().any(|c| !board.contains(c)) {
        return Err(BoardError::ShipOutOfBounds);
    }
    let foreign = |c: Coord| matches!(board.ship_id_at(c), Some(id) if id != ship.id());
    for c in ship.occupied_cells() {
        if foreign(c) {
            return Err(BoardError::ShipOverlaps);
        }
        if enforce_no_touch {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if let Some(n) = c.offset(dx, dy, board.size()) {
                        if foreign(n) {
                            return Err(BoardError::ShipTouches);
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

/// Bounds on the random placement search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementLimits {
    /// Random draws per ship before the round is abandoned.
    pub attempts_per_ship: usize,
    /// Rounds restarted from an empty board before giving up.
    pub max_restarts: usize,
}

impl Default for PlacementLimits {
    fn default() -> Self {
        Self {
            attempts_per_ship: PLACEMENT_ATTEMPTS,
            max_restarts: MAX_PLACEMENT_RESTARTS,
        }
    }
}

/// Place `fleet` on a copy of `board` at random, with the default limits.
pub fn random_placement<R: Rng + ?Sized>(
    board: &Board,
    fleet: &[usize],
    owner: Side,
    enforce_no_touch: bool,
    rng: &mut R,
) -> Result<Board, BoardError> {
    random_placement_with_limits(
        board,
        fleet,
        owner,
        enforce_no_touch,
        PlacementLimits::default(),
        rng,
    )
}

/// Place `fleet` on a copy of `board` at random.
///
/// Ships are placed in the given order. If a ship finds no legal spot within
/// `attempts_per_ship` draws, the whole fleet is retried on an empty board of
/// the same size. After `max_restarts` failed rounds the fleet is reported
/// as not fitting.
pub fn random_placement_with_limits<R: Rng + ?Sized>(
    board: &Board,
    fleet: &[usize],
    owner: Side,
    enforce_no_touch: bool,
    limits: PlacementLimits,
    rng: &mut R,
) -> Result<Board, BoardError> {
    validate_fleet(fleet, board.size())?;
    let mut start = board.clone();
    for round in 0..=limits.max_restarts {
        if round > 0 {
            log::debug!("placement round {} for {} restarting on an empty board", round, owner);
            start = Board::new(board.size())?;
        }
        if let Some(placed) = place_round(&start, fleet, owner, enforce_no_touch, limits, rng)? {
            return Ok(placed);
        }
    }
    log::debug!("fleet {:?} does not fit a board of side {}", fleet, board.size());
    Err(BoardError::FleetDoesNotFit {
        restarts: limits.max_restarts,
    })
}

fn place_round<R: Rng + ?Sized>(
    start: &Board,
    fleet: &[usize],
    owner: Side,
    enforce_no_touch: bool,
    limits: PlacementLimits,
    rng: &mut R,
) -> Result<Option<Board>, BoardError> {
    let mut board = start.clone();
    'ships: for &size in fleet {
        for _ in 0..limits.attempts_per_ship {
            let orientation = if rng.random_bool(0.5) {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let n = board.size();
            let max_x = if orientation == Orientation::Horizontal { n - size } else { n - 1 };
            let max_y = if orientation == Orientation::Vertical { n - size } else { n - 1 };
            let bow = Coord::new(rng.random_range(0..=max_x), rng.random_range(0..=max_y));
            let id = fresh_ship_id(&board, owner, size, rng);
            let ship = Ship::new(id, size, bow, orientation, owner);
            if placeable(&board, &ship, enforce_no_touch) {
                board.apply_ship(&ship)?;
                board.push_ship(ship);
                continue 'ships;
            }
        }
        return Ok(None);
    }
    Ok(Some(board))
}

/// Id of the form `owner-size-nonce`, unique among the ships on `board`.
pub fn fresh_ship_id<R: Rng + ?Sized>(board: &Board, owner: Side, size: usize, rng: &mut R) -> String {
    loop {
        let nonce: u32 = rng.random();
        let id = format!("{}-{}-{:08x}", owner, size, nonce);
        if board.ship(&id).is_none() {
            return id;
        }
    }
}

/// Move ship `id` to `bow` with `orientation`.
///
/// The ship is cleared, the candidate validated against the rest of the
/// fleet and committed. On rejection the error is returned and `board` is
/// left as it was. Damaged ships stay put, and no ship may move onto a cell
/// the enemy has already fired at: a later shot there would only repeat.
pub fn relocate(
    board: &Board,
    id: &str,
    bow: Coord,
    orientation: Orientation,
    enforce_no_touch: bool,
) -> Result<Board, BoardError> {
    let ship = board
        .ship(id)
        .ok_or_else(|| BoardError::UnknownShip(id.to_string()))?;
    if !ship.hits().is_empty() {
        return Err(BoardError::ShipDamaged);
    }
    let candidate = ship.with_bow(bow).with_orientation(orientation);
    let mut next = board.clone();
    next.clear_ship(id);
    check_placement(&next, &candidate, enforce_no_touch)?;
    let enemy = candidate.owner().other();
    if let Some(c) = candidate
        .occupied_cells()
        .find(|&c| next.cell(c).map_or(false, |cell| cell.shot_by(enemy)))
    {
        return Err(BoardError::CellAlreadyShot { x: c.x, y: c.y });
    }
    next.apply_ship(&candidate)?;
    next.update_ship(candidate)?;
    Ok(next)
}

/// Move ship `id` so its bow lands on `bow`, keeping its orientation.
pub fn move_ship_to(board: &Board, id: &str, bow: Coord, enforce_no_touch: bool) -> Result<Board, BoardError> {
    let orientation = board
        .ship(id)
        .ok_or_else(|| BoardError::UnknownShip(id.to_string()))?
        .orientation();
    relocate(board, id, bow, orientation, enforce_no_touch)
}

/// Shift ship `id` by `(dx, dy)`.
pub fn nudge_ship(
    board: &Board,
    id: &str,
    dx: isize,
    dy: isize,
    enforce_no_touch: bool,
) -> Result<Board, BoardError> {
    let ship = board
        .ship(id)
        .ok_or_else(|| BoardError::UnknownShip(id.to_string()))?;
    let bow = ship
        .bow()
        .offset(dx, dy, board.size())
        .ok_or(BoardError::ShipOutOfBounds)?;
    relocate(board, id, bow, ship.orientation(), enforce_no_touch)
}

/// Turn ship `id` around its bow.
pub fn rotate_ship(board: &Board, id: &str, enforce_no_touch: bool) -> Result<Board, BoardError> {
    let ship = board
        .ship(id)
        .ok_or_else(|| BoardError::UnknownShip(id.to_string()))?;
    relocate(board, id, ship.bow(), ship.orientation().flipped(), enforce_no_touch)
}

/// Add a ship of `size` to the fleet without placing it on the grid.
/// Returns the new board and the ship's id.
pub fn add_ship<R: Rng + ?Sized>(
    board: &Board,
    size: usize,
    owner: Side,
    rng: &mut R,
) -> Result<(Board, String), BoardError> {
    validate_fleet(&[size], board.size())?;
    let id = fresh_ship_id(board, owner, size, rng);
    let mut next = board.clone();
    next.push_ship(Ship::new(id.clone(), size, Coord::new(0, 0), Orientation::Horizontal, owner));
    Ok((next, id))
}

/// Drop the most recently added ship. An empty fleet is returned unchanged.
pub fn remove_last_ship(board: &Board) -> Result<Board, BoardError> {
    let mut next = board.clone();
    if let Some(id) = next.ships().last().map(|s| s.id().to_string()) {
        next.remove_ship(&id)?;
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn self_overlap_is_allowed() {
        let mut board = Board::new(8).unwrap();
        let ship = Ship::new("a", 3, Coord::new(2, 2), Orientation::Horizontal, Side::Player);
        board.apply_ship(&ship).unwrap();
        board.push_ship(ship.clone());
        assert!(placeable(&board, &ship, true));
        assert!(placeable(&board, &ship.with_bow(Coord::new(3, 2)), true));
    }

    #[test]
    fn ids_are_unique_with_repeating_rng() {
        let mut rng = SmallRng::seed_from_u64(5);
        let board = random_placement(&Board::new(8).unwrap(), &[1; 12], Side::Opponent, false, &mut rng).unwrap();
        let mut ids: alloc::vec::Vec<_> = board.ships().iter().map(|s| s.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 12);
        assert!(ids.iter().all(|id| id.starts_with("opponent-1-")));
    }
}
