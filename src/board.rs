//! Board state: the cell grid, the fleet on it and shot resolution.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::common::{BoardError, Coord, ShotOutcome, Side};
use crate::ship::Ship;

/// One grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    coord: Coord,
    shot_by_player: bool,
    shot_by_opponent: bool,
    ship_id: Option<String>,
}

impl Cell {
    fn empty(coord: Coord) -> Self {
        Cell {
            coord,
            shot_by_player: false,
            shot_by_opponent: false,
            ship_id: None,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn shot_by_player(&self) -> bool {
        self.shot_by_player
    }

    pub fn shot_by_opponent(&self) -> bool {
        self.shot_by_opponent
    }

    /// Whether `shooter` has already fired at this cell.
    pub fn shot_by(&self, shooter: Side) -> bool {
        match shooter {
            Side::Player => self.shot_by_player,
            Side::Opponent => self.shot_by_opponent,
        }
    }

    /// Id of the ship occupying this cell, if any.
    pub fn ship_id(&self) -> Option<&str> {
        self.ship_id.as_deref()
    }

    fn mark_shot(&mut self, shooter: Side) {
        match shooter {
            Side::Player => self.shot_by_player = true,
            Side::Opponent => self.shot_by_opponent = true,
        }
    }
}

/// Result of [`Board::fire_at`]: the next board snapshot, the outcome and the
/// ship that was struck, if any.
#[derive(Debug, Clone)]
pub struct Shot {
    pub board: Board,
    pub outcome: ShotOutcome,
    pub ship: Option<Ship>,
}

/// One side's grid and fleet. Cells are indexed `[y][x]`.
///
/// Every mutating operation used across component boundaries returns a new
/// board; `Clone` is a deep copy.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    size: usize,
    cells: Vec<Vec<Cell>>,
    ships: Vec<Ship>,
}

impl Board {
    /// Create an empty `size`×`size` board with no ships.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::InvalidBoardSize);
        }
        let cells = (0..size)
            .map(|y| (0..size).map(|x| Cell::empty(Coord::new(x, y))).collect())
            .collect();
        Ok(Board {
            size,
            cells,
            ships: Vec::new(),
        })
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Rows of cells, `cells()[y][x]`.
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Ships in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: &str) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id() == id)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.size && coord.y < self.size
    }

    fn check_coord(&self, coord: Coord) -> Result<(), BoardError> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(BoardError::CoordOutOfBounds {
                x: coord.x,
                y: coord.y,
                size: self.size,
            })
        }
    }

    pub fn cell(&self, coord: Coord) -> Result<&Cell, BoardError> {
        self.check_coord(coord)?;
        Ok(&self.cells[coord.y][coord.x])
    }

    /// Ship id at `coord`; `None` for water or off-board coordinates.
    pub fn ship_id_at(&self, coord: Coord) -> Option<&str> {
        if !self.contains(coord) {
            return None;
        }
        self.cells[coord.y][coord.x].ship_id()
    }

    /// Whether the ship's cells are mirrored into the grid.
    pub fn is_placed(&self, id: &str) -> bool {
        match self.ship(id) {
            Some(ship) => ship
                .occupied_cells()
                .all(|c| self.ship_id_at(c) == Some(id)),
            None => false,
        }
    }

    /// Number of cells occupied by some ship.
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.ship_id.is_some())
            .count()
    }

    /// Number of cells `shooter` has fired at.
    pub fn shots_by(&self, shooter: Side) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.shot_by(shooter))
            .count()
    }

    /// Every ship in the fleet is sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(|s| s.is_sunk())
    }

    /// Ships still afloat.
    pub fn remaining_ships(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    /// Append a ship to the fleet without touching the grid.
    pub fn push_ship(&mut self, ship: Ship) {
        self.ships.push(ship);
    }

    /// Drop a ship from the fleet and clear its cells.
    pub fn remove_ship(&mut self, id: &str) -> Result<Ship, BoardError> {
        let idx = self
            .ships
            .iter()
            .position(|s| s.id() == id)
            .ok_or_else(|| BoardError::UnknownShip(id.to_string()))?;
        self.clear_ship(id);
        Ok(self.ships.remove(idx))
    }

    /// Replace the stored copy of a ship with the same id.
    pub fn update_ship(&mut self, ship: Ship) -> Result<(), BoardError> {
        let slot = self
            .ships
            .iter_mut()
            .find(|s| s.id() == ship.id())
            .ok_or_else(|| BoardError::UnknownShip(ship.id().to_string()))?;
        *slot = ship;
        Ok(())
    }

    /// Mirror the ship's cells into the grid. Does not check overlap; run the
    /// placement validator first.
    pub fn apply_ship(&mut self, ship: &Ship) -> Result<(), BoardError> {
        if ship.occupied_cells().any(|c| !self.contains(c)) {
            return Err(BoardError::ShipOutOfBounds);
        }
        for c in ship.occupied_cells() {
            self.cells[c.y][c.x].ship_id = Some(ship.id().to_string());
        }
        Ok(())
    }

    /// Remove every grid reference to the ship `id`.
    pub fn clear_ship(&mut self, id: &str) {
        for cell in self.cells.iter_mut().flatten() {
            if cell.ship_id.as_deref() == Some(id) {
                cell.ship_id = None;
            }
        }
    }

    /// Fire at `(x, y)` as `shooter`.
    ///
    /// The input board is never modified. A repeated shot returns an
    /// identical board with [`ShotOutcome::Repeat`].
    pub fn fire_at(&self, x: usize, y: usize, shooter: Side) -> Result<Shot, BoardError> {
        let coord = Coord::new(x, y);
        self.check_coord(coord)?;
        if self.cells[y][x].shot_by(shooter) {
            log::trace!("{} repeats shot at ({})", shooter, coord);
            return Ok(Shot {
                board: self.clone(),
                outcome: ShotOutcome::Repeat,
                ship: None,
            });
        }

        let mut next = self.clone();
        let cell = &mut next.cells[y][x];
        cell.mark_shot(shooter);
        let Some(id) = cell.ship_id.clone() else {
            log::debug!("{} misses at ({})", shooter, coord);
            return Ok(Shot {
                board: next,
                outcome: ShotOutcome::Miss,
                ship: None,
            });
        };

        let ship = next
            .ships
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| BoardError::UnknownShip(id.clone()))?;
        ship.register_hit(coord);
        let outcome = if ship.is_sunk() {
            ShotOutcome::Sunk
        } else {
            ShotOutcome::Hit
        };
        let ship = ship.clone();
        log::debug!("{} {:?} ship {} at ({})", shooter, outcome, ship.id(), coord);
        Ok(Shot {
            board: next,
            outcome,
            ship: Some(ship),
        })
    }

    /// What `shooter` is allowed to see of this board.
    pub fn view_for(&self, shooter: Side) -> FiringView<'_> {
        FiringView {
            board: self,
            shooter,
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ size: {}, ships: {:?} }}", self.size, self.ships)?;
        for row in &self.cells {
            for cell in row {
                let ch = match (cell.ship_id.is_some(), cell.shot_by_player || cell.shot_by_opponent) {
                    (true, true) => 'X',
                    (true, false) => '■',
                    (false, true) => 'o',
                    (false, false) => '□',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Mark revealed to a shooter on a cell it has fired at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Miss,
    Hit,
    /// Part of a ship that has been sunk.
    Sunk,
}

/// The shooter's knowledge of an enemy board: only the results of its own
/// shots, never the positions of intact ships.
#[derive(Clone, Copy)]
pub struct FiringView<'a> {
    board: &'a Board,
    shooter: Side,
}

impl<'a> FiringView<'a> {
    pub fn size(&self) -> usize {
        self.board.size
    }

    pub fn shooter(&self) -> Side {
        self.shooter
    }

    /// Whether the shooter already fired at `coord`. Off-board cells count
    /// as already shot so they are never selected.
    pub fn is_shot(&self, coord: Coord) -> bool {
        match self.board.cell(coord) {
            Ok(cell) => cell.shot_by(self.shooter),
            Err(_) => true,
        }
    }

    /// Result at `coord` if the shooter fired there.
    pub fn mark(&self, coord: Coord) -> Option<Mark> {
        let cell = self.board.cell(coord).ok()?;
        if !cell.shot_by(self.shooter) {
            return None;
        }
        Some(match cell.ship_id().and_then(|id| self.board.ship(id)) {
            None => Mark::Miss,
            Some(ship) if ship.is_sunk() => Mark::Sunk,
            Some(_) => Mark::Hit,
        })
    }

    /// Every coordinate the shooter has fired at, row-major.
    pub fn shots(&self) -> impl Iterator<Item = Coord> + 'a {
        let (board, shooter) = (self.board, self.shooter);
        board
            .cells
            .iter()
            .flatten()
            .filter(move |c| c.shot_by(shooter))
            .map(|c| c.coord)
    }

    /// Enemy ships still afloat.
    pub fn remaining_ships(&self) -> usize {
        self.board.remaining_ships()
    }
}
