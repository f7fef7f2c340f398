//! Common types for Sea Battle: coordinates, sides, shot outcomes and board errors.

use alloc::string::String;
use core::fmt;

/// A grid position. `x` grows to the right, `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Offset this coordinate by `(dx, dy)`, returning `None` if the result
    /// leaves the `size`×`size` grid.
    pub fn offset(self, dx: isize, dy: isize, size: usize) -> Option<Coord> {
        let x = self.x as isize + dx;
        let y = self.y as isize + dy;
        if within(x, y, size) {
            Some(Coord::new(x as usize, y as usize))
        } else {
            None
        }
    }

    /// Checkerboard colour of the cell; `true` when `x + y` is even.
    pub fn is_even_parity(self) -> bool {
        (self.x + self.y) % 2 == 0
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Returns `true` when `(x, y)` lies on a `size`×`size` grid.
pub fn within(x: isize, y: isize, size: usize) -> bool {
    x >= 0 && y >= 0 && (x as usize) < size && (y as usize) < size
}

/// One of the two participants. Used both as a ship owner and as the role of
/// whoever is shooting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a single shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// The shooter already fired at this cell; nothing changed.
    Repeat,
    /// Open water.
    Miss,
    /// Struck a ship that is still afloat.
    Hit,
    /// Struck the last intact cell of a ship.
    Sunk,
}

impl ShotOutcome {
    /// `true` for `Hit` and `Sunk`.
    pub fn is_hit(self) -> bool {
        matches!(self, ShotOutcome::Hit | ShotOutcome::Sunk)
    }
}

/// Errors returned by board, placement and session operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate lies outside the board.
    CoordOutOfBounds { x: usize, y: usize, size: usize },
    /// No ship with this id exists on the board.
    UnknownShip(String),
    /// Ship extends past the board edge.
    ShipOutOfBounds,
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Ship placement touches another ship while the no-touch rule is on.
    ShipTouches,
    /// Ship size is zero or larger than the board side.
    InvalidShipSize { size: usize, board: usize },
    /// Random placement gave up after the given number of restarts.
    FleetDoesNotFit { restarts: usize },
    /// Board side length must be at least one.
    InvalidBoardSize,
    /// Fleet list is empty.
    EmptyFleet,
    /// Ship already took hits and can no longer be moved.
    ShipDamaged,
    /// A ship may not be moved onto a cell the enemy has already fired at.
    CellAlreadyShot { x: usize, y: usize },
    /// Operation is not allowed in the current game phase.
    WrongPhase,
    /// Operation is not allowed on this turn.
    NotYourTurn,
    /// The one ship move allowed per turn was already used.
    MoveAlreadyUsed,
    /// Moving ships during play is disabled.
    MovingDisabled,
    /// Player fleet is not completely placed.
    FleetIncomplete,
    /// Every cell has already been fired upon.
    NoUntriedCells,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::CoordOutOfBounds { x, y, size } => {
                write!(f, "Coordinate ({}, {}) is outside the {}x{} board", x, y, size, size)
            }
            BoardError::UnknownShip(id) => write!(f, "No ship with id {} on this board", id),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::ShipTouches => write!(f, "Ship placement touches another ship"),
            BoardError::InvalidShipSize { size, board } => {
                write!(f, "Ship size {} does not fit a board of side {}", size, board)
            }
            BoardError::FleetDoesNotFit { restarts } => {
                write!(f, "Fleet does not fit the board (gave up after {} restarts)", restarts)
            }
            BoardError::InvalidBoardSize => write!(f, "Board size must be at least 1"),
            BoardError::EmptyFleet => write!(f, "Fleet must contain at least one ship"),
            BoardError::ShipDamaged => write!(f, "Damaged ships cannot be moved"),
            BoardError::CellAlreadyShot { x, y } => {
                write!(f, "Cell ({}, {}) has already been fired at", x, y)
            }
            BoardError::WrongPhase => write!(f, "Not allowed in the current game phase"),
            BoardError::NotYourTurn => write!(f, "It is not your turn"),
            BoardError::MoveAlreadyUsed => write!(f, "A ship was already moved this turn"),
            BoardError::MovingDisabled => write!(f, "Moving ships during play is disabled"),
            BoardError::FleetIncomplete => write!(f, "Not every ship of the fleet is placed"),
            BoardError::NoUntriedCells => write!(f, "Every cell has already been fired upon"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
