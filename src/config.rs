use alloc::vec::Vec;

use crate::common::BoardError;

pub const BOARD_SIZE: usize = 8;

/// Classic fleet: one four-decker, two three-deckers, three two-deckers and
/// four single-deck boats.
pub const DEFAULT_FLEET: [usize; 10] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

/// Random draws per ship before a placement round is abandoned.
pub const PLACEMENT_ATTEMPTS: usize = 2000;

/// Placement rounds restarted from an empty board before giving up.
pub const MAX_PLACEMENT_RESTARTS: usize = 64;

/// Random parity samples per hunt-phase shot before falling back to a scan.
pub const HUNT_ATTEMPTS: usize = 5000;

/// Pause before each opponent shot, in milliseconds.
pub const OPPONENT_DELAY_MS: u64 = 550;

/// Number of entries retained in a session's event log.
pub const EVENT_LOG_CAPACITY: usize = 200;

/// Caller-owned game settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub board_size: usize,
    pub fleet: Vec<usize>,
    /// Ships may not touch, not even diagonally.
    pub enforce_no_touch: bool,
    /// The player may relocate one ship per turn during play.
    pub allow_move: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            fleet: DEFAULT_FLEET.to_vec(),
            enforce_no_touch: true,
            allow_move: true,
        }
    }
}

impl GameConfig {
    /// Check the board side and every fleet entry.
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.board_size == 0 {
            return Err(BoardError::InvalidBoardSize);
        }
        if self.fleet.is_empty() {
            return Err(BoardError::EmptyFleet);
        }
        validate_fleet(&self.fleet, self.board_size)
    }

    /// Total number of cells the fleet occupies.
    pub fn fleet_cells(&self) -> usize {
        self.fleet.iter().sum()
    }
}

/// Every ship size must be in `1..=board_size`.
pub fn validate_fleet(fleet: &[usize], board_size: usize) -> Result<(), BoardError> {
    match fleet.iter().find(|&&s| s == 0 || s > board_size) {
        Some(&size) => Err(BoardError::InvalidShipSize {
            size,
            board: board_size,
        }),
        None => Ok(()),
    }
}

/// Parse a comma separated fleet such as `"4,3,3,2"`.
///
/// Entries that are not integers or fall outside `1..=board_size` are
/// dropped. Returns `None` when nothing usable remains so the caller can keep
/// its previous fleet.
pub fn parse_fleet(text: &str, board_size: usize) -> Option<Vec<usize>> {
    let fleet: Vec<usize> = text
        .split(',')
        .filter_map(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n >= 1 && n <= board_size)
        .collect();
    if fleet.is_empty() {
        None
    } else {
        Some(fleet)
    }
}
