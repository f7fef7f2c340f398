//! Ship geometry and hit bookkeeping.

use alloc::collections::BTreeSet;
use alloc::string::String;
use core::fmt;

use crate::common::{Coord, Side};

/// Orientation of a ship on the board. Cells extend from the bow along
/// `+x` (horizontal) or `+y` (vertical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// A ship owned by one side. Its cells are derived from `bow`,
/// `orientation` and `size`; the board only mirrors them for lookup.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    id: String,
    size: usize,
    bow: Coord,
    orientation: Orientation,
    hits: BTreeSet<Coord>,
    sunk: bool,
    owner: Side,
}

impl Ship {
    /// Build an undamaged ship.
    pub fn new(
        id: impl Into<String>,
        size: usize,
        bow: Coord,
        orientation: Orientation,
        owner: Side,
    ) -> Self {
        Ship {
            id: id.into(),
            size,
            bow,
            orientation,
            hits: BTreeSet::new(),
            sunk: false,
            owner,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bow(&self) -> Coord {
        self.bow
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn owner(&self) -> Side {
        self.owner
    }

    /// Coordinates already struck on this ship.
    pub fn hits(&self) -> &BTreeSet<Coord> {
        &self.hits
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    /// Same ship with a different bow. Hits are carried over unchanged.
    pub fn with_bow(&self, bow: Coord) -> Ship {
        Ship {
            bow,
            ..self.clone()
        }
    }

    /// Same ship turned to `orientation` around its bow.
    pub fn with_orientation(&self, orientation: Orientation) -> Ship {
        Ship {
            orientation,
            ..self.clone()
        }
    }

    /// The `size` cells this ship covers, starting at the bow. Cells may lie
    /// past the board edge for an unchecked candidate.
    pub fn occupied_cells(&self) -> OccupiedCells {
        occupied_cells(self.bow, self.orientation, self.size)
    }

    /// Whether `coord` is one of this ship's cells.
    pub fn covers(&self, coord: Coord) -> bool {
        match self.orientation {
            Orientation::Horizontal => {
                coord.y == self.bow.y && coord.x >= self.bow.x && coord.x < self.bow.x + self.size
            }
            Orientation::Vertical => {
                coord.x == self.bow.x && coord.y >= self.bow.y && coord.y < self.bow.y + self.size
            }
        }
    }

    /// Record a strike at `coord`. Returns `true` if the cell belongs to the
    /// ship. The ship is sunk once every cell has been struck.
    pub fn register_hit(&mut self, coord: Coord) -> bool {
        if !self.covers(coord) {
            return false;
        }
        self.hits.insert(coord);
        if self.hits.len() == self.size {
            self.sunk = true;
        }
        true
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ id: \"{}\", size: {}, bow: ({}), orientation: {:?}, hits: {}, sunk: {} }}",
            self.id,
            self.size,
            self.bow,
            self.orientation,
            self.hits.len(),
            self.sunk,
        )
    }
}

/// Cells covered by a ship of `size` anchored at `bow`.
pub fn occupied_cells(bow: Coord, orientation: Orientation, size: usize) -> OccupiedCells {
    OccupiedCells {
        bow,
        orientation,
        size,
        idx: 0,
    }
}

/// Iterator over a ship's cells, bow first.
#[derive(Debug, Clone, Copy)]
pub struct OccupiedCells {
    bow: Coord,
    orientation: Orientation,
    size: usize,
    idx: usize,
}

impl Iterator for OccupiedCells {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        if self.idx >= self.size {
            return None;
        }
        let i = self.idx;
        self.idx += 1;
        Some(match self.orientation {
            Orientation::Horizontal => Coord::new(self.bow.x + i, self.bow.y),
            Orientation::Vertical => Coord::new(self.bow.x, self.bow.y + i),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.size - self.idx;
        (left, Some(left))
    }
}

impl ExactSizeIterator for OccupiedCells {}
