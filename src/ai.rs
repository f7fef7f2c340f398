// Hunt/target shot selection for the automated opponent.
// Works from its own bookkeeping plus reported outcomes; it never sees the
// enemy fleet.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use rand::Rng;

use crate::board::FiringView;
use crate::common::Coord;
use crate::config::HUNT_ATTEMPTS;

/// Axis neighbours in push order: +x, -x, +y, -y.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Which mode the next call to [`TargetingStrategy::next_shot`] will use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetingPhase {
    /// Parity-filtered search for a new ship.
    Hunt,
    /// Following up on cells next to a confirmed hit.
    Target,
}

/// Two-phase targeting state for one game.
#[derive(Debug, Clone)]
pub struct TargetingStrategy {
    board_size: usize,
    /// Follow-up candidates; the most recent push is served first.
    targets: Vec<Coord>,
    tried: BTreeSet<Coord>,
    hunt_attempts: usize,
}

impl TargetingStrategy {
    pub fn new(board_size: usize) -> Self {
        Self::with_hunt_attempts(board_size, HUNT_ATTEMPTS)
    }

    /// Strategy with a custom random sampling budget for the hunt phase.
    pub fn with_hunt_attempts(board_size: usize, hunt_attempts: usize) -> Self {
        Self {
            board_size,
            targets: Vec::new(),
            tried: BTreeSet::new(),
            hunt_attempts,
        }
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn phase(&self) -> TargetingPhase {
        if self.targets.iter().any(|c| !self.tried.contains(c)) {
            TargetingPhase::Target
        } else {
            TargetingPhase::Hunt
        }
    }

    /// Pending follow-up candidates, next one last.
    pub fn pending_targets(&self) -> &[Coord] {
        &self.targets
    }

    pub fn is_tried(&self, coord: Coord) -> bool {
        self.tried.contains(&coord)
    }

    pub fn tried_count(&self) -> usize {
        self.tried.len()
    }

    /// Record that a shot at `coord` was fired.
    pub fn mark_tried(&mut self, coord: Coord) {
        self.tried.insert(coord);
    }

    /// Mark every cell already fired upon in `view` as tried, so the board
    /// stays the source of truth for what has been shot.
    pub fn sync_with(&mut self, view: &FiringView<'_>) {
        for c in view.shots() {
            self.tried.insert(c);
        }
    }

    /// Queue the in-bounds, untried axis neighbours of a hit at `at`.
    pub fn enqueue_neighbors(&mut self, at: Coord) {
        for (dx, dy) in DIRECTIONS {
            if let Some(n) = at.offset(dx, dy, self.board_size) {
                if !self.tried.contains(&n) {
                    self.targets.push(n);
                }
            }
        }
    }

    /// Choose the next coordinate to fire at. The coordinate is not marked as
    /// tried; call [`mark_tried`](Self::mark_tried) once the shot is fired.
    ///
    /// Returns `None` only when every cell has been tried.
    pub fn next_shot<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coord> {
        while let Some(c) = self.targets.pop() {
            if !self.tried.contains(&c) {
                log::trace!("target phase picks ({})", c);
                return Some(c);
            }
        }
        self.hunt(rng)
    }

    fn hunt<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Coord> {
        if self.untried_parity_cells() > 0 {
            for _ in 0..self.hunt_attempts {
                let c = Coord::new(
                    rng.random_range(0..self.board_size),
                    rng.random_range(0..self.board_size),
                );
                if c.is_even_parity() && !self.tried.contains(&c) {
                    log::trace!("hunt phase samples ({})", c);
                    return Some(c);
                }
            }
        }
        // Budget spent or parity cells exhausted: scan even cells, then the rest.
        let scan = self.scan(true).or_else(|| self.scan(false));
        if let Some(c) = scan {
            log::trace!("hunt phase falls back to scan at ({})", c);
        }
        scan
    }

    fn untried_parity_cells(&self) -> usize {
        let n = self.board_size;
        let even = (n * n + 1) / 2;
        even - self.tried.iter().filter(|c| c.is_even_parity() && c.x < n && c.y < n).count()
    }

    fn scan(&self, even: bool) -> Option<Coord> {
        (0..self.board_size)
            .flat_map(|y| (0..self.board_size).map(move |x| Coord::new(x, y)))
            .find(|c| c.is_even_parity() == even && !self.tried.contains(c))
    }
}
