use rand::rngs::SmallRng;

use crate::{
    ai::TargetingStrategy,
    board::{Board, FiringView},
    common::{BoardError, Coord, ShotOutcome, Side},
    config::GameConfig,
    placement,
    player::Player,
};

/// Automated player driven by the hunt/target strategy.
pub struct AiPlayer {
    strategy: TargetingStrategy,
}

impl AiPlayer {
    pub fn new(board_size: usize) -> Self {
        Self {
            strategy: TargetingStrategy::new(board_size),
        }
    }

    pub fn strategy(&self) -> &TargetingStrategy {
        &self.strategy
    }
}

impl Player for AiPlayer {
    fn place_ships(
        &mut self,
        rng: &mut SmallRng,
        board: &Board,
        config: &GameConfig,
    ) -> Result<Board, BoardError> {
        placement::random_placement(board, &config.fleet, Side::Player, config.enforce_no_touch, rng)
    }

    fn select_target(&mut self, rng: &mut SmallRng, view: &FiringView<'_>) -> Option<Coord> {
        self.strategy.sync_with(view);
        self.strategy.next_shot(rng)
    }

    fn handle_shot_result(&mut self, coord: Coord, outcome: ShotOutcome) {
        self.strategy.mark_tried(coord);
        if outcome.is_hit() {
            self.strategy.enqueue_neighbors(coord);
        }
    }
}
