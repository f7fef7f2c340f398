use rand::rngs::SmallRng;

use crate::{
    board::{Board, FiringView},
    common::{BoardError, Coord, ShotOutcome},
    config::GameConfig,
};

/// Interface implemented by different player types.
pub trait Player {
    /// Build this player's fleet on a copy of `board`.
    fn place_ships(
        &mut self,
        rng: &mut SmallRng,
        board: &Board,
        config: &GameConfig,
    ) -> Result<Board, BoardError>;

    /// Choose the next target on the enemy board. `None` means the player
    /// has nothing left to fire at or gave up.
    fn select_target(&mut self, rng: &mut SmallRng, view: &FiringView<'_>) -> Option<Coord>;

    /// Inform the player of the result of its last shot.
    fn handle_shot_result(&mut self, _coord: Coord, _outcome: ShotOutcome) {}
}
