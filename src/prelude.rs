//! Commonly used types and utilities for ease of import.

pub use crate::{
    placeable, random_placement, AiPlayer, Board, BoardError, Coord, GameConfig, GameSession,
    GameStatus, Orientation, Phase, Player, Ship, ShotOutcome, Side, TargetingStrategy,
};

#[cfg(feature = "std")]
pub use crate::{ui::print_player_view, CliPlayer, OpponentDriver};
