#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod ai;
mod board;
mod common;
mod config;
#[cfg(feature = "std")]
mod driver;
mod game;
#[cfg(feature = "std")]
mod logging;
pub mod placement;
pub mod prelude;
mod player;
mod player_ai;
#[cfg(feature = "std")]
mod player_cli;
mod ship;
#[cfg(feature = "std")]
pub mod ui;

pub use ai::*;
pub use board::*;
pub use common::*;
pub use config::*;
#[cfg(feature = "std")]
pub use driver::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with_default, LOG_ENV};
pub use placement::{placeable, random_placement, PlacementLimits};
pub use player::*;
pub use player_ai::*;
#[cfg(feature = "std")]
pub use player_cli::*;
pub use ship::*;
