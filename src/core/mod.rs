//! Core engine types: player seats, configuration, RNG.
//!
//! These are the building blocks shared by the board, the rules and the
//! engine. None of them know about cells or moves.

pub mod config;
pub mod player;
pub mod rng;

pub use config::{GameConfig, DEFAULT_BOARD_SIZE};
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
