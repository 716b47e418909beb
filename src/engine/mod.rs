//! Match engine: turn sequencing on top of the board and rules.
//!
//! `GameState` is the plain data; `GameEngine` owns one and is the only
//! thing that mutates it, one request at a time.

pub mod game;
pub mod observer;
pub mod state;

pub use game::GameEngine;
pub use observer::StateObserver;
pub use state::{GameState, Move, Phase, TurnRecord};
