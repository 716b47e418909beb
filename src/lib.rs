//! # quixo-engine
//!
//! Rules engine for Quixo, the sliding-cube variant of tic-tac-toe.
//!
//! Two players take turns lifting a cube from the outer ring of an N×N board
//! (blank or already their own), marking it with their symbol, and pushing it
//! back in from the end of its row or column. The row or column slides one
//! step to close the gap. The first player to own a full row, column or
//! diagonal wins; if one push completes lines for both players it is a tie.
//!
//! ## Design
//!
//! - **Three-step turns**: pick, choose a slot, commit. Picks and slot
//!   choices can be backed out until the commit.
//! - **Derived phase**: the state machine phase is computed from the pending
//!   pick/target and result, so a loaded snapshot resumes exactly where it
//!   was captured.
//! - **Strict snapshots**: versioned, upgraded at load time, and rejected
//!   (never repaired) when inconsistent.
//! - **Persistent history**: turn history lives in an `im::Vector`, so
//!   cloning a state is cheap.
//!
//! ## Modules
//!
//! - `core`: Player seats, configuration, RNG
//! - `board`: Coordinates, cells and the grid
//! - `rules`: Insertion candidates, the cascade shift, win detection
//! - `engine`: The turn state machine and its observer hook
//! - `snapshot`: Versioned snapshot schema and codecs
//! - `session`: Lobby presence and the local user's match
//! - `sim`: Random playouts
//! - `error`: Error types
//!
//! ```
//! use quixo_engine::{Coord, GameConfig, GameEngine, Phase, Slot};
//!
//! let mut game = GameEngine::new("alice", "bob", &GameConfig::default()).unwrap();
//! let slots = game.compute_insertion_candidates("alice", Coord::new(1, 1)).unwrap();
//! assert_eq!(slots.as_slice(), &[Slot::new(6, 1), Slot::new(1, 6)]);
//!
//! game.queue_insertion(Slot::new(6, 1)).unwrap();
//! assert_eq!(game.commit_turn().unwrap(), Phase::AwaitingPick);
//! assert_eq!(game.current_identity(), "bob");
//! ```

pub mod board;
pub mod core;
pub mod engine;
pub mod error;
pub mod rules;
pub mod session;
pub mod sim;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameRng, PlayerId, PlayerMap};

pub use crate::board::{Board, Cell, Coord, Mark, Side, Slot};

pub use crate::rules::{Candidates, GameResult};

pub use crate::engine::{GameEngine, GameState, Move, Phase, StateObserver, TurnRecord};

pub use crate::snapshot::{Snapshot, VersionedSnapshot, SNAPSHOT_VERSION};

pub use crate::session::{InMemoryPresence, PresenceDirectory, Session};

pub use crate::error::{ConfigError, Error, MoveError, Result, SnapshotError};
