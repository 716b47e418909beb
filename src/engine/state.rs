//! Game state: the board plus everything needed to sequence turns.
//!
//! ## Phase
//!
//! The state-machine phase is never stored. It is derived from the pending
//! pick, pending target and result, so a state rebuilt from a snapshot is
//! automatically in the right phase:
//!
//! | result | pick | target | phase             |
//! |--------|------|--------|-------------------|
//! | Some   | -    | -      | `Won` / `Tied`    |
//! | None   | None | None   | `AwaitingPick`    |
//! | None   | Some | None   | `AwaitingInsertion` |
//! | None   | Some | Some   | `AwaitingCommit`  |

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Coord, Mark, Slot};
use crate::core::{GameConfig, PlayerId, PlayerMap};
use crate::error::ConfigError;
use crate::rules::GameResult;

/// State-machine phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The player to move must pick an edge cube.
    AwaitingPick,
    /// A cube is lifted; the player must choose an insertion slot.
    AwaitingInsertion,
    /// A slot is chosen; the player must commit (or back out).
    AwaitingCommit,
    /// Terminal: one seat completed a line.
    Won(PlayerId),
    /// Terminal: both marks completed a line on the same commit.
    Tied,
}

impl Phase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Won(_) | Phase::Tied)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::AwaitingPick => write!(f, "AwaitingPick"),
            Phase::AwaitingInsertion => write!(f, "AwaitingInsertion"),
            Phase::AwaitingCommit => write!(f, "AwaitingCommit"),
            Phase::Won(p) => write!(f, "Won({p})"),
            Phase::Tied => write!(f, "Tied"),
        }
    }
}

/// A complete turn: which cube was picked and where it went back in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub pick: Coord,
    pub slot: Slot,
}

impl Move {
    #[must_use]
    pub const fn new(pick: Coord, slot: Slot) -> Self {
        Self { pick, slot }
    }
}

/// A committed turn, kept in the match history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Turn count before the commit (0 for the opening move).
    pub turn: u32,
    /// The seat that moved.
    pub player: PlayerId,
    /// The move played.
    pub mv: Move,
}

/// Everything the engine mutates.
///
/// Owns its board exclusively. The pending pick is stored by coordinate,
/// not by reference into the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) players: PlayerMap<String>,
    pub(crate) turn_count: u32,
    pub(crate) active_mark: Mark,
    pub(crate) pending_pick: Option<Coord>,
    pub(crate) pending_target: Option<Slot>,
    pub(crate) result: Option<GameResult>,
    /// Persistent vector: cloning a state for a look-ahead is O(1).
    pub(crate) history: Vector<TurnRecord>,
}

impl GameState {
    /// Start a new match. `first` sits in seat 0 and moves first.
    ///
    /// # Errors
    ///
    /// Invalid board size, empty or identical identities.
    pub fn new(
        first: impl Into<String>,
        second: impl Into<String>,
        config: &GameConfig,
    ) -> Result<Self, ConfigError> {
        let players = PlayerMap::from_pair(first.into(), second.into());
        validate_players(&players)?;
        Ok(Self {
            board: Board::new(config.board_size)?,
            players,
            turn_count: 0,
            active_mark: Mark::for_turn(0),
            pending_pick: None,
            pending_target: None,
            result: None,
            history: Vector::new(),
        })
    }

    /// Current phase, derived from pending state and result.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match (self.result, self.pending_pick, self.pending_target) {
            (Some(GameResult::Winner(p)), _, _) => Phase::Won(p),
            (Some(GameResult::Tie), _, _) => Phase::Tied,
            (None, None, _) => Phase::AwaitingPick,
            (None, Some(_), None) => Phase::AwaitingInsertion,
            (None, Some(_), Some(_)) => Phase::AwaitingCommit,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<String> {
        &self.players
    }

    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    #[must_use]
    pub fn active_mark(&self) -> Mark {
        self.active_mark
    }

    /// Seat to move.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        PlayerId::for_turn(self.turn_count)
    }

    #[must_use]
    pub fn pending_pick(&self) -> Option<Coord> {
        self.pending_pick
    }

    #[must_use]
    pub fn pending_target(&self) -> Option<Slot> {
        self.pending_target
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }
}

pub(crate) fn validate_players(players: &PlayerMap<String>) -> Result<(), ConfigError> {
    let [first, second] = [&players[PlayerId::new(0)], &players[PlayerId::new(1)]];
    if first.is_empty() || second.is_empty() {
        return Err(ConfigError::EmptyPlayer);
    }
    if first == second {
        return Err(ConfigError::DuplicatePlayer(first.clone()));
    }
    Ok(())
}
