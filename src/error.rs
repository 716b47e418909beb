//! Error types.
//!
//! - `ConfigError`: a match cannot be created (bad board size, bad players,
//!   unreadable config). Fatal for that construction attempt.
//! - `MoveError`: a move request was rejected. Recoverable; the engine state
//!   is unchanged.
//! - `SnapshotError`: a snapshot could not be decoded into a consistent state.
//!   Reported as-is, never repaired.

use std::path::PathBuf;

use crate::board::{Coord, Mark, Slot};
use crate::core::PlayerId;
use crate::engine::Phase;
use crate::rules::GameResult;

/// Errors raised while building a board or loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("board size {size} is below the minimum of {min}")]
    BoardTooSmall { size: usize, min: usize },

    #[error("board size {size} exceeds the maximum of {max}")]
    BoardTooLarge { size: usize, max: usize },

    #[error("both seats are held by {0:?}")]
    DuplicatePlayer(String),

    #[error("player identity must not be empty")]
    EmptyPlayer,

    #[error("{0:?} is not seated in this match")]
    NotAPlayer(String),

    #[error("snapshot is for {received:?}, but the current match is {current:?}")]
    ForeignMatch {
        current: Vec<String>,
        received: Vec<String>,
    },

    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// A rejected move request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is over")]
    GameOver,

    #[error("expected phase {expected}, engine is {actual}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("not your turn: {acting:?} acted but {current:?} is to move")]
    NotYourTurn { acting: String, current: String },

    #[error("no playable cell at ({row}, {col})")]
    OutOfBounds { row: u8, col: u8 },

    #[error("not pickable: {0} is not an edge cell")]
    NotPickable(Coord),

    #[error("wrong owner: {0} carries the opponent's mark")]
    WrongOwner(Coord),

    #[error("not a legal drop point: {0}")]
    IllegalDrop(Slot),
}

/// A snapshot failed to decode or describes an impossible state.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary decode error: {0}")]
    Binary(#[from] bincode::Error),

    #[error("failed to access snapshot file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("expected {expected} players, found {actual}")]
    PlayerCount { expected: usize, actual: usize },

    #[error("expected {expected} cells, found {actual}")]
    CellCount { expected: usize, actual: usize },

    #[error("cell #{index} is at {actual}, expected {expected}")]
    CellPosition {
        index: usize,
        expected: Coord,
        actual: Coord,
    },

    #[error("pending pick {0} is not a playable cell")]
    PickMissing(Coord),

    #[error("pending pick {0} is not an edge cell")]
    PickNotEdge(Coord),

    #[error("picked cell {at} holds {mark:?}, expected the active mark {active:?}")]
    PickUnclaimed { at: Coord, mark: Mark, active: Mark },

    #[error("picked cell {at} was previously owned by the opponent ({previous:?})")]
    PickWrongOwner { at: Coord, previous: Mark },

    #[error("insertion target {0} is recorded without a pending pick")]
    TargetWithoutPick(Slot),

    #[error("insertion target {target} is not a legal drop point for {pick}")]
    TargetNotCandidate { pick: Coord, target: Slot },

    #[error("active mark {mark:?} disagrees with turn count {turn_count}")]
    ParityMismatch { turn_count: u32, mark: Mark },

    #[error("finished game still has a pending pick or insertion")]
    ResultWithPending,

    #[error("recorded result {recorded:?} disagrees with the board ({board:?})")]
    ResultMismatch {
        recorded: Option<GameResult>,
        board: Option<GameResult>,
    },

    #[error("history holds {actual} turns but only {turn_count} were played")]
    HistoryLength { turn_count: u32, actual: usize },

    #[error("history record #{index} is numbered turn {turn}, expected {expected}")]
    HistoryOutOfOrder { index: usize, turn: u32, expected: u32 },

    #[error("history record #{index} credits {player}, but that turn belongs to {expected}")]
    HistorySeat {
        index: usize,
        player: PlayerId,
        expected: PlayerId,
    },

    #[error("history record #{index} drops {pick} at {slot}, which is not a legal drop point")]
    HistoryIllegalMove { index: usize, pick: Coord, slot: Slot },
}

/// Crate-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Crate-level result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_reasons() {
        let at = Coord::new(3, 3);
        assert_eq!(
            MoveError::NotPickable(at).to_string(),
            "not pickable: (3, 3) is not an edge cell"
        );
        assert_eq!(
            MoveError::WrongOwner(Coord::new(1, 2)).to_string(),
            "wrong owner: (1, 2) carries the opponent's mark"
        );
        assert_eq!(
            MoveError::IllegalDrop(Slot::new(0, 2)).to_string(),
            "not a legal drop point: (0, 2)"
        );
    }

    #[test]
    fn test_not_your_turn_display() {
        let err = MoveError::NotYourTurn {
            acting: "bob".into(),
            current: "alice".into(),
        };
        assert_eq!(
            err.to_string(),
            "not your turn: \"bob\" acted but \"alice\" is to move"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::BoardTooSmall { size: 2, min: 3 };
        assert_eq!(err.to_string(), "board size 2 is below the minimum of 3");
    }

    #[test]
    fn test_snapshot_config_display() {
        let err: SnapshotError = ConfigError::EmptyPlayer.into();
        assert_eq!(
            err.to_string(),
            "invalid configuration: player identity must not be empty"
        );

        let err: SnapshotError = ConfigError::BoardTooLarge { size: 40, max: 32 }.into();
        assert_eq!(
            err.to_string(),
            "invalid configuration: board size 40 exceeds the maximum of 32"
        );
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: Error = MoveError::GameOver.into();
        assert!(matches!(err, Error::Move(MoveError::GameOver)));
        assert_eq!(err.to_string(), "game is over");
    }
}
