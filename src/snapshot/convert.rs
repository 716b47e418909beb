//! Conversion between `GameState` and `Snapshot`.
//!
//! Loading is strict: any inconsistency is reported as a `SnapshotError`
//! and nothing is repaired. Checks run in a fixed order (shape, players,
//! cells, parity, pending pick, pending target, result, history) so the
//! first problem found is the one reported.

use im::Vector;
use tracing::{debug, warn};

use super::schema::{CellRecord, PickRecord, Snapshot};
use crate::board::{Board, Coord, Mark};
use crate::core::{PlayerId, PlayerMap, PLAYER_COUNT};
use crate::engine::state::validate_players;
use crate::engine::{GameState, Move, TurnRecord};
use crate::error::SnapshotError;
use crate::rules::{evaluate, insertion_candidates};

impl GameState {
    /// Capture the full state.
    #[must_use]
    pub fn to_snapshot(&self) -> Snapshot {
        let cells = self
            .board
            .cells()
            .map(|cell| CellRecord {
                row: cell.position().row,
                col: cell.position().col,
                mark: cell.mark(),
            })
            .collect();

        let pending_pick = self.pending_pick.map(|at| PickRecord {
            at,
            previous: self
                .board
                .cell(at)
                .and_then(|cell| cell.previous_mark())
                .unwrap_or_default(),
        });

        Snapshot {
            board_size: usize::from(self.board.size()),
            cells,
            players: self.players.as_slice().to_vec(),
            turn_count: self.turn_count,
            active_mark: self.active_mark,
            pending_pick,
            pending_target: self.pending_target,
            result: self.result,
            history: self.history.iter().copied().collect(),
        }
    }

    /// Rebuild a state from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, SnapshotError> {
        let state = load(snapshot).inspect_err(|e| warn!(error = %e, "Rejected snapshot"))?;
        debug!(turn = state.turn_count, phase = %state.phase(), "Loaded snapshot");
        Ok(state)
    }
}

fn load(snapshot: &Snapshot) -> Result<GameState, SnapshotError> {
    let mut board = Board::new(snapshot.board_size)?;
    let size = board.size();

    let players = match snapshot.players.as_slice() {
        [first, second] => PlayerMap::from_pair(first.clone(), second.clone()),
        other => {
            return Err(SnapshotError::PlayerCount {
                expected: PLAYER_COUNT,
                actual: other.len(),
            })
        }
    };
    validate_players(&players)?;

    let expected_cells = snapshot.board_size * snapshot.board_size;
    if snapshot.cells.len() != expected_cells {
        return Err(SnapshotError::CellCount {
            expected: expected_cells,
            actual: snapshot.cells.len(),
        });
    }
    for (index, (cell, record)) in board.cells_mut().zip(&snapshot.cells).enumerate() {
        let actual = Coord::new(record.row, record.col);
        if cell.position() != actual {
            return Err(SnapshotError::CellPosition {
                index,
                expected: cell.position(),
                actual,
            });
        }
        cell.put_mark(record.mark);
    }

    let active = snapshot.active_mark;
    if active != Mark::for_turn(snapshot.turn_count) {
        return Err(SnapshotError::ParityMismatch {
            turn_count: snapshot.turn_count,
            mark: active,
        });
    }

    if let Some(PickRecord { at, previous }) = snapshot.pending_pick {
        let cell = board.cell_mut(at).ok_or(SnapshotError::PickMissing(at))?;
        if !cell.is_edge() {
            return Err(SnapshotError::PickNotEdge(at));
        }
        if cell.mark() != active {
            return Err(SnapshotError::PickUnclaimed {
                at,
                mark: cell.mark(),
                active,
            });
        }
        if !previous.is_empty() && previous != active {
            return Err(SnapshotError::PickWrongOwner { at, previous });
        }
        cell.restore_previous(previous);
    }
    let pending_pick = snapshot.pending_pick.map(|p| p.at);

    if let Some(target) = snapshot.pending_target {
        let pick = pending_pick.ok_or(SnapshotError::TargetWithoutPick(target))?;
        if !insertion_candidates(pick, size).contains(&target) {
            return Err(SnapshotError::TargetNotCandidate { pick, target });
        }
    }

    if pending_pick.is_none() {
        let on_board = evaluate(&board);
        if on_board != snapshot.result {
            return Err(SnapshotError::ResultMismatch {
                recorded: snapshot.result,
                board: on_board,
            });
        }
    } else if snapshot.result.is_some() {
        return Err(SnapshotError::ResultWithPending);
    }

    check_history(&snapshot.history, snapshot.turn_count, size)?;

    Ok(GameState {
        board,
        players,
        turn_count: snapshot.turn_count,
        active_mark: active,
        pending_pick,
        pending_target: snapshot.pending_target,
        result: snapshot.result,
        history: snapshot.history.iter().copied().collect::<Vector<_>>(),
    })
}

/// History records must be consecutive turns ending with the last commit,
/// each played by the seat whose turn it was, each a legal pick and drop.
///
/// The history may be a tail of the match: version 1 snapshots carry none,
/// so a match resumed from one only records the turns played since.
fn check_history(history: &[TurnRecord], turn_count: u32, size: u8) -> Result<(), SnapshotError> {
    let first = u32::try_from(history.len())
        .ok()
        .and_then(|len| turn_count.checked_sub(len))
        .ok_or(SnapshotError::HistoryLength {
            turn_count,
            actual: history.len(),
        })?;

    for (index, record) in history.iter().enumerate() {
        let expected = first + index as u32;
        if record.turn != expected {
            return Err(SnapshotError::HistoryOutOfOrder {
                index,
                turn: record.turn,
                expected,
            });
        }
        let seat = PlayerId::for_turn(record.turn);
        if record.player != seat {
            return Err(SnapshotError::HistorySeat {
                index,
                player: record.player,
                expected: seat,
            });
        }
        let Move { pick, slot } = record.mv;
        if !insertion_candidates(pick, size).contains(&slot) {
            return Err(SnapshotError::HistoryIllegalMove { index, pick, slot });
        }
    }
    Ok(())
}
