//! The turn state machine.
//!
//! A turn is three requests from the player to move:
//!
//! 1. [`GameEngine::compute_insertion_candidates`] lifts an edge cube, claims
//!    it with the mover's mark and returns the legal insertion slots.
//! 2. [`GameEngine::queue_insertion`] chooses one of those slots.
//! 3. [`GameEngine::commit_turn`] applies the cascade shift, passes the turn,
//!    checks for a win and notifies the observer.
//!
//! Steps 1 and 2 can be backed out with [`GameEngine::cancel_pick`] and
//! [`GameEngine::cancel_insertion`]. Every rejected request leaves the state
//! exactly as it was.

use tracing::{debug, info, instrument};

use super::observer::StateObserver;
use super::state::{GameState, Move, Phase, TurnRecord};
use crate::board::{Board, Coord, Mark, Slot};
use crate::core::{GameConfig, PlayerId};
use crate::error::{ConfigError, MoveError, SnapshotError};
use crate::rules::{cascade_shift, evaluate, insertion_candidates, Candidates, GameResult};
use crate::snapshot::Snapshot;

/// A single Quixo match.
pub struct GameEngine {
    state: GameState,
    observer: Option<Box<dyn StateObserver>>,
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("state", &self.state)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl GameEngine {
    /// Create a match between two identities. `first` plays X and moves first.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an invalid board size or bad identities.
    #[instrument(skip_all, fields(board_size = config.board_size))]
    pub fn new(
        first: impl Into<String>,
        second: impl Into<String>,
        config: &GameConfig,
    ) -> Result<Self, ConfigError> {
        let state = GameState::new(first, second, config)?;
        info!(
            first = %state.players[PlayerId::new(0)],
            second = %state.players[PlayerId::new(1)],
            "Created match"
        );
        Ok(Self {
            state,
            observer: None,
        })
    }

    /// Rebuild an engine from a snapshot, resuming its phase.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` if the snapshot is inconsistent.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, SnapshotError> {
        Ok(Self {
            state: GameState::from_snapshot(snapshot)?,
            observer: None,
        })
    }

    /// Attach the persistence hook. Replaces any previous observer.
    #[must_use]
    pub fn with_observer(mut self, observer: impl StateObserver + 'static) -> Self {
        self.set_observer(observer);
        self
    }

    pub fn set_observer(&mut self, observer: impl StateObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    // === Turn operations ===

    /// Pick the edge cube at `at` for the player to move.
    ///
    /// On success the cube is claimed with the mover's mark (the old mark is
    /// remembered for [`GameEngine::cancel_pick`]) and the legal insertion
    /// slots are returned.
    ///
    /// # Errors
    ///
    /// Checked in order: `GameOver`, `WrongPhase`, `NotYourTurn`,
    /// `OutOfBounds`, `NotPickable`, `WrongOwner`.
    #[instrument(skip(self), level = "debug")]
    pub fn compute_insertion_candidates(
        &mut self,
        acting: &str,
        at: Coord,
    ) -> Result<Candidates, MoveError> {
        self.require_phase(Phase::AwaitingPick)
            .and_then(|()| self.require_turn(acting))
            .and_then(|()| self.check_pickable(at))
            .inspect_err(|e| debug!(error = %e, "Pick rejected"))?;

        let active = self.state.active_mark;
        if let Some(cell) = self.state.board.cell_mut(at) {
            cell.set_mark(active);
        }
        self.state.pending_pick = Some(at);

        let candidates = insertion_candidates(at, self.state.board.size());
        debug!(candidates = ?candidates.as_slice(), "Picked {at}");
        Ok(candidates)
    }

    /// Put the lifted cube back and return to `AwaitingPick`.
    ///
    /// # Errors
    ///
    /// `GameOver` or `WrongPhase` unless a pick is pending without a target.
    #[instrument(skip(self), level = "debug")]
    pub fn cancel_pick(&mut self) -> Result<(), MoveError> {
        self.require_phase(Phase::AwaitingInsertion)?;
        if let Some(at) = self.state.pending_pick.take() {
            if let Some(cell) = self.state.board.cell_mut(at) {
                cell.revert_mark();
            }
            debug!("Cancelled pick at {at}");
        }
        Ok(())
    }

    /// Choose where the lifted cube goes back in.
    ///
    /// # Errors
    ///
    /// `GameOver`, `WrongPhase`, or `IllegalDrop` when `slot` is not a
    /// candidate of the pending pick.
    #[instrument(skip(self), level = "debug")]
    pub fn queue_insertion(&mut self, slot: Slot) -> Result<(), MoveError> {
        self.require_phase(Phase::AwaitingInsertion)
            .and_then(|()| {
                if self.candidates().contains(&slot) {
                    Ok(())
                } else {
                    Err(MoveError::IllegalDrop(slot))
                }
            })
            .inspect_err(|e| debug!(error = %e, "Insertion rejected"))?;

        self.state.pending_target = Some(slot);
        Ok(())
    }

    /// Drop the queued target, keeping the pick.
    ///
    /// # Errors
    ///
    /// `GameOver` or `WrongPhase` unless a target is queued.
    #[instrument(skip(self), level = "debug")]
    pub fn cancel_insertion(&mut self) -> Result<(), MoveError> {
        self.require_phase(Phase::AwaitingCommit)?;
        self.state.pending_target = None;
        Ok(())
    }

    /// Apply the queued move and pass the turn.
    ///
    /// Returns the phase after the commit: `AwaitingPick` for the next
    /// player, or `Won`/`Tied` if the shift completed a line.
    ///
    /// # Errors
    ///
    /// `GameOver` or `WrongPhase` unless a move is queued.
    #[instrument(skip(self), fields(turn = self.state.turn_count))]
    pub fn commit_turn(&mut self) -> Result<Phase, MoveError> {
        self.require_phase(Phase::AwaitingCommit)?;
        let (Some(pick), Some(slot)) = (self.state.pending_pick, self.state.pending_target) else {
            return Err(MoveError::WrongPhase {
                expected: Phase::AwaitingCommit,
                actual: self.phase(),
            });
        };

        let mover = self.state.current_player();
        let mark = self.state.active_mark;
        if !cascade_shift(&mut self.state.board, pick, slot, mark) {
            return Err(MoveError::IllegalDrop(slot));
        }
        if let Some(cell) = self.state.board.cell_mut(pick) {
            cell.forget_previous();
        }

        self.state.history.push_back(TurnRecord {
            turn: self.state.turn_count,
            player: mover,
            mv: Move::new(pick, slot),
        });
        self.state.turn_count += 1;
        self.state.active_mark = Mark::of(mover.opponent());
        self.state.pending_pick = None;
        self.state.pending_target = None;
        self.state.result = evaluate(&self.state.board);

        info!(player = %mover, %pick, %slot, "Committed turn");
        debug!(board = %self.state.board, "Board after commit");
        match self.state.result {
            Some(GameResult::Winner(winner)) => {
                info!(winner = %self.identity(winner), "Game won");
            }
            Some(GameResult::Tie) => info!("Game tied"),
            None => {}
        }

        self.notify();
        Ok(self.phase())
    }

    /// Pick, queue and commit in one call.
    ///
    /// If the slot is rejected the pick is cancelled, so a failed `play`
    /// leaves the engine unchanged.
    ///
    /// # Errors
    ///
    /// Any error from the three underlying steps.
    pub fn play(&mut self, acting: &str, mv: Move) -> Result<Phase, MoveError> {
        self.compute_insertion_candidates(acting, mv.pick)?;
        if let Err(e) = self.queue_insertion(mv.slot) {
            self.cancel_pick()?;
            return Err(e);
        }
        self.commit_turn()
    }

    /// Start over with the same players: empty board, X to move.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.state.board.clear();
        self.state.turn_count = 0;
        self.state.active_mark = Mark::for_turn(0);
        self.state.pending_pick = None;
        self.state.pending_target = None;
        self.state.result = None;
        self.state.history.clear();
        info!("Match reset");
        self.notify();
    }

    // === Queries ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player()
    }

    /// Identity of the player to move.
    #[must_use]
    pub fn current_identity(&self) -> &str {
        self.identity(self.current_player())
    }

    #[must_use]
    pub fn identity(&self, player: PlayerId) -> &str {
        &self.state.players[player]
    }

    /// Seat held by `identity`, if it plays in this match.
    #[must_use]
    pub fn seat_of(&self, identity: &str) -> Option<PlayerId> {
        self.state.players.position(|p| p == identity)
    }

    #[must_use]
    pub fn active_mark(&self) -> Mark {
        self.state.active_mark
    }

    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.state.turn_count
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    #[must_use]
    pub fn pending_pick(&self) -> Option<Coord> {
        self.state.pending_pick
    }

    #[must_use]
    pub fn pending_target(&self) -> Option<Slot> {
        self.state.pending_target
    }

    /// Insertion slots of the pending pick (empty when nothing is picked).
    #[must_use]
    pub fn candidates(&self) -> Candidates {
        self.state
            .pending_pick
            .map(|at| insertion_candidates(at, self.state.board.size()))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.state.result
    }

    #[must_use]
    pub fn history(&self) -> &im::Vector<TurnRecord> {
        &self.state.history
    }

    /// Every complete move open to the player to move.
    ///
    /// Empty unless the engine is awaiting a pick. Ordered by cell
    /// (row-major), then by candidate order.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.phase() != Phase::AwaitingPick {
            return Vec::new();
        }
        let active = self.state.active_mark;
        let size = self.state.board.size();
        self.state
            .board
            .cells()
            .filter(|cell| cell.is_edge() && (cell.mark().is_empty() || cell.mark() == active))
            .flat_map(|cell| {
                let at = cell.position();
                insertion_candidates(at, size)
                    .into_iter()
                    .map(move |slot| Move::new(at, slot))
            })
            .collect()
    }

    // === Persistence ===

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state.to_snapshot()
    }

    /// Replace the match state with a snapshot, keeping the observer.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` and leaves the engine unchanged if the
    /// snapshot is inconsistent.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        self.state = GameState::from_snapshot(snapshot)?;
        Ok(())
    }

    // === Internals ===

    fn require_phase(&self, expected: Phase) -> Result<(), MoveError> {
        let actual = self.phase();
        if actual.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if actual != expected {
            return Err(MoveError::WrongPhase { expected, actual });
        }
        Ok(())
    }

    fn require_turn(&self, acting: &str) -> Result<(), MoveError> {
        let current = self.current_identity();
        if acting == current {
            Ok(())
        } else {
            Err(MoveError::NotYourTurn {
                acting: acting.to_owned(),
                current: current.to_owned(),
            })
        }
    }

    fn check_pickable(&self, at: Coord) -> Result<(), MoveError> {
        let cell = self.state.board.cell(at).ok_or(MoveError::OutOfBounds {
            row: at.row,
            col: at.col,
        })?;
        if !cell.is_edge() {
            return Err(MoveError::NotPickable(at));
        }
        let mark = cell.mark();
        if !mark.is_empty() && mark != self.state.active_mark {
            return Err(MoveError::WrongOwner(at));
        }
        Ok(())
    }

    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            let snapshot = self.state.to_snapshot();
            observer.on_state_changed(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn engine() -> GameEngine {
        GameEngine::new("alice", "bob", &GameConfig::default()).unwrap()
    }

    #[test]
    fn test_new_engine() {
        let engine = engine();
        assert_eq!(engine.phase(), Phase::AwaitingPick);
        assert_eq!(engine.current_identity(), "alice");
        assert_eq!(engine.active_mark(), Mark::X);
        assert_eq!(engine.seat_of("bob"), Some(PlayerId::new(1)));
        assert_eq!(engine.seat_of("carol"), None);
    }

    #[test]
    fn test_pick_claims_cell() {
        let mut engine = engine();
        let candidates = engine
            .compute_insertion_candidates("alice", Coord::new(1, 3))
            .unwrap();

        assert_eq!(candidates.len(), 3);
        assert_eq!(engine.phase(), Phase::AwaitingInsertion);
        assert_eq!(engine.pending_pick(), Some(Coord::new(1, 3)));
        let cell = engine.board().cell(Coord::new(1, 3)).unwrap();
        assert_eq!(cell.mark(), Mark::X);
        assert_eq!(cell.previous_mark(), Some(Mark::Empty));
        assert_eq!(engine.candidates(), candidates);
    }

    #[test]
    fn test_pick_rejections() {
        let mut engine = engine();

        assert!(matches!(
            engine.compute_insertion_candidates("bob", Coord::new(1, 1)),
            Err(MoveError::NotYourTurn { .. })
        ));
        assert_eq!(
            engine.compute_insertion_candidates("alice", Coord::new(3, 3)),
            Err(MoveError::NotPickable(Coord::new(3, 3)))
        );
        assert_eq!(
            engine.compute_insertion_candidates("alice", Coord::new(0, 1)),
            Err(MoveError::OutOfBounds { row: 0, col: 1 })
        );
        assert_eq!(
            engine.compute_insertion_candidates("alice", Coord::new(6, 6)),
            Err(MoveError::OutOfBounds { row: 6, col: 6 })
        );
        assert_eq!(engine.phase(), Phase::AwaitingPick);
        assert!(engine.board().cells().all(|c| c.previous_mark().is_none()));
    }

    #[test]
    fn test_wrong_owner() {
        let mut engine = engine();
        engine
            .play("alice", Move::new(Coord::new(1, 1), Slot::new(6, 1)))
            .unwrap();

        // (5, 1) now holds X; bob may not lift it.
        assert_eq!(
            engine.compute_insertion_candidates("bob", Coord::new(5, 1)),
            Err(MoveError::WrongOwner(Coord::new(5, 1)))
        );
        assert!(engine
            .compute_insertion_candidates("bob", Coord::new(5, 5))
            .is_ok());
    }

    #[test]
    fn test_second_pick_is_wrong_phase() {
        let mut engine = engine();
        engine
            .compute_insertion_candidates("alice", Coord::new(1, 1))
            .unwrap();
        assert_eq!(
            engine.compute_insertion_candidates("alice", Coord::new(1, 2)),
            Err(MoveError::WrongPhase {
                expected: Phase::AwaitingPick,
                actual: Phase::AwaitingInsertion,
            })
        );
    }

    #[test]
    fn test_cancel_pick_restores() {
        let mut engine = engine();
        engine
            .compute_insertion_candidates("alice", Coord::new(2, 1))
            .unwrap();
        engine.cancel_pick().unwrap();

        assert_eq!(engine.phase(), Phase::AwaitingPick);
        assert_eq!(engine.turn_count(), 0);
        let cell = engine.board().cell(Coord::new(2, 1)).unwrap();
        assert_eq!(cell.mark(), Mark::Empty);
        assert_eq!(cell.previous_mark(), None);

        assert!(matches!(
            engine.cancel_pick(),
            Err(MoveError::WrongPhase { .. })
        ));
    }

    #[test]
    fn test_queue_and_cancel_insertion() {
        let mut engine = engine();
        engine
            .compute_insertion_candidates("alice", Coord::new(1, 1))
            .unwrap();

        assert_eq!(
            engine.queue_insertion(Slot::new(0, 1)),
            Err(MoveError::IllegalDrop(Slot::new(0, 1)))
        );
        assert_eq!(engine.phase(), Phase::AwaitingInsertion);

        engine.queue_insertion(Slot::new(1, 6)).unwrap();
        assert_eq!(engine.phase(), Phase::AwaitingCommit);
        assert_eq!(engine.pending_target(), Some(Slot::new(1, 6)));

        // A pick can't be cancelled while a target is queued.
        assert!(engine.cancel_pick().is_err());

        engine.cancel_insertion().unwrap();
        assert_eq!(engine.phase(), Phase::AwaitingInsertion);
        assert_eq!(engine.pending_target(), None);
    }

    #[test]
    fn test_commit_passes_turn() {
        let mut engine = engine();
        let phase = engine
            .play("alice", Move::new(Coord::new(1, 1), Slot::new(1, 6)))
            .unwrap();

        assert_eq!(phase, Phase::AwaitingPick);
        assert_eq!(engine.turn_count(), 1);
        assert_eq!(engine.current_identity(), "bob");
        assert_eq!(engine.active_mark(), Mark::O);
        assert_eq!(engine.board().mark_at(1, 5), Some(Mark::X));
        assert_eq!(engine.board().count(Mark::X), 1);
        assert!(engine.board().cells().all(|c| c.previous_mark().is_none()));

        let record = engine.history()[0];
        assert_eq!(record.turn, 0);
        assert_eq!(record.player, PlayerId::new(0));
        assert_eq!(record.mv.slot, Slot::new(1, 6));
    }

    #[test]
    fn test_commit_without_target() {
        let mut engine = engine();
        assert!(matches!(
            engine.commit_turn(),
            Err(MoveError::WrongPhase {
                expected: Phase::AwaitingCommit,
                actual: Phase::AwaitingPick,
            })
        ));
    }

    #[test]
    fn test_play_rolls_back_bad_slot() {
        let mut engine = engine();
        let before = engine.state().clone();

        let err = engine
            .play("alice", Move::new(Coord::new(1, 2), Slot::new(0, 2)))
            .unwrap_err();

        assert_eq!(err, MoveError::IllegalDrop(Slot::new(0, 2)));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_legal_moves() {
        let engine = engine();
        // 4 corners × 2 + 12 straight edge cells × 3
        assert_eq!(engine.legal_moves().len(), 44);

        let mut picked = engine;
        picked
            .compute_insertion_candidates("alice", Coord::new(1, 1))
            .unwrap();
        assert!(picked.legal_moves().is_empty());
    }

    #[test]
    fn test_game_over_rejects_moves() {
        let config = GameConfig::default().with_board_size(3);
        let mut engine = GameEngine::new("alice", "bob", &config).unwrap();
        // Both push up their outer columns from the top; X fills column 1 first.
        let x_push = Move::new(Coord::new(1, 1), Slot::new(4, 1));
        let o_push = Move::new(Coord::new(1, 3), Slot::new(4, 3));

        engine.play("alice", x_push).unwrap();
        engine.play("bob", o_push).unwrap();
        engine.play("alice", x_push).unwrap();
        engine.play("bob", o_push).unwrap();
        let phase = engine.play("alice", x_push).unwrap();

        assert_eq!(phase, Phase::Won(PlayerId::new(0)));
        assert_eq!(engine.result(), Some(GameResult::Winner(PlayerId::new(0))));
        assert!(engine.legal_moves().is_empty());
        assert_eq!(
            engine.compute_insertion_candidates("bob", Coord::new(1, 3)),
            Err(MoveError::GameOver)
        );
        assert_eq!(engine.cancel_pick(), Err(MoveError::GameOver));
    }

    #[test]
    fn test_observer_called_on_commit_and_reset() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut engine = engine().with_observer(move |s: &Snapshot| {
            sink.lock().unwrap().push(s.turn_count);
        });

        engine
            .compute_insertion_candidates("alice", Coord::new(1, 1))
            .unwrap();
        engine.cancel_pick().unwrap();
        assert!(seen.lock().unwrap().is_empty());

        engine
            .play("alice", Move::new(Coord::new(1, 1), Slot::new(6, 1)))
            .unwrap();
        engine.reset();

        assert_eq!(*seen.lock().unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        engine
            .play("alice", Move::new(Coord::new(1, 1), Slot::new(6, 1)))
            .unwrap();
        engine
            .compute_insertion_candidates("bob", Coord::new(1, 5))
            .unwrap();

        engine.reset();

        assert_eq!(engine.phase(), Phase::AwaitingPick);
        assert_eq!(engine.turn_count(), 0);
        assert_eq!(engine.current_identity(), "alice");
        assert_eq!(engine.board().count(Mark::Empty), 25);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_engine_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<GameEngine>();
    }
}
