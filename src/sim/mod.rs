//! Random playouts.
//!
//! Plays uniformly random legal moves for whoever is to move. Used by the
//! property tests and the benchmark, and handy as a trivial opponent.

use tracing::{debug, instrument};

use crate::core::GameRng;
use crate::engine::{GameEngine, Phase};
use crate::error::MoveError;
use crate::rules::GameResult;

pub use crate::engine::Move;

/// Play one random legal move for the player to move.
///
/// Returns `Ok(None)` when no move is available (the engine is not awaiting
/// a pick, or the game is over).
///
/// # Errors
///
/// Propagates a rejection from the engine, which would mean `legal_moves`
/// and the turn operations disagree.
pub fn random_move(engine: &mut GameEngine, rng: &mut GameRng) -> Result<Option<Move>, MoveError> {
    let moves = engine.legal_moves();
    let Some(&mv) = moves.get(rng.gen_index(moves.len())) else {
        return Ok(None);
    };
    let acting = engine.current_identity().to_owned();
    engine.play(&acting, mv)?;
    Ok(Some(mv))
}

/// Play random moves until the game ends or `max_turns` commits have been
/// made (0 means no limit).
///
/// Returns the result if the game ended.
///
/// # Errors
///
/// See [`random_move`].
#[instrument(skip(engine, rng), fields(seed = rng.seed()))]
pub fn random_playout(
    engine: &mut GameEngine,
    rng: &mut GameRng,
    max_turns: u32,
) -> Result<Option<GameResult>, MoveError> {
    let mut turns = 0;
    while engine.phase() == Phase::AwaitingPick {
        if max_turns > 0 && turns >= max_turns {
            break;
        }
        if random_move(engine, rng)?.is_none() {
            break;
        }
        turns += 1;
    }
    debug!(turns, result = ?engine.result(), "Playout finished");
    Ok(engine.result())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    fn engine(size: usize) -> GameEngine {
        GameEngine::new("a", "b", &GameConfig::default().with_board_size(size)).unwrap()
    }

    #[test]
    fn test_random_move_commits() {
        let mut engine = engine(5);
        let mut rng = GameRng::new(1);

        let mv = random_move(&mut engine, &mut rng).unwrap().unwrap();
        assert_eq!(engine.turn_count(), 1);
        assert_eq!(engine.history()[0].mv, mv);
    }

    #[test]
    fn test_playout_respects_limit() {
        let mut engine = engine(7);
        let mut rng = GameRng::new(3);

        random_playout(&mut engine, &mut rng, 4).unwrap();
        assert!(engine.turn_count() <= 4);
    }

    #[test]
    fn test_playout_is_deterministic() {
        let mut first = engine(4);
        let mut second = engine(4);

        random_playout(&mut first, &mut GameRng::new(99), 50).unwrap();
        random_playout(&mut second, &mut GameRng::new(99), 50).unwrap();

        assert_eq!(first.snapshot(), second.snapshot());
    }

    #[test]
    fn test_small_board_finishes() {
        // 3×3 lines are short; a random game ends long before the cap.
        let mut engine = engine(3);
        let result = random_playout(&mut engine, &mut GameRng::new(5), 10_000).unwrap();

        assert!(result.is_some());
        assert!(engine.phase().is_terminal());
    }

    #[test]
    fn test_no_move_mid_turn() {
        let mut engine = engine(5);
        engine
            .compute_insertion_candidates("a", crate::board::Coord::new(1, 1))
            .unwrap();
        assert_eq!(random_move(&mut engine, &mut GameRng::new(0)).unwrap(), None);
    }
}
