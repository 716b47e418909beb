//! Game rules: legal insertion slots, the cascade shift, win detection.
//!
//! Everything here is a pure function of a `Board` (plus the picked cell and
//! chosen slot). Turn order and pending state live in `engine`.

pub mod candidates;
pub mod shift;
pub mod win;

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

pub use candidates::{insertion_candidates, Candidates};
pub use shift::cascade_shift;
pub use win::{evaluate, line_owners, LineOwners};

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Only this seat completed a line.
    Winner(PlayerId),
    /// Both marks completed a line on the same commit.
    Tie,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Tie => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::new(1));
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));

        let tie = GameResult::Tie;
        assert!(!tie.is_winner(PlayerId::new(0)));
        assert!(!tie.is_winner(PlayerId::new(1)));
    }
}
