//! A local user's view of the lobby and their current match.

use tracing::{debug, info, instrument, warn};

use super::presence::PresenceDirectory;
use crate::core::GameConfig;
use crate::engine::GameEngine;
use crate::error::{ConfigError, Result};
use crate::snapshot::Snapshot;

/// One user: lobby presence plus at most one match.
#[derive(Debug)]
pub struct Session<P> {
    user: String,
    presence: P,
    game: Option<GameEngine>,
}

impl<P: PresenceDirectory> Session<P> {
    /// Create a session for `user`.
    ///
    /// # Errors
    ///
    /// `EmptyPlayer` for an empty identity.
    pub fn new(user: impl Into<String>, presence: P) -> Result<Self, ConfigError> {
        let user = user.into();
        if user.is_empty() {
            return Err(ConfigError::EmptyPlayer);
        }
        Ok(Self {
            user,
            presence,
            game: None,
        })
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub fn presence(&self) -> &P {
        &self.presence
    }

    #[instrument(skip(self), fields(user = %self.user))]
    pub fn go_online(&mut self) -> bool {
        let added = self.presence.add(&self.user);
        debug!(added, "Going online");
        added
    }

    #[instrument(skip(self), fields(user = %self.user))]
    pub fn go_offline(&mut self) -> bool {
        let removed = self.presence.remove(&self.user);
        debug!(removed, "Going offline");
        removed
    }

    /// Other users currently online.
    #[must_use]
    pub fn online_players(&self) -> Vec<String> {
        self.presence
            .list()
            .into_iter()
            .filter(|p| *p != self.user)
            .collect()
    }

    /// Start a match against `opponent`. The local user plays X and moves
    /// first. Any match in progress is dropped.
    ///
    /// # Errors
    ///
    /// Bad configuration, or `opponent` equal to the local user.
    #[instrument(skip(self, config), fields(user = %self.user))]
    pub fn start_match(&mut self, opponent: &str, config: &GameConfig) -> Result<&mut GameEngine> {
        let engine = GameEngine::new(self.user.clone(), opponent, config)?;
        if self.game.is_some() {
            warn!("Abandoning match in progress");
        }
        info!(opponent, "Match started");
        Ok(self.game.insert(engine))
    }

    /// Leave the current match and return to the lobby.
    pub fn end_match(&mut self) -> Option<GameEngine> {
        self.game.take()
    }

    #[must_use]
    pub fn game(&self) -> Option<&GameEngine> {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut GameEngine> {
        self.game.as_mut()
    }

    /// Whether the current match has the local user to move.
    ///
    /// Turn parity only: a finished match still reports whose turn it would
    /// have been.
    #[must_use]
    pub fn is_my_turn(&self) -> bool {
        self.game
            .as_ref()
            .is_some_and(|g| g.current_identity() == self.user)
    }

    /// Load a snapshot received from the other client.
    ///
    /// Replaces the current match state (keeping any observer), or opens the
    /// match if none is loaded. Returns whether it is now the local user's
    /// turn. While a match is loaded, only snapshots seating the same two
    /// players in the same order are accepted; call [`Session::end_match`]
    /// first to switch opponents.
    ///
    /// # Errors
    ///
    /// `NotAPlayer` if the local user is not seated in the snapshot,
    /// `ForeignMatch` if it belongs to a different match than the loaded
    /// one, or any snapshot validation error. The current match is untouched
    /// on error.
    #[instrument(skip(self, snapshot), fields(user = %self.user, turn = snapshot.turn_count))]
    pub fn receive_snapshot(&mut self, snapshot: &Snapshot) -> Result<bool> {
        if !snapshot.players.iter().any(|p| *p == self.user) {
            return Err(ConfigError::NotAPlayer(self.user.clone()).into());
        }
        match self.game.as_mut() {
            Some(engine) => {
                let current = engine.state().players().as_slice();
                if snapshot.players.as_slice() != current {
                    warn!(received = ?snapshot.players, "Snapshot for another match");
                    return Err(ConfigError::ForeignMatch {
                        current: current.to_vec(),
                        received: snapshot.players.clone(),
                    }
                    .into());
                }
                engine.restore(snapshot)?;
            }
            None => self.game = Some(GameEngine::from_snapshot(snapshot)?),
        }
        let mine = self.is_my_turn();
        debug!(mine, "Received snapshot");
        Ok(mine)
    }
}
