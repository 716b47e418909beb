//! Player seats and per-seat data storage.
//!
//! ## PlayerId
//!
//! A seat at the table: seat 0 moves first and plays `X`, seat 1 plays `O`.
//! The seat to move is always `turn_count % 2`.
//!
//! ## PlayerMap
//!
//! Fixed two-entry storage indexed by `PlayerId`. The engine keeps player
//! identities (user names) in a `PlayerMap<String>`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats in a match.
pub const PLAYER_COUNT: usize = 2;

/// Seat identifier (0 or 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat to move after `turn_count` committed turns.
    ///
    /// ```
    /// use quixo_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::for_turn(0), PlayerId::new(0));
    /// assert_eq!(PlayerId::for_turn(7), PlayerId::new(1));
    /// ```
    #[must_use]
    pub const fn for_turn(turn_count: u32) -> Self {
        Self((turn_count % PLAYER_COUNT as u32) as u8)
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - (self.0 % 2))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use quixo_engine::core::{PlayerId, PlayerMap};
///
/// let mut names = PlayerMap::from_pair("alice".to_string(), "bob".to_string());
/// assert_eq!(names[PlayerId::new(1)], "bob");
///
/// names[PlayerId::new(1)] = "carol".to_string();
/// assert_eq!(names[PlayerId::new(1)], "carol");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create a map from the seat 0 and seat 1 values.
    pub fn from_pair(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Find the seat whose value matches the predicate.
    pub fn position(&self, mut pred: impl FnMut(&T) -> bool) -> Option<PlayerId> {
        self.iter().find(|(_, v)| pred(v)).map(|(p, _)| p)
    }

    /// Values in seat order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
