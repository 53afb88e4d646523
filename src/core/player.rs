//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe player number. Players are numbered from 1; the number 0 is
//! reserved for "nobody" in the board rendering.
//!
//! ## PlayerMap
//!
//! Efficient per-player data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::GammaError;

/// Player number, 1-based.
///
/// The first player is `PlayerId(1)`. `PlayerId(0)` is never a valid player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw player number (1-based).
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the 0-based storage slot for this player.
    ///
    /// Only meaningful for valid players (`id >= 1`).
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Check whether this ID names a player in a game of `player_count`.
    #[must_use]
    pub const fn is_valid(self, player_count: u32) -> bool {
        self.0 >= 1 && self.0 <= player_count
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use gamma::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(1));
    /// assert_eq!(players[3], PlayerId::new(4));
    /// ```
    pub fn all(player_count: u32) -> impl Iterator<Item = PlayerId> {
        (1..=player_count).map(PlayerId)
    }

    /// The player following this one in cyclic turn order.
    #[must_use]
    pub const fn next(self, player_count: u32) -> Self {
        if self.0 >= player_count {
            Self(1)
        } else {
            Self(self.0 + 1)
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per player.
/// Use `PlayerMap::new()` to create with a factory function,
/// or `PlayerMap::with_default()` to initialize all entries to `T::default()`.
///
/// ## Example
///
/// ```
/// use gamma::core::{PlayerId, PlayerMap};
///
/// let mut busy: PlayerMap<u64> = PlayerMap::new(4, |_| 0);
///
/// busy[PlayerId::new(2)] = 15;
/// assert_eq!(busy[PlayerId::new(2)], 15);
/// assert_eq!(busy[PlayerId::new(1)], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each player.
    pub fn new(player_count: u32, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");

        let data = PlayerId::all(player_count).map(factory).collect();

        Self { data }
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: u32) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Create a new PlayerMap with default values, reporting allocation
    /// failure instead of aborting.
    pub fn try_with_default(player_count: u32) -> Result<Self, GammaError>
    where
        T: Default,
    {
        if player_count == 0 {
            return Err(GammaError::ZeroPlayers);
        }

        let mut data = Vec::new();
        data.try_reserve_exact(player_count as usize)
            .map_err(|_| GammaError::OutOfMemory { what: "player table" })?;
        data.extend(PlayerId::all(player_count).map(|_| T::default()));

        Ok(Self { data })
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> u32 {
        self.data.len() as u32
    }

    /// Get a reference to a player's data, or `None` for an unknown player.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        if player.0 == 0 {
            return None;
        }
        self.data.get(player.index())
    }

    /// Get a mutable reference to a player's data, or `None` for an unknown player.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        if player.0 == 0 {
            return None;
        }
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u32 + 1), v))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.data.len() as u32)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
