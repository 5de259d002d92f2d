//! # League — In-Memory Player Collection
//!
//! Holds every [`Player`] tracked by a store, in insertion order, and answers
//! lookup and ranking queries. The collection is the in-memory source of
//! truth; the on-disk snapshot only mirrors it.
//!
//! ## Encoding
//!
//! A League encodes to a JSON array of players in insertion order:
//!
//! ```text
//! [{"Name":"Alice","Wins":3},{"Name":"Bob","Wins":1}]
//! ```
//!
//! An empty League is `[]`. Field order is irrelevant on decode; field names
//! are fixed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named entity with a non-negative win count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Player {
    pub name: String,
    pub wins: u64,
}

impl Player {
    pub fn new(name: impl Into<String>, wins: u64) -> Self {
        Self {
            name: name.into(),
            wins,
        }
    }
}

/// Errors produced while building, mutating or decoding a League.
#[derive(Debug, Error)]
pub enum LeagueError {
    /// The bytes were not a JSON array of players.
    #[error("malformed league data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two players share the same name.
    #[error("duplicate player name: {0:?}")]
    DuplicatePlayer(String),

    /// Player names must be non-empty.
    #[error("player name must not be empty")]
    EmptyName,

    /// Incrementing would overflow the win counter.
    #[error("win count overflow for player {0:?}")]
    WinsOverflow(String),
}

/// Ordered collection of players with unique, case-sensitive names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct League {
    players: Vec<Player>,
}

impl League {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
        }
    }

    /// Builds a League from `players`, keeping their order.
    ///
    /// Fails if any name is empty or appears more than once.
    pub fn from_players(players: Vec<Player>) -> Result<Self, LeagueError> {
        for (i, p) in players.iter().enumerate() {
            if p.name.is_empty() {
                return Err(LeagueError::EmptyName);
            }
            if players[..i].iter().any(|q| q.name == p.name) {
                return Err(LeagueError::DuplicatePlayer(p.name.clone()));
            }
        }
        Ok(Self { players })
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Exact, case-sensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Wins for `name`, or 0 if the player is unknown.
    pub fn wins(&self, name: &str) -> u64 {
        self.find(name).map_or(0, |p| p.wins)
    }

    /// Adds one win to `name`, inserting the player with one win if absent.
    ///
    /// Returns `true` if the player was newly inserted. On error the League
    /// is left unchanged.
    pub fn increment_wins(&mut self, name: &str) -> Result<bool, LeagueError> {
        if name.is_empty() {
            return Err(LeagueError::EmptyName);
        }

        match self.players.iter_mut().find(|p| p.name == name) {
            Some(player) => {
                player.wins = player
                    .wins
                    .checked_add(1)
                    .ok_or_else(|| LeagueError::WinsOverflow(name.to_string()))?;
                Ok(false)
            }
            None => {
                self.players.push(Player::new(name, 1));
                Ok(true)
            }
        }
    }

    /// Players sorted by wins, highest first.
    ///
    /// The sort is stable: players with equal wins keep their insertion
    /// order. The League itself is not reordered.
    pub fn ranked(&self) -> Vec<Player> {
        let mut view = self.players.clone();
        view.sort_by(|a, b| b.wins.cmp(&a.wins));
        view
    }

    /// Serializes the League, in insertion order, as a JSON array.
    pub fn encode(&self) -> Result<Vec<u8>, LeagueError> {
        Ok(serde_json::to_vec(&self.players)?)
    }

    /// Inverse of [`encode`](Self::encode).
    ///
    /// Empty (or whitespace-only) input decodes to an empty League, the same
    /// as `[]`. Anything that is not an array of well-formed players, such
    /// as `null`, is rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self, LeagueError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::new());
        }
        let players: Vec<Player> = serde_json::from_slice(bytes)?;
        Self::from_players(players)
    }
}

impl<'a> IntoIterator for &'a League {
    type Item = &'a Player;
    type IntoIter = std::slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}
