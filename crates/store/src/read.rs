/// Read path: `get_league()` and `get_player_score()`.
///
/// Both are served from the in-memory League and never touch the file.
use league::Player;
use snapshot::Backing;

use crate::FileSystemPlayerStore;

impl<F: Backing> FileSystemPlayerStore<F> {
    /// Returns every player, highest wins first.
    ///
    /// Players with equal wins keep their insertion order.
    pub fn get_league(&self) -> Vec<Player> {
        self.league.ranked()
    }

    /// Returns the wins recorded for `name`.
    ///
    /// An unknown player has a score of 0; that is not an error.
    pub fn get_player_score(&self, name: &str) -> u64 {
        self.league.wins(name)
    }
}
