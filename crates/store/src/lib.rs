//! # Store - File-Backed Player Store
//!
//! Ties the [`league`] and [`snapshot`] crates into a durable leaderboard.
//!
//! ## Architecture
//!
//! ```text
//! Caller
//!   |
//!   v
//! ┌───────────────────────────────────────────────┐
//! │              FileSystemPlayerStore            │
//! │                                               │
//! │ write.rs → League::increment_wins             │
//! │              |                                │
//! │              v                                │
//! │           League::encode → Snapshot::replace  │
//! │              |                                │
//! │              | (replace failed?)              │
//! │              |        yes                     │
//! │              v                                │
//! │           state = Degraded                    │
//! │                                               │
//! │ read.rs  → League (memory only)               │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module       | Purpose                                              |
//! |-------------|------------------------------------------------------|
//! | `lib.rs`    | Store struct, open/load, accessors, `Debug`, `close` |
//! | [`error`]   | `StoreError` taxonomy                                |
//! | [`read`]    | `get_league()`, `get_player_score()`                 |
//! | [`write`]   | `record_win()`, `flush()`, persist bookkeeping       |
//! | [`shared`]  | `SharedPlayerStore` for concurrent callers           |
//!
//! ## Consistency
//!
//! The snapshot file is read exactly once, when the store is opened. From
//! then on the in-memory League is the only source of truth: reads never touch
//! the file, and every successful write replaces the whole file with the
//! encoded League. Changes made to the file by anyone else after open are
//! overwritten by the next write.
mod error;
mod read;
mod shared;
mod write;

pub use error::{InitError, StoreError};
pub use league::{League, LeagueError, Player};
pub use shared::SharedPlayerStore;
pub use snapshot::{Backing, SnapshotError, SnapshotFile};

use config::StoreConfig;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Content written into a new or zero-length backing file.
pub const EMPTY_LEAGUE: &[u8] = b"[]";

/// Default for the `sync` flag when opening by path.
pub const DEFAULT_SYNC: bool = true;

/// The operations a scoreboard front end (e.g. an HTTP layer) needs.
pub trait PlayerStore {
    /// All players, highest wins first, ties in insertion order.
    fn get_league(&self) -> Vec<Player>;

    /// Wins for `name`, or 0 if the player is unknown.
    fn get_player_score(&self, name: &str) -> u64;

    /// Adds a win for `name` and persists the League.
    fn record_win(&mut self, name: &str) -> Result<(), StoreError>;
}

/// Persistence state of a ready store.
///
/// Failure during open never yields a store, so only the post-load states
/// are represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// The backing file mirrors the in-memory League.
    Ready,
    /// The last persist attempt failed: memory is ahead of the file until the
    /// next successful write or [`FileSystemPlayerStore::flush`].
    Degraded,
}

/// Leaderboard that keeps its League in memory and mirrors it to one file.
///
/// # Write Path
///
/// 1. Apply the win to the in-memory League.
/// 2. Encode the whole League.
/// 3. Replace the backing file content with the encoding.
///
/// A failure in step 2 or 3 is returned to the caller but the win stays
/// applied in memory, and the store becomes [`StoreState::Degraded`].
///
/// # Read Path
///
/// Served from the in-memory League only.
///
/// # Ownership
///
/// The store exclusively owns the backing handle. It is released by
/// [`close`](Self::close) or when the store is dropped.
pub struct FileSystemPlayerStore<F: Backing = File> {
    pub(crate) league: League,
    pub(crate) snapshot: SnapshotFile<F>,
    pub(crate) path: Option<PathBuf>,
    pub(crate) state: StoreState,
}

impl<F: Backing> std::fmt::Debug for FileSystemPlayerStore<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSystemPlayerStore")
            .field("path", &self.path)
            .field("state", &self.state)
            .field("players", &self.league.len())
            .field("sync", &self.snapshot.sync_enabled())
            .finish()
    }
}

impl FileSystemPlayerStore<File> {
    /// Opens (or creates) the store at `path` with `fsync` on every write.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::open_with_sync(path, DEFAULT_SYNC)
    }

    /// Opens (or creates) the store at `path`.
    ///
    /// # Steps
    ///
    /// 1. Open the file read-write, creating it if absent.
    /// 2. If it has zero length, write `[]`.
    /// 3. Decode the content into the League.
    ///
    /// A populated file is never modified before it is decoded.
    ///
    /// # Errors
    ///
    /// [`StoreError::Init`] if the file cannot be opened, initialized, read
    /// or decoded. The store must not be reused; open it again instead.
    pub fn open_with_sync<P: AsRef<Path>>(path: P, sync: bool) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let location = path.display().to_string();

        let snapshot = SnapshotFile::open(&path, sync).map_err(|e| StoreError::Init {
            location: location.clone(),
            source: InitError::Snapshot(e),
        })?;

        let mut store = Self::load(snapshot, location)?;
        store.path = Some(path);
        Ok(store)
    }

    /// Opens the store described by `config`.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::open_with_sync(&config.path, config.sync)
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl<F: Backing> FileSystemPlayerStore<F> {
    /// Builds a store on top of an already-open backing handle.
    pub fn from_backing(backing: F, sync: bool) -> Result<Self, StoreError> {
        Self::load(
            SnapshotFile::from_backing(backing, sync),
            "<backing>".to_string(),
        )
    }

    fn load(mut snapshot: SnapshotFile<F>, location: String) -> Result<Self, StoreError> {
        let init_err = |source: InitError| StoreError::Init {
            location: location.clone(),
            source,
        };

        let initialized = snapshot
            .initialize_if_empty(EMPTY_LEAGUE)
            .map_err(|e| init_err(e.into()))?;
        let bytes = snapshot.read_all().map_err(|e| init_err(e.into()))?;
        let league = League::decode(&bytes).map_err(|e| init_err(e.into()))?;

        tracing::debug!(
            location = %location,
            initialized,
            players = league.len(),
            "player store loaded"
        );

        Ok(Self {
            league,
            snapshot,
            path: None,
            state: StoreState::Ready,
        })
    }

    /// Current persistence state.
    #[must_use]
    pub fn state(&self) -> StoreState {
        self.state
    }

    /// Returns `true` if the backing file is behind the in-memory League.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.state == StoreState::Degraded
    }

    /// The in-memory League, in insertion order.
    #[must_use]
    pub fn league(&self) -> &League {
        &self.league
    }

    /// Number of players tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.league.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.league.is_empty()
    }

    /// Releases the backing handle.
    ///
    /// A degraded store gets one more persist attempt, then the file is
    /// synced. Consuming `self` makes the store unusable afterwards.
    pub fn close(mut self) -> Result<(), StoreError> {
        if self.is_degraded() {
            self.flush()?;
        }
        self.snapshot.sync_to_disk().map_err(StoreError::Persist)?;
        tracing::debug!(path = ?self.path, players = self.league.len(), "player store closed");
        Ok(())
    }

    /// Releases the backing handle without a final sync.
    pub fn into_backing(self) -> F {
        self.snapshot.into_inner()
    }
}

impl<F: Backing> PlayerStore for FileSystemPlayerStore<F> {
    fn get_league(&self) -> Vec<Player> {
        FileSystemPlayerStore::get_league(self)
    }

    fn get_player_score(&self, name: &str) -> u64 {
        FileSystemPlayerStore::get_player_score(self, name)
    }

    fn record_win(&mut self, name: &str) -> Result<(), StoreError> {
        FileSystemPlayerStore::record_win(self, name)
    }
}

#[cfg(test)]
mod tests;
