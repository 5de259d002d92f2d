/// Thread-safe handle over a [`FileSystemPlayerStore`].
///
/// `record_win` and `flush` hold the write lock across the whole
/// increment-encode-replace sequence, so concurrent wins are never lost.
/// Reads share the read lock with each other.
use std::fs::File;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use league::Player;
use snapshot::Backing;

use crate::{FileSystemPlayerStore, PlayerStore, StoreError, StoreState};

/// Cloneable, lock-protected player store.
///
/// A poisoned lock is recovered rather than propagated. A panic during a
/// write can leave memory ahead of the file, but the store is already marked
/// [`StoreState::Degraded`] at that point, and the next successful write or
/// flush brings the file back in line.
pub struct SharedPlayerStore<F: Backing = File> {
    inner: Arc<RwLock<FileSystemPlayerStore<F>>>,
}

impl<F: Backing> Clone for SharedPlayerStore<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: Backing> std::fmt::Debug for SharedPlayerStore<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedPlayerStore").field(&*self.read()).finish()
    }
}

impl SharedPlayerStore<File> {
    /// Opens the store at `path` and wraps it for sharing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Ok(Self::new(FileSystemPlayerStore::open(path)?))
    }
}

impl<F: Backing> SharedPlayerStore<F> {
    pub fn new(store: FileSystemPlayerStore<F>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, FileSystemPlayerStore<F>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FileSystemPlayerStore<F>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get_league(&self) -> Vec<Player> {
        self.read().get_league()
    }

    pub fn get_player_score(&self, name: &str) -> u64 {
        self.read().get_player_score(name)
    }

    /// See [`FileSystemPlayerStore::record_win`].
    pub fn record_win(&self, name: &str) -> Result<(), StoreError> {
        self.write().record_win(name)
    }

    /// See [`FileSystemPlayerStore::flush`].
    pub fn flush(&self) -> Result<(), StoreError> {
        self.write().flush()
    }

    pub fn state(&self) -> StoreState {
        self.read().state()
    }

    /// Unwraps the store if this is the last handle; otherwise returns `self`.
    pub fn into_inner(self) -> Result<FileSystemPlayerStore<F>, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => Ok(lock.into_inner().unwrap_or_else(PoisonError::into_inner)),
            Err(inner) => Err(Self { inner }),
        }
    }
}

impl<F: Backing> PlayerStore for SharedPlayerStore<F> {
    fn get_league(&self) -> Vec<Player> {
        SharedPlayerStore::get_league(self)
    }

    fn get_player_score(&self, name: &str) -> u64 {
        SharedPlayerStore::get_player_score(self, name)
    }

    fn record_win(&mut self, name: &str) -> Result<(), StoreError> {
        SharedPlayerStore::record_win(self, name)
    }
}
