/// Error taxonomy for the player store.
use league::LeagueError;
use snapshot::SnapshotError;
use thiserror::Error;

/// Why a store could not be opened.
#[derive(Debug, Error)]
pub enum InitError {
    /// The backing file could not be opened, initialized or read.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// The file content is not a valid League.
    #[error(transparent)]
    Decode(#[from] LeagueError),
}

/// Errors returned by [`FileSystemPlayerStore`](crate::FileSystemPlayerStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Opening failed. Fatal for this instance; reopen to retry.
    #[error("failed to initialise player store at {location}: {source}")]
    Init {
        location: String,
        #[source]
        source: InitError,
    },

    /// Replacing the backing file failed. The win is kept in memory and the
    /// store is degraded until a later write succeeds.
    #[error("failed to persist league: {0}")]
    Persist(#[source] SnapshotError),

    /// Encoding the League failed. Handled like [`StoreError::Persist`].
    #[error("failed to encode league: {0}")]
    Encode(#[source] LeagueError),

    /// The win was refused (empty name or counter overflow); nothing changed.
    #[error("win not recorded: {0}")]
    Rejected(#[source] LeagueError),
}

impl StoreError {
    /// Returns `true` if the in-memory League is ahead of the backing file
    /// because of this error.
    #[must_use]
    pub fn is_persist_failure(&self) -> bool {
        matches!(self, StoreError::Persist(_) | StoreError::Encode(_))
    }

    /// Returns `true` if the underlying cause is malformed file content.
    #[must_use]
    pub fn is_malformed_data(&self) -> bool {
        matches!(
            self,
            StoreError::Init {
                source: InitError::Decode(_),
                ..
            }
        )
    }
}
