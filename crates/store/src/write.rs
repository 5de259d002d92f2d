/// Write path: `record_win()`, `flush()` and the internal `persist()`.
///
/// Every mutation updates the in-memory League first and then replaces the
/// backing file with the full encoded League.
use snapshot::Backing;

use crate::{FileSystemPlayerStore, StoreError, StoreState};

impl<F: Backing> FileSystemPlayerStore<F> {
    /// Records a win for `name`, inserting the player with one win if new.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Rejected`] if `name` is empty or the counter would
    ///   overflow. Nothing is changed.
    /// - [`StoreError::Persist`] / [`StoreError::Encode`] if the League could
    ///   not be written. The win **stays applied** in memory and the store
    ///   becomes [`StoreState::Degraded`]. Retry with another `record_win` or
    ///   [`flush`](Self::flush).
    pub fn record_win(&mut self, name: &str) -> Result<(), StoreError> {
        let inserted = self
            .league
            .increment_wins(name)
            .map_err(StoreError::Rejected)?;

        tracing::debug!(player = name, inserted, wins = self.league.wins(name), "recorded win");

        self.persist()
    }

    /// Writes the current League to the backing file.
    ///
    /// Clears [`StoreState::Degraded`] on success.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.persist()
    }

    /// Encodes the whole League and replaces the file content with it.
    ///
    /// The store counts as degraded from the moment the attempt starts, so a
    /// panic inside encode or replace leaves it flagged as stale.
    fn persist(&mut self) -> Result<(), StoreError> {
        let was_degraded = self.state == StoreState::Degraded;
        self.state = StoreState::Degraded;

        let result = self
            .league
            .encode()
            .map_err(StoreError::Encode)
            .and_then(|bytes| self.snapshot.replace(&bytes).map_err(StoreError::Persist));

        match &result {
            Ok(()) => {
                if was_degraded {
                    tracing::info!(players = self.league.len(), "league persisted, store recovered");
                }
                self.state = StoreState::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "league not persisted, store degraded");
            }
        }

        result
    }
}
