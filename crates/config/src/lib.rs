//! # Config - Leaderboard Settings
//!
//! All settings come from environment variables with defaults:
//!
//! ```text
//! LEAGUE_DB_PATH   backing file path            (default: "game.db.json")
//! LEAGUE_SYNC      fsync after every replace    (default: "true")
//! LEAGUE_LOG       tracing filter directive     (default: "info")
//! ```
//!
//! Values that fail to parse fall back to their default.

use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "LEAGUE_DB_PATH";
pub const SYNC_VAR: &str = "LEAGUE_SYNC";
pub const LOG_VAR: &str = "LEAGUE_LOG";

pub const DEFAULT_DB_PATH: &str = "game.db.json";
pub const DEFAULT_SYNC: bool = true;
pub const DEFAULT_LOG: &str = "info";

/// Settings for opening a file-backed player store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the league snapshot file.
    pub path: PathBuf,
    /// If `true`, every snapshot replace is followed by `fsync`.
    pub sync: bool,
    /// Filter directive for the log subscriber (e.g. `"debug"`).
    pub log_filter: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
            sync: DEFAULT_SYNC,
            log_filter: DEFAULT_LOG.to_string(),
        }
    }
}

impl StoreConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of a
    /// variable or `None` if it is unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup(DB_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
        let sync = lookup(SYNC_VAR)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_SYNC);
        let log_filter = lookup(LOG_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG.to_string());

        Self {
            path,
            sync,
            log_filter,
        }
    }
}
