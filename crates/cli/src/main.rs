//! # CLI - Leaderboard Shell
//!
//! A REPL-style front end for the file-backed player store. Reads commands
//! from stdin, runs them against the store and prints results to stdout.
//! Logs go to stderr, so scripted use (piping commands via stdin) only sees
//! command output on stdout.
//!
//! ## Commands
//!
//! ```text
//! WIN name       Record a win for a player (name may contain spaces)
//! SCORE name     Print the player's wins (0 if unknown)
//! LEAGUE         Print players ranked by wins
//! FLUSH          Re-persist the league (clears degraded state)
//! STATS          Print store debug info
//! EXIT / QUIT    Close the store and exit
//! ```
//!
//! ## Configuration
//!
//! ```text
//! LEAGUE_DB_PATH   league file path             (default: "game.db.json")
//! LEAGUE_SYNC      fsync after every write      (default: "true")
//! LEAGUE_LOG       log filter, e.g. "debug"     (default: "info")
//! ```
//!
//! ## Example
//!
//! ```text
//! $ cargo run -p cli
//! League started (players=0, path=game.db.json, sync=true)
//! > WIN Alice
//! OK
//! > SCORE Alice
//! 1
//! > LEAGUE
//! Alice 1
//! (1 players)
//! > EXIT
//! bye
//! ```

use anyhow::{Context, Result};
use config::StoreConfig;
use std::io::{self, BufRead, Write};
use store::{Backing, FileSystemPlayerStore};
use tracing_subscriber::EnvFilter;

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cfg = StoreConfig::from_env();
    init_logging(&cfg.log_filter);

    let store = FileSystemPlayerStore::from_config(&cfg)
        .with_context(|| format!("cannot open league at {}", cfg.path.display()))?;
    tracing::info!(path = %cfg.path.display(), players = store.len(), sync = cfg.sync, "league opened");

    println!(
        "League started (players={}, path={}, sync={})",
        store.len(),
        cfg.path.display(),
        cfg.sync
    );
    println!("Commands: WIN name | SCORE name | LEAGUE | FLUSH | STATS | EXIT");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let store = run(store, stdin.lock(), stdout.lock())?;

    let players = store.len();
    store.close().context("failed to close league file")?;
    tracing::info!(players, "league closed");
    Ok(())
}

/// Runs the command loop until `EXIT`/`QUIT` or end of input and hands the
/// store back to the caller for closing.
fn run<F, R, W>(
    mut store: FileSystemPlayerStore<F>,
    input: R,
    mut out: W,
) -> Result<FileSystemPlayerStore<F>>
where
    F: Backing,
    R: BufRead,
    W: Write,
{
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (trimmed, ""),
        };

        if !cmd.is_empty() {
            match cmd.to_uppercase().as_str() {
                "WIN" => {
                    if arg.is_empty() {
                        writeln!(out, "ERR usage: WIN name")?;
                    } else {
                        match store.record_win(arg) {
                            Ok(()) => writeln!(out, "OK")?,
                            Err(e) if e.is_persist_failure() => {
                                writeln!(out, "ERR win kept in memory but not saved: {}", e)?
                            }
                            Err(e) => writeln!(out, "ERR {}", e)?,
                        }
                    }
                }
                "SCORE" => {
                    if arg.is_empty() {
                        writeln!(out, "ERR usage: SCORE name")?;
                    } else {
                        writeln!(out, "{}", store.get_player_score(arg))?;
                    }
                }
                "LEAGUE" => {
                    let league = store.get_league();
                    if league.is_empty() {
                        writeln!(out, "(empty)")?;
                    } else {
                        for player in &league {
                            writeln!(out, "{} {}", player.name, player.wins)?;
                        }
                        writeln!(out, "({} players)", league.len())?;
                    }
                }
                "FLUSH" => match store.flush() {
                    Ok(()) => writeln!(out, "OK")?,
                    Err(e) => writeln!(out, "ERR flush failed: {}", e)?,
                },
                "STATS" => {
                    writeln!(out, "{:?}", store)?;
                }
                "EXIT" | "QUIT" => {
                    writeln!(out, "bye")?;
                    break;
                }
                other => {
                    writeln!(out, "unknown command: {}", other)?;
                }
            }
        }

        write!(out, "> ")?;
        out.flush()?;
    }

    Ok(store)
}
