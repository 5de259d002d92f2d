//! # Snapshot — Full-Overwrite File Writer
//!
//! Owns a single backing file that always holds exactly one serialized
//! snapshot. Every write **replaces** the entire contents of the file in
//! place, without closing or reopening the handle.
//!
//! ## Replace Sequence
//!
//! ```text
//! seek(0) -> write_all(data) -> set_len(data.len()) -> flush -> [sync_all]
//! ```
//!
//! The `set_len` step is what makes a shrinking write safe: a plain
//! seek-and-write leaves the tail of the previous, longer snapshot on disk and
//! the next decode would read garbage. After a successful `replace` the file
//! length and content equal `data` exactly.
//!
//! The sequence stops at the first failing step. No further writes are
//! attempted after an error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use snapshot::SnapshotFile;
//!
//! let mut f = SnapshotFile::open("league.json", true).unwrap();
//! f.initialize_if_empty(b"[]").unwrap();
//! f.replace(br#"[{"Name":"Alice","Wins":1}]"#).unwrap();
//! f.replace(b"[]").unwrap();
//! assert_eq!(f.read_all().unwrap(), b"[]");
//! ```

use std::fs::{File, OpenOptions};
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;

use thiserror::Error;

/// Errors that can occur while reading or replacing a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// An underlying I/O error (seek, write, truncate, sync or read).
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A seekable, truncatable byte store that can back a [`SnapshotFile`].
///
/// Implemented for [`File`] (production) and `Cursor<Vec<u8>>` (tests).
pub trait Backing: Read + Write + Seek {
    /// Truncates or extends the underlying storage to exactly `len` bytes.
    fn set_len(&mut self, len: u64) -> io::Result<()>;

    /// Forces written data down to durable storage.
    fn sync_all(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Backing for File {
    fn set_len(&mut self, len: u64) -> io::Result<()> {
        File::set_len(self, len)
    }

    fn sync_all(&mut self) -> io::Result<()> {
        File::sync_all(self)
    }
}

impl Backing for Cursor<Vec<u8>> {
    fn set_len(&mut self, len: u64) -> io::Result<()> {
        let len = usize::try_from(len)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "length exceeds usize"))?;
        self.get_mut().resize(len, 0);
        Ok(())
    }
}

/// Single-handle writer with replace-entire-contents semantics.
///
/// There is no internal locking. Callers serialize access (the store does so
/// through `&mut self` or its shared lock).
pub struct SnapshotFile<F: Backing = File> {
    backing: F,
    sync: bool,
}

impl SnapshotFile<File> {
    /// Opens (or creates) `path` for reading and writing.
    ///
    /// Existing contents are left untouched; nothing is truncated on open.
    ///
    /// # Arguments
    ///
    /// * `path` - file system path of the snapshot (created if it does not exist).
    /// * `sync` - if true, every `replace` is followed by `fsync`.
    pub fn open<P: AsRef<Path>>(path: P, sync: bool) -> Result<Self, SnapshotError> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), sync, "opened snapshot file");
        Ok(Self {
            backing: file,
            sync,
        })
    }
}

impl<F: Backing> SnapshotFile<F> {
    /// Wraps an already-open backing handle.
    pub fn from_backing(backing: F, sync: bool) -> Self {
        Self { backing, sync }
    }

    /// Returns `true` if every `replace` is followed by `sync_all`.
    #[must_use]
    pub fn sync_enabled(&self) -> bool {
        self.sync
    }

    /// Returns the current length of the backing content in bytes.
    pub fn len(&mut self) -> Result<u64, SnapshotError> {
        let len = self.backing.seek(SeekFrom::End(0))?;
        Ok(len)
    }

    /// Returns `true` if the backing content has zero length.
    pub fn is_empty(&mut self) -> Result<bool, SnapshotError> {
        Ok(self.len()? == 0)
    }

    /// Reads the entire current content from the start.
    pub fn read_all(&mut self) -> Result<Vec<u8>, SnapshotError> {
        self.backing.seek(SeekFrom::Start(0))?;
        let mut buf = Vec::new();
        self.backing.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Writes `placeholder` only if the backing content is empty.
    ///
    /// Returns `true` if the placeholder was written. A non-empty file is
    /// never modified, so calling this on every open is idempotent.
    pub fn initialize_if_empty(&mut self, placeholder: &[u8]) -> Result<bool, SnapshotError> {
        if !self.is_empty()? {
            return Ok(false);
        }
        self.replace(placeholder)?;
        tracing::debug!(bytes = placeholder.len(), "initialized empty snapshot");
        Ok(true)
    }

    /// Replaces the entire content with `data`.
    ///
    /// On success the content length and bytes equal `data` exactly, even
    /// when `data` is shorter than the previous snapshot.
    pub fn replace(&mut self, data: &[u8]) -> Result<(), SnapshotError> {
        self.backing.seek(SeekFrom::Start(0))?;
        self.backing.write_all(data)?;
        self.backing.set_len(data.len() as u64)?;
        self.backing.flush()?;

        if self.sync {
            self.backing.sync_all()?;
        }

        Ok(())
    }

    /// Forces all written data to durable storage via `sync_all()`.
    ///
    /// Useful when `sync` is `false` and the caller wants durability at a
    /// specific point (e.g. before closing).
    pub fn sync_to_disk(&mut self) -> Result<(), SnapshotError> {
        self.backing.flush()?;
        self.backing.sync_all()?;
        Ok(())
    }

    /// Releases ownership of the backing handle.
    pub fn into_inner(self) -> F {
        self.backing
    }
}

#[cfg(test)]
mod tests;
