use super::*;
use std::fs;
use std::io::Cursor;
use tempfile::tempdir;

// -------------------- Helpers --------------------

fn in_memory(initial: &[u8]) -> SnapshotFile<Cursor<Vec<u8>>> {
    SnapshotFile::from_backing(Cursor::new(initial.to_vec()), false)
}

/// Backing that fails a chosen step of the replace sequence.
#[derive(Default)]
struct FaultyBacking {
    inner: Cursor<Vec<u8>>,
    fail_write: bool,
    fail_set_len: bool,
    set_len_calls: usize,
}

impl Read for FaultyBacking {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for FaultyBacking {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_write {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for FaultyBacking {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl Backing for FaultyBacking {
    fn set_len(&mut self, len: u64) -> io::Result<()> {
        self.set_len_calls += 1;
        if self.fail_set_len {
            return Err(io::Error::new(io::ErrorKind::Other, "truncate refused"));
        }
        self.inner.set_len(len)
    }
}

// -------------------- Open --------------------

#[test]
fn open_creates_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("league.json");
    assert!(!path.exists());

    let mut f = SnapshotFile::open(&path, true).unwrap();
    assert!(path.exists());
    assert!(f.is_empty().unwrap());
}

#[test]
fn open_does_not_truncate_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("league.json");
    fs::write(&path, b"existing contents").unwrap();

    let mut f = SnapshotFile::open(&path, false).unwrap();
    assert_eq!(f.read_all().unwrap(), b"existing contents");
    assert_eq!(fs::read(&path).unwrap(), b"existing contents");
}

#[test]
fn open_in_missing_directory_returns_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("league.json");
    let result = SnapshotFile::open(&path, false);
    assert!(matches!(result, Err(SnapshotError::Io(_))));
}

// -------------------- Replace --------------------

#[test]
fn replace_shrinking_payload_leaves_no_trailing_bytes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("league.json");

    let mut f = SnapshotFile::open(&path, true).unwrap();
    f.replace(b"a much longer first payload").unwrap();
    f.replace(b"short").unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"short");
    assert_eq!(fs::metadata(&path).unwrap().len(), 5);
    assert_eq!(f.len().unwrap(), 5);
}

#[test]
fn replace_growing_payload() {
    let mut f = in_memory(b"[]");
    f.replace(b"[1,2,3,4,5]").unwrap();
    assert_eq!(f.read_all().unwrap(), b"[1,2,3,4,5]");
}

#[test]
fn replace_with_empty_payload_empties_file() {
    let mut f = in_memory(b"something");
    f.replace(b"").unwrap();
    assert!(f.is_empty().unwrap());
    assert!(f.read_all().unwrap().is_empty());
}

#[test]
fn replace_after_read_writes_from_start() {
    let mut f = in_memory(b"0123456789");
    // leave the cursor at the end
    let _ = f.read_all().unwrap();
    f.replace(b"abc").unwrap();
    assert_eq!(f.into_inner().into_inner(), b"abc");
}

#[test]
fn repeated_replace_never_accumulates() {
    let mut f = in_memory(b"");
    for i in (0..50).rev() {
        let payload = vec![b'x'; i];
        f.replace(&payload).unwrap();
        assert_eq!(f.len().unwrap(), i as u64);
    }
}

#[test]
fn replace_stops_after_failed_write() {
    let backing = FaultyBacking {
        inner: Cursor::new(b"previous".to_vec()),
        fail_write: true,
        ..Default::default()
    };
    let mut f = SnapshotFile::from_backing(backing, false);

    let result = f.replace(b"new");
    assert!(matches!(result, Err(SnapshotError::Io(_))));

    let backing = f.into_inner();
    assert_eq!(backing.set_len_calls, 0);
    assert_eq!(backing.inner.into_inner(), b"previous");
}

#[test]
fn replace_reports_failed_truncate() {
    let backing = FaultyBacking {
        inner: Cursor::new(b"previous payload".to_vec()),
        fail_set_len: true,
        ..Default::default()
    };
    let mut f = SnapshotFile::from_backing(backing, false);

    assert!(f.replace(b"new").is_err());
    assert_eq!(f.into_inner().set_len_calls, 1);
}

// -------------------- Initialize --------------------

#[test]
fn initialize_writes_placeholder_into_empty_file() {
    let mut f = in_memory(b"");
    assert!(f.initialize_if_empty(b"[]").unwrap());
    assert_eq!(f.read_all().unwrap(), b"[]");
}

#[test]
fn initialize_is_idempotent_on_populated_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("league.json");
    fs::write(&path, br#"[{"Name":"Alice","Wins":3}]"#).unwrap();

    let mut f = SnapshotFile::open(&path, false).unwrap();
    assert!(!f.initialize_if_empty(b"[]").unwrap());
    assert!(!f.initialize_if_empty(b"[]").unwrap());
    assert_eq!(fs::read(&path).unwrap(), br#"[{"Name":"Alice","Wins":3}]"#);
}

// -------------------- Sync --------------------

#[test]
fn sync_to_disk_on_unsynced_writer() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("league.json");

    let mut f = SnapshotFile::open(&path, false).unwrap();
    assert!(!f.sync_enabled());
    f.replace(b"[]").unwrap();
    f.sync_to_disk().unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"[]");
}
