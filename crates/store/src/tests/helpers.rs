use std::fs;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use league::League;
use snapshot::Backing;

/// Decodes whatever is currently on disk at `path`.
pub fn league_on_disk(path: &Path) -> League {
    League::decode(&fs::read(path).unwrap()).unwrap()
}

/// In-memory backing whose writes fail while `fail` is set.
pub struct FlakyBacking {
    pub inner: Cursor<Vec<u8>>,
    pub fail: Arc<AtomicBool>,
}

impl FlakyBacking {
    pub fn new(initial: &[u8]) -> (Self, Arc<AtomicBool>) {
        let fail = Arc::new(AtomicBool::new(false));
        let backing = Self {
            inner: Cursor::new(initial.to_vec()),
            fail: Arc::clone(&fail),
        };
        (backing, fail)
    }

    pub fn contents(&self) -> &[u8] {
        self.inner.get_ref()
    }

    fn check(&self) -> io::Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(io::Error::new(io::ErrorKind::Other, "injected write failure"))
        } else {
            Ok(())
        }
    }
}

impl Read for FlakyBacking {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for FlakyBacking {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.check()?;
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for FlakyBacking {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl Backing for FlakyBacking {
    fn set_len(&mut self, len: u64) -> io::Result<()> {
        self.check()?;
        self.inner.set_len(len)
    }
}

/// In-memory backing that panics on write while `panic` is set.
pub struct PanickingBacking {
    pub inner: Cursor<Vec<u8>>,
    pub panic: Arc<AtomicBool>,
}

impl PanickingBacking {
    pub fn new(initial: &[u8]) -> (Self, Arc<AtomicBool>) {
        let panic = Arc::new(AtomicBool::new(false));
        let backing = Self {
            inner: Cursor::new(initial.to_vec()),
            panic: Arc::clone(&panic),
        };
        (backing, panic)
    }
}

impl Read for PanickingBacking {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for PanickingBacking {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.panic.load(Ordering::SeqCst) {
            panic!("backing exploded mid-write");
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for PanickingBacking {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl Backing for PanickingBacking {
    fn set_len(&mut self, len: u64) -> io::Result<()> {
        self.inner.set_len(len)
    }
}
