//! Per-destination refresh lock.
//!
//! Holds an exclusive advisory lock on a hidden `.<file>.lock` sibling for
//! the length of one refresh, so concurrent runs against the same destination
//! take turns and the later one sees the fresh copy instead of downloading
//! again.

use fs2::FileExt;
use std::ffi::OsString;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Path of the lock file guarding `destination` (e.g. `lib.js` → `.lib.js.lock`).
pub fn lock_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    if let Some(file_name) = destination.file_name() {
        name.push(file_name);
    }
    name.push(".lock");
    destination.with_file_name(name)
}

/// Exclusive lock released on drop.
#[derive(Debug)]
pub struct RefreshLock {
    file: File,
}

impl RefreshLock {
    /// Blocks until the lock for `destination` is held.
    pub fn acquire(destination: &Path) -> io::Result<Self> {
        let file = File::options()
            .create(true)
            .truncate(false)
            .write(true)
            .open(lock_path(destination))?;
        file.lock_exclusive()?;
        Ok(Self { file })
    }
}

impl Drop for RefreshLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::debug!("refresh lock unlock failed: {}", e);
        }
    }
}
