//! Disk I/O for cached assets.
//!
//! Access checks used by the destination check, atomic replace of the
//! destination (temp file in the same folder, fsync, rename) and the
//! per-destination refresh lock.

mod lock;
mod writer;

pub use lock::{lock_path, RefreshLock};
pub use writer::persist_atomic;

use std::io;
use std::path::Path;
use std::time::SystemTime;

/// True if the current process may write to `path` (file or directory).
#[cfg(unix)]
pub fn is_writable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
}

/// Non-Unix: only the read-only attribute is consulted.
#[cfg(not(unix))]
pub fn is_writable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}

/// Modification time of `path`.
pub fn modified_at(path: &Path) -> io::Result<SystemTime> {
    std::fs::metadata(path)?.modified()
}
