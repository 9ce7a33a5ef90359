//! Atomic replace of the destination file.

use std::io::{self, Write};
use std::path::Path;

use crate::error::RefreshError;

/// Writes `data` to `final_path` so readers only ever see the old or the new file.
///
/// The bytes go to a uniquely named temp file in the same directory (same
/// filesystem, so the rename is atomic), are synced, then renamed over
/// `final_path`. On any failure the temp file is removed and `final_path`
/// is left as it was.
pub fn persist_atomic(final_path: &Path, data: &[u8]) -> Result<(), RefreshError> {
    let persist_err = |source: io::Error| RefreshError::Persist {
        path: final_path.to_path_buf(),
        source,
    };
    let dir = final_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut builder = tempfile::Builder::new();
    builder.prefix(".lbc-").suffix(".part");
    // 0644 rather than the 0600 temp-file default.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(persist_err)?;
    tmp.write_all(data).map_err(persist_err)?;
    tmp.as_file().sync_all().map_err(persist_err)?;
    tmp.persist(final_path).map_err(|e| persist_err(e.error))?;
    Ok(())
}
