//! URL modeling and destination file name derivation.
//!
//! The cached file is named after the last path segment of the source URL,
//! the same name the asset is served under by the origin.

mod path;

pub use path::filename_from_url_path;

use crate::error::RefreshError;

/// Derives the destination file name for `source`.
///
/// # Examples
///
/// - `destination_file_name("http://example.com/js/lib.js")` → `Ok("lib.js")`
/// - `destination_file_name("https://example.com/")` → `Err(InvalidSource)`
pub fn destination_file_name(source: &str) -> Result<String, RefreshError> {
    filename_from_url_path(source).ok_or_else(|| RefreshError::InvalidSource {
        source_url: source.to_string(),
    })
}
