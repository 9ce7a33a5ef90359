//! File name extraction from URL path.

/// Extracts the last path segment of `url`.
///
/// Returns `None` if the URL cannot be parsed, has no path, or the segment is
/// `.` / `..`. Query and fragment never contribute to the name.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}
