//! Parse HTTP response header lines into HeadResult.

use super::HeadResult;

/// Parse collected header lines into HeadResult.
///
/// With redirects followed, curl hands us every hop's headers; a status line
/// starts a new block so only the final response's validators survive.
pub(crate) fn parse_headers(status: u32, lines: &[String]) -> HeadResult {
    let mut content_length = None;
    let mut last_modified = None;
    let mut etag = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            content_length = None;
            last_modified = None;
            etag = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse::<u64>().ok();
            } else if name.eq_ignore_ascii_case("last-modified") {
                last_modified = Some(value.to_string());
            } else if name.eq_ignore_ascii_case("etag") {
                etag = Some(value.trim_matches('"').to_string());
            }
        }
    }

    HeadResult {
        status,
        content_length,
        last_modified,
        etag,
    }
}
