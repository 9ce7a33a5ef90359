//! Conditional HEAD probe.
//!
//! Asks the origin whether the resource changed since the cached copy was
//! written, without transferring the body. Uses curl's time condition so the
//! `If-Modified-Since` header is formatted by libcurl.

mod parse;

use crate::downloader::CurlOptions;
use curl::easy::TimeCondition;
use std::str;
use std::time::{SystemTime, UNIX_EPOCH};

/// Result of a HEAD request: final status plus the validators we log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadResult {
    /// Final HTTP status after redirects.
    pub status: u32,
    /// `Content-Length` of the final response, if present.
    pub content_length: Option<u64>,
    /// `Last-Modified` of the final response, if present.
    pub last_modified: Option<String>,
    /// `ETag` of the final response, if present.
    pub etag: Option<String>,
}

/// Performs a HEAD request for `url`.
///
/// When `if_modified_since` is set, the request carries `If-Modified-Since`
/// for that instant (second precision), so an unchanged origin answers 304.
pub fn probe(
    url: &str,
    if_modified_since: Option<SystemTime>,
    curl: CurlOptions,
) -> Result<HeadResult, curl::Error> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl.easy_for(url)?;
    easy.nobody(true)?; // HEAD request
    if let Some(since) = if_modified_since {
        let secs = since
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        easy.time_condition(TimeCondition::IfModifiedSince)?;
        easy.time_value(secs)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    let result = parse::parse_headers(status, &headers);
    tracing::debug!(
        url,
        status,
        conditional = if_modified_since.is_some(),
        content_length = result.content_length,
        last_modified = result.last_modified.as_deref(),
        etag = result.etag.as_deref(),
        "HEAD finished"
    );
    Ok(result)
}
