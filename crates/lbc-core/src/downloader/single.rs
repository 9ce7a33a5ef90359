//! Single-stream GET into memory.
//!
//! Cached assets are small scripts and stylesheets, so the body is buffered
//! whole and only handed to storage once the transfer finished.

use super::CurlOptions;

/// Response of a full GET: final status and the buffered body.
#[derive(Debug, Clone)]
pub struct Download {
    pub status: u32,
    pub body: Vec<u8>,
}

/// Downloads `url` with a plain GET (no conditional or range headers).
pub fn download_body(url: &str, curl: CurlOptions) -> Result<Download, curl::Error> {
    let mut body = Vec::new();
    let mut easy = curl.easy_for(url)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    tracing::debug!(url, status, bytes = body.len(), "GET finished");
    Ok(Download { status, body })
}
