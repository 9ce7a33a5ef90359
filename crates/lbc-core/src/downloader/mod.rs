//! Full-body HTTP GET of the source resource.
//!
//! The probe and the download share one `CurlOptions` so both calls follow the
//! same timeout and redirect policy.

mod single;

pub use single::{download_body, Download};

use std::time::Duration;

/// Default per-call connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of redirect hops followed.
pub const DEFAULT_MAX_REDIRECTS: u32 = 3;

/// Curl options shared by the header probe and the body download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurlOptions {
    /// Connect timeout; there is no overall transfer deadline.
    pub connect_timeout: Duration,
    /// Redirect hops followed before curl gives up.
    pub max_redirects: u32,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl CurlOptions {
    /// Applies URL, timeout and redirect policy to a fresh handle.
    pub(crate) fn easy_for(&self, url: &str) -> Result<curl::easy::Easy, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.max_redirects)?;
        easy.connect_timeout(self.connect_timeout)?;
        Ok(easy)
    }
}
