//! Refresh outcome errors.
//!
//! Every step of a refresh reports through `RefreshError`. `CacheRefresher::run`
//! collapses these into a boolean; `CacheRefresher::refresh` returns them as-is.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RefreshError {
    /// Source URL does not parse or has no usable last path segment.
    #[error("invalid source URL [{source_url}]: no file name in path")]
    InvalidSource { source_url: String },

    /// Destination folder is missing and cannot be created, or is not writable.
    #[error("insufficient write permissions for [{}]: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    /// Cached copy is younger than the TTL. Expected outcome, not a failure.
    #[error("cache time of {ttl} seconds has not yet elapsed")]
    CacheFresh { ttl: u64 },

    /// Connection, DNS, TLS or timeout failure on probe or download.
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),

    /// Origin answered with a status we do not act on.
    #[error("response code: [{0}]")]
    Origin(u32),

    /// Origin answered 304 to the conditional probe.
    #[error("not modified")]
    NotModified,

    /// Download completed with no bytes.
    #[error("empty response body")]
    EmptyBody,

    /// Temp file create, write, sync or rename failed.
    #[error("persist [{}]: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RefreshError {
    /// False for the "nothing to do" outcomes (cache hit, 304).
    pub fn is_failure(&self) -> bool {
        !matches!(self, RefreshError::CacheFresh { .. } | RefreshError::NotModified)
    }
}
