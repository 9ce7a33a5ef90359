//! The cache refresher: one cached copy of one remote resource.
//!
//! A refresh is a single pass: destination check (TTL gate), conditional HEAD
//! probe, full GET, atomic persist. Every step records its outcome in the
//! refresher's log; the first failing step ends the pass.

mod log;
mod status;

pub use log::{render, LogEntry, LogSink, UnknownSink};
pub use status::CacheStatus;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::config;
use crate::downloader::{self, CurlOptions};
use crate::error::RefreshError;
use crate::fetch_head;
use crate::storage::{self, RefreshLock};
use crate::url_model;

/// Default TTL: 24 hours.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60 * 60 * 24;

/// Outcome of a refresh that replaced the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refreshed {
    pub destination: PathBuf,
    pub bytes: usize,
}

/// Keeps a local copy of `source` at `destination_folder/<last path segment>`.
#[derive(Debug)]
pub struct CacheRefresher {
    source: String,
    destination_folder: PathBuf,
    destination_file_name: String,
    destination: PathBuf,
    cache_ttl: u64,
    /// Set by the destination check; selects the conditional probe.
    file_exists: bool,
    curl: CurlOptions,
    log: Vec<LogEntry>,
}

impl CacheRefresher {
    /// Binds a refresher to `source`, caching into the default folder.
    pub fn new(source: &str) -> Result<Self, RefreshError> {
        let destination_file_name = url_model::destination_file_name(source)?;
        let destination_folder = config::default_cache_dir();
        let destination = destination_folder.join(&destination_file_name);
        Ok(Self {
            source: source.to_string(),
            destination_folder,
            destination_file_name,
            destination,
            cache_ttl: DEFAULT_CACHE_TTL_SECS,
            file_exists: false,
            curl: CurlOptions::default(),
            log: Vec::new(),
        })
    }

    /// Replaces the timeout/redirect policy of both network calls.
    pub fn with_curl_options(mut self, curl: CurlOptions) -> Self {
        self.curl = curl;
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn destination_folder(&self) -> &Path {
        &self.destination_folder
    }

    pub fn destination_file_name(&self) -> &str {
        &self.destination_file_name
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn cache_ttl(&self) -> u64 {
        self.cache_ttl
    }

    /// Entries recorded so far, oldest first. Accumulates across runs.
    pub fn log_entries(&self) -> &[LogEntry] {
        &self.log
    }

    /// Drops all recorded entries. The log is otherwise never trimmed.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Uses `folder` for cached files, creating it if needed.
    ///
    /// An empty path is ignored. If creation fails the failure is logged and
    /// the previous folder stays in effect.
    pub fn set_destination_folder(&mut self, folder: impl AsRef<Path>) {
        let folder = folder.as_ref();
        if folder.as_os_str().is_empty() {
            return;
        }
        if folder.is_dir() {
            self.destination_folder = folder.to_path_buf();
        } else {
            match fs::create_dir_all(folder) {
                Ok(()) => {
                    tracing::debug!(folder = %folder.display(), "created destination folder");
                    self.destination_folder = folder.to_path_buf();
                }
                Err(e) => self.record_warn(format!(
                    "Failed to create folder [{}] for storing files: {}.",
                    folder.display(),
                    e
                )),
            }
        }
        self.destination = self.destination_folder.join(&self.destination_file_name);
    }

    /// Points at `folder` as-is, without checking or creating it.
    ///
    /// For read-only reporting; a later `run` still creates a missing folder
    /// in its destination check.
    pub fn with_destination_folder(mut self, folder: impl AsRef<Path>) -> Self {
        let folder = folder.as_ref();
        if !folder.as_os_str().is_empty() {
            self.destination_folder = folder.to_path_buf();
            self.destination = self.destination_folder.join(&self.destination_file_name);
        }
        self
    }

    /// Sets the TTL in seconds. Values that are not a non-negative integer are ignored.
    pub fn set_cache_ttl<T: TryInto<u64>>(&mut self, seconds: T) {
        if let Ok(ttl) = seconds.try_into() {
            self.cache_ttl = ttl;
        }
    }

    /// Runs one refresh pass. True only if the destination was replaced.
    pub fn run(&mut self) -> bool {
        self.refresh().is_ok()
    }

    /// Runs one refresh pass and reports why nothing was written, if so.
    pub fn refresh(&mut self) -> Result<Refreshed, RefreshError> {
        self.check_destination(SystemTime::now())?;
        let _lock = self.lock_destination()?;
        // Another refresh may have finished while we waited for the lock.
        self.check_destination(SystemTime::now())?;
        self.check_headers()?;
        let body = self.download_source()?;
        self.save_source(&body)?;
        Ok(Refreshed {
            destination: self.destination.clone(),
            bytes: body.len(),
        })
    }

    /// Freshness of the cached copy at `now`, without any network access.
    pub fn status(&self, now: SystemTime) -> CacheStatus {
        match storage::modified_at(&self.destination) {
            Ok(mtime) => CacheStatus::from_age(age_at(mtime, now), self.cache_ttl),
            Err(_) => CacheStatus::Missing,
        }
    }

    /// Writes the recorded entries to `sink` (`screen`, `console` or `file`).
    ///
    /// Returns false for an unknown sink, an empty log, or a failed write.
    /// The file sink appends to `log_file`, or to `lbc.log` in the default
    /// cache folder when none is given.
    pub fn log(&self, sink: &str, log_file: Option<&Path>) -> bool {
        let sink = match sink.parse::<LogSink>() {
            Ok(sink) => sink,
            Err(e) => {
                tracing::warn!("{}", e);
                return false;
            }
        };
        if self.log.is_empty() {
            return false;
        }
        let default_path;
        let log_file = match log_file {
            Some(p) => p,
            None => {
                default_path = config::default_log_path();
                &default_path
            }
        };
        match log::write_entries(sink, &self.log, log_file) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(log_file = %log_file.display(), "failed to write log: {}", e);
                false
            }
        }
    }

    /// Step 1: is a refresh needed, and can the result be written?
    fn check_destination(&mut self, now: SystemTime) -> Result<(), RefreshError> {
        self.file_exists = false;
        let destination_exists = self.destination.exists();

        if destination_exists && storage::is_writable(&self.destination) {
            self.file_exists = true;
            let mtime = storage::modified_at(&self.destination).map_err(|e| {
                RefreshError::Config {
                    path: self.destination.clone(),
                    reason: e.to_string(),
                }
            })?;
            if matches!(
                CacheStatus::from_age(age_at(mtime, now), self.cache_ttl),
                CacheStatus::Fresh { .. }
            ) {
                self.record_info(format!(
                    "Time of {} seconds, set for file [{}] caching, has not yet elapsed.",
                    self.cache_ttl, self.source
                ));
                return Err(RefreshError::CacheFresh {
                    ttl: self.cache_ttl,
                });
            }
            return Ok(());
        }

        if !destination_exists
            && self.destination_folder.is_dir()
            && storage::is_writable(&self.destination_folder)
        {
            return Ok(());
        }

        if !self.destination_folder.is_dir() && fs::create_dir_all(&self.destination_folder).is_ok()
        {
            tracing::debug!(
                folder = %self.destination_folder.display(),
                "created destination folder"
            );
            return Ok(());
        }

        self.record_warn(format!(
            "Insufficient write permissions to the file [{}].",
            self.destination.display()
        ));
        Err(RefreshError::Config {
            path: self.destination.clone(),
            reason: "not writable".to_string(),
        })
    }

    fn lock_destination(&mut self) -> Result<RefreshLock, RefreshError> {
        RefreshLock::acquire(&self.destination).map_err(|e| {
            self.record_warn(format!(
                "Unable to lock the [{}] file for refreshing: {}.",
                self.destination.display(),
                e
            ));
            RefreshError::Config {
                path: storage::lock_path(&self.destination),
                reason: e.to_string(),
            }
        })
    }

    /// Step 2: conditional HEAD. Only a 200 lets the refresh continue.
    fn check_headers(&mut self) -> Result<(), RefreshError> {
        let since = if self.file_exists {
            storage::modified_at(&self.destination).ok()
        } else {
            None
        };

        let head = match fetch_head::probe(&self.source, since, self.curl) {
            Ok(head) => head,
            Err(e) => {
                self.record_warn(format!(
                    "Header check of file [{}] failed: {}.",
                    self.source, e
                ));
                return Err(RefreshError::Transport(e));
            }
        };

        match head.status {
            200 => Ok(()),
            304 => {
                self.record_info(format!(
                    "Response code: [304] File [{}] has not been modified.",
                    self.source
                ));
                Err(RefreshError::NotModified)
            }
            code => {
                self.record_warn(format!(
                    "Response code: [{}] File [{}] cannot be refreshed.",
                    code, self.source
                ));
                Err(RefreshError::Origin(code))
            }
        }
    }

    /// Step 3: unconditional GET of the full body.
    fn download_source(&mut self) -> Result<Vec<u8>, RefreshError> {
        let download = match downloader::download_body(&self.source, self.curl) {
            Ok(d) => d,
            Err(e) => return Err(self.download_failed(RefreshError::Transport(e))),
        };
        if !(200..300).contains(&download.status) {
            return Err(self.download_failed(RefreshError::Origin(download.status)));
        }
        if download.body.is_empty() {
            return Err(self.download_failed(RefreshError::EmptyBody));
        }

        self.record_info(format!(
            "File [{}] has been downloaded successfully.",
            self.source
        ));
        Ok(download.body)
    }

    fn download_failed(&mut self, err: RefreshError) -> RefreshError {
        self.record_warn(format!(
            "File [{}] has not been downloaded successfully: {}.",
            self.source, err
        ));
        err
    }

    /// Step 4: atomic replace of the destination.
    fn save_source(&mut self, body: &[u8]) -> Result<(), RefreshError> {
        if let Err(e) = storage::persist_atomic(&self.destination, body) {
            self.record_warn(format!(
                "Failed to write data to the [{}] file: {}.",
                self.destination.display(),
                e
            ));
            return Err(e);
        }
        self.record_info(format!(
            "The [{}] file saved successfully.",
            self.destination.display()
        ));
        Ok(())
    }

    fn record_info(&mut self, message: String) {
        tracing::info!(source = %self.source, "{}", message);
        self.log.push(LogEntry::now(message));
    }

    fn record_warn(&mut self, message: String) {
        tracing::warn!(source = %self.source, "{}", message);
        self.log.push(LogEntry::now(message));
    }
}

/// Age of a file modified at `mtime`; zero if `mtime` lies in the future.
fn age_at(mtime: SystemTime, now: SystemTime) -> Duration {
    now.duration_since(mtime).unwrap_or(Duration::ZERO)
}
