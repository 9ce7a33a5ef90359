//! Process trace for `lbc`.
//!
//! Events go to `lbc-trace.log` under the XDG state dir, one appended line
//! each. If that file cannot be opened the CLI falls back to stderr. The trace
//! is separate from the outcome log each `CacheRefresher` keeps for its caller.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Overrides `DEFAULT_FILTER`; uses `EnvFilter` directive syntax.
pub const LOG_ENV: &str = "LBC_LOG";

const DEFAULT_FILTER: &str = "info,lbc=debug,lbc_core=debug";
const TRACE_FILE_NAME: &str = "lbc-trace.log";

/// Filter from `directives`, or the default when absent or unparsable.
fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn env_filter() -> EnvFilter {
    filter_from(std::env::var(LOG_ENV).ok().as_deref())
}

/// `$XDG_STATE_HOME/lbc/lbc-trace.log`, creating the folder.
pub fn trace_log_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("lbc")?;
    dirs.place_state_file(TRACE_FILE_NAME)
        .context("create lbc state directory")
}

/// Installs the global subscriber, appending to the default trace file.
pub fn init_logging() -> Result<()> {
    init_logging_to(&trace_log_path()?)
}

/// Installs the global subscriber, appending to `path`.
///
/// Fails if the file cannot be opened or a subscriber is already set.
pub fn init_logging_to(path: &Path) -> Result<()> {
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open trace log {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber: {}", e))?;

    tracing::info!(trace_log = %path.display(), "lbc {} starting", env!("CARGO_PKG_VERSION"));
    Ok(())
}

/// Stderr-only subscriber for when the trace file is unavailable.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
