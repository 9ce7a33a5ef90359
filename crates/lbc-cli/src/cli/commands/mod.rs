//! CLI command handlers. Each command is in its own file.

mod fetch;
mod run;
mod status;

pub use fetch::{run_fetch, FetchArgs};
pub use run::run_refresh_all;
pub use status::run_status;

use lbc_core::config::LbcConfig;
use std::path::{Path, PathBuf};

/// Where to flush outcome logs after refreshing; flags win over config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogArgs {
    pub sink: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl LogArgs {
    pub fn resolve(sink: Option<String>, log_file: Option<PathBuf>, cfg: &LbcConfig) -> Self {
        Self {
            sink: sink.or_else(|| cfg.log_sink.clone()),
            log_file: log_file.or_else(|| cfg.log_file.clone()),
        }
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

/// One summary line per resource.
pub(crate) fn outcome_line(name: &str, refreshed: bool, destination: &Path) -> String {
    let outcome = if refreshed { "refreshed" } else { "unchanged" };
    format!("{:<10} {:<24} {}", outcome, name, destination.display())
}
