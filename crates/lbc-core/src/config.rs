use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::refresher::DEFAULT_CACHE_TTL_SECS;

/// Name of the default cache folder, next to the running program.
pub const DEFAULT_CACHE_DIR_NAME: &str = "files";

/// Name of the default outcome log file inside the default cache folder.
pub const DEFAULT_LOG_FILE_NAME: &str = "lbc.log";

/// One vendored asset (`[resources.<name>]` in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Absolute URL of the remote resource.
    pub source: String,
    /// Folder for this resource; falls back to the global `cache_dir`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_folder: Option<PathBuf>,
    /// TTL for this resource; negative values are ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_ttl_secs: Option<i64>,
}

impl ResourceConfig {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination_folder: None,
            cache_ttl_secs: None,
        }
    }
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

/// Global configuration loaded from `~/.config/lbc/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LbcConfig {
    /// Folder for cached files (None = `files` next to the program).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
    /// TTL applied to every resource without its own.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Sink the driver flushes each resource's log to: "screen", "console" or "file".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_sink: Option<String>,
    /// Log file for the "file" sink (None = `lbc.log` in the default cache folder).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Resources keyed by a stable name.
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceConfig>,
}

impl Default for LbcConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            log_sink: None,
            log_file: None,
            resources: BTreeMap::new(),
        }
    }
}

impl LbcConfig {
    /// Configuration written on first use: one analytics script, file logging.
    pub fn sample() -> Self {
        let mut resources = BTreeMap::new();
        resources.insert(
            "google_analytics".to_string(),
            ResourceConfig::new("http://www.google-analytics.com/analytics.js"),
        );
        Self {
            log_sink: Some("file".to_string()),
            resources,
            ..Self::default()
        }
    }
}

/// `files` next to the running executable, or `./files` if that is unknown.
pub fn default_cache_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_CACHE_DIR_NAME)
}

/// `lbc.log` inside the default cache folder.
pub fn default_log_path() -> PathBuf {
    default_cache_dir().join(DEFAULT_LOG_FILE_NAME)
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("lbc")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a sample file if none exists.
pub fn load_or_init() -> Result<LbcConfig> {
    let path = config_path()?;
    if !path.exists() {
        let sample_cfg = LbcConfig::sample();
        let toml = toml::to_string_pretty(&sample_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created sample config at {}", path.display());
        return Ok(sample_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<LbcConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: LbcConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
