//! Refreshing every configured resource.
//!
//! One `CacheRefresher` per configured name, held in a `BTreeMap` and run
//! sequentially in name order. A source that cannot be turned into a
//! refresher is set aside as rejected and does not stop the others.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::{LbcConfig, ResourceConfig};
use crate::downloader::CurlOptions;
use crate::error::RefreshError;
use crate::refresher::CacheRefresher;

/// Folder and TTL applied to resources that do not set their own.
#[derive(Debug, Clone, Default)]
pub struct BatchDefaults {
    pub cache_dir: Option<PathBuf>,
    pub cache_ttl_secs: Option<u64>,
    pub curl: CurlOptions,
}

impl From<&LbcConfig> for BatchDefaults {
    fn from(cfg: &LbcConfig) -> Self {
        Self {
            cache_dir: cfg.cache_dir.clone(),
            cache_ttl_secs: Some(cfg.cache_ttl_secs),
            curl: CurlOptions::default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Batch {
    refreshers: BTreeMap<String, CacheRefresher>,
    rejected: Vec<(String, RefreshError)>,
}

impl Batch {
    /// Builds and configures one refresher per resource.
    pub fn from_resources(
        resources: &BTreeMap<String, ResourceConfig>,
        defaults: &BatchDefaults,
    ) -> Self {
        Self::build(resources, defaults, FolderSetup::Create)
    }

    fn build(
        resources: &BTreeMap<String, ResourceConfig>,
        defaults: &BatchDefaults,
        folders: FolderSetup,
    ) -> Self {
        let mut batch = Batch::default();
        for (name, resource) in resources {
            match configure(resource, defaults, folders) {
                Ok(refresher) => {
                    batch.refreshers.insert(name.clone(), refresher);
                }
                Err(e) => {
                    tracing::warn!(resource = %name, "skipping resource: {}", e);
                    batch.rejected.push((name.clone(), e));
                }
            }
        }
        batch
    }

    pub fn from_config(cfg: &LbcConfig) -> Self {
        Self::from_resources(&cfg.resources, &BatchDefaults::from(cfg))
    }

    /// Like `from_config` but never creates destination folders.
    /// The result is for `status`-style reporting.
    pub fn inspect(cfg: &LbcConfig) -> Self {
        Self::build(&cfg.resources, &BatchDefaults::from(cfg), FolderSetup::Point)
    }

    /// Runs every refresher once. Returns `name → replaced`.
    pub fn run_all(&mut self) -> BTreeMap<String, bool> {
        self.refreshers
            .iter_mut()
            .map(|(name, refresher)| {
                let refreshed = refresher.run();
                tracing::debug!(resource = %name, refreshed, "resource run finished");
                (name.clone(), refreshed)
            })
            .collect()
    }

    /// Flushes every refresher's log to `sink`. Returns how many had entries written.
    pub fn log_all(&self, sink: &str, log_file: Option<&Path>) -> usize {
        self.refreshers
            .values()
            .filter(|r| r.log(sink, log_file))
            .count()
    }

    pub fn get(&self, name: &str) -> Option<&CacheRefresher> {
        self.refreshers.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CacheRefresher)> {
        self.refreshers.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.refreshers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refreshers.is_empty()
    }

    /// Resources whose source could not be used, with the reason.
    pub fn rejected(&self) -> &[(String, RefreshError)] {
        &self.rejected
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FolderSetup {
    /// `set_destination_folder`: create missing folders.
    Create,
    /// `with_destination_folder`: leave the filesystem alone.
    Point,
}

fn configure(
    resource: &ResourceConfig,
    defaults: &BatchDefaults,
    folders: FolderSetup,
) -> Result<CacheRefresher, RefreshError> {
    let mut refresher = CacheRefresher::new(&resource.source)?.with_curl_options(defaults.curl);
    if let Some(folder) = resource
        .destination_folder
        .as_ref()
        .or(defaults.cache_dir.as_ref())
    {
        match folders {
            FolderSetup::Create => refresher.set_destination_folder(folder),
            FolderSetup::Point => refresher = refresher.with_destination_folder(folder),
        }
    }
    if let Some(ttl) = defaults.cache_ttl_secs {
        refresher.set_cache_ttl(ttl);
    }
    if let Some(ttl) = resource.cache_ttl_secs {
        refresher.set_cache_ttl(ttl);
    }
    Ok(refresher)
}
