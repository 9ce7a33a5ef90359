//! `lbc fetch <url>` – refresh one ad-hoc resource.

use anyhow::{Context, Result};
use lbc_core::config::LbcConfig;
use lbc_core::CacheRefresher;
use std::path::PathBuf;

use super::{outcome_line, LogArgs};

#[derive(Debug, Clone)]
pub struct FetchArgs {
    pub url: String,
    pub dest_dir: Option<PathBuf>,
    pub ttl: Option<i64>,
}

pub fn run_fetch(cfg: &LbcConfig, args: &FetchArgs, log: &LogArgs) -> Result<()> {
    let mut refresher = CacheRefresher::new(&args.url)
        .with_context(|| format!("cannot cache {}", args.url))?;
    if let Some(dir) = args.dest_dir.as_ref().or(cfg.cache_dir.as_ref()) {
        refresher.set_destination_folder(dir);
    }
    refresher.set_cache_ttl(cfg.cache_ttl_secs);
    if let Some(ttl) = args.ttl {
        refresher.set_cache_ttl(ttl);
    }

    let outcome = refresher.refresh();
    if let Err(e) = &outcome {
        tracing::debug!("not refreshed: {}", e);
    }
    println!(
        "{}",
        outcome_line(&args.url, outcome.is_ok(), refresher.destination())
    );

    if let Some(sink) = &log.sink {
        if !refresher.log(sink, log.log_file()) {
            tracing::warn!(sink = %sink, "resource log was not written");
        }
    }
    Ok(())
}
