//! `lbc run` – refresh every configured resource.

use anyhow::Result;
use lbc_core::config::LbcConfig;
use lbc_core::Batch;

use super::{outcome_line, LogArgs};

pub fn run_refresh_all(cfg: &LbcConfig, log: &LogArgs) -> Result<()> {
    let mut batch = Batch::from_config(cfg);
    for (name, err) in batch.rejected() {
        eprintln!("skipping {name}: {err}");
    }
    if batch.is_empty() {
        println!("No resources configured.");
        return Ok(());
    }

    let results = batch.run_all();
    for (name, refresher) in batch.iter() {
        let refreshed = results.get(name).copied().unwrap_or(false);
        println!("{}", outcome_line(name, refreshed, refresher.destination()));
    }
    let refreshed = results.values().filter(|r| **r).count();
    tracing::info!(refreshed, total = results.len(), "refresh run finished");

    if let Some(sink) = &log.sink {
        let flushed = batch.log_all(sink, log.log_file());
        if flushed == 0 {
            tracing::warn!(sink = %sink, "no resource log was written");
        }
    }
    Ok(())
}
