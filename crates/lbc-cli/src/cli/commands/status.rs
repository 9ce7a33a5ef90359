//! `lbc status` – show destination and freshness of every resource.

use anyhow::Result;
use lbc_core::config::LbcConfig;
use lbc_core::Batch;
use std::time::SystemTime;

pub fn run_status(cfg: &LbcConfig) -> Result<()> {
    let batch = Batch::inspect(cfg);
    for (name, err) in batch.rejected() {
        println!("{:<24} invalid: {}", name, err);
    }
    if batch.is_empty() {
        println!("No resources configured.");
        return Ok(());
    }

    let now = SystemTime::now();
    println!("{:<24} {:<8} {:<20} {}", "NAME", "TTL", "STATUS", "DESTINATION");
    for (name, refresher) in batch.iter() {
        println!(
            "{:<24} {:<8} {:<20} {}",
            name,
            refresher.cache_ttl(),
            refresher.status(now).to_string(),
            refresher.destination().display()
        );
    }
    Ok(())
}
