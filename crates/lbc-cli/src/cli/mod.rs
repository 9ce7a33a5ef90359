//! CLI for the LBC asset refresher.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lbc_core::config::{self, LbcConfig};
use std::path::PathBuf;

use commands::{run_fetch, run_refresh_all, run_status, FetchArgs, LogArgs};

/// Top-level CLI for the LBC asset refresher.
#[derive(Debug, Parser)]
#[command(name = "lbc")]
#[command(about = "LBC: keep local copies of third-party assets fresh", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/lbc/config.toml, created on first use).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Refresh every resource in the config.
    Run {
        /// Flush each resource's log to "screen", "console" or "file".
        #[arg(long, value_name = "SINK")]
        log: Option<String>,
        /// Log file for the "file" sink.
        #[arg(long, value_name = "PATH")]
        log_file: Option<PathBuf>,
    },

    /// Refresh a single resource given on the command line.
    Fetch {
        /// Absolute HTTP/HTTPS URL of the resource.
        url: String,
        /// Folder to cache into (default: config cache_dir, else `files` next to lbc).
        #[arg(long, value_name = "DIR")]
        dest_dir: Option<PathBuf>,
        /// Cache lifetime in seconds (default: config cache_ttl_secs).
        #[arg(long, value_name = "SECS", allow_negative_numbers = true)]
        ttl: Option<i64>,
        /// Flush the resource's log to "screen", "console" or "file".
        #[arg(long, value_name = "SINK")]
        log: Option<String>,
        /// Log file for the "file" sink.
        #[arg(long, value_name = "PATH")]
        log_file: Option<PathBuf>,
    },

    /// Show destination and freshness of every configured resource.
    Status,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run { log, log_file } => {
                run_refresh_all(&cfg, &LogArgs::resolve(log, log_file, &cfg))?
            }
            CliCommand::Fetch {
                url,
                dest_dir,
                ttl,
                log,
                log_file,
            } => {
                let args = FetchArgs { url, dest_dir, ttl };
                run_fetch(&cfg, &args, &LogArgs::resolve(log, log_file, &cfg))?;
            }
            CliCommand::Status => run_status(&cfg)?,
        }

        Ok(())
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<LbcConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

#[cfg(test)]
mod tests;
