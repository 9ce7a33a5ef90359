//! Per-resource outcome log: entries, sinks and rendering.

use chrono::{DateTime, Local};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// One recorded event of a refresher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Local time the event was recorded.
    pub at: DateTime<Local>,
    pub message: String,
}

impl LogEntry {
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            at: Local::now(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.at.format("%Y-%m-%d %H:%M:%S"), self.message)
    }
}

/// Where `CacheRefresher::log` sends its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// One entry per line on standard output.
    Screen,
    /// All entries on one line, separated by a literal `\n`, on standard error.
    Console,
    /// Appended to a log file.
    File,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown log sink [{0}]; expected screen, console or file")]
pub struct UnknownSink(pub String);

impl FromStr for LogSink {
    type Err = UnknownSink;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "screen" => Ok(LogSink::Screen),
            "console" => Ok(LogSink::Console),
            "file" => Ok(LogSink::File),
            _ => Err(UnknownSink(s.to_string())),
        }
    }
}

/// Renders `entries` for `sink`, each prefixed with its timestamp.
pub fn render(sink: LogSink, entries: &[LogEntry]) -> String {
    let separator = match sink {
        LogSink::Console => "\\n",
        LogSink::Screen | LogSink::File => "\n",
    };
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.to_string());
        out.push_str(separator);
    }
    out
}

/// Writes rendered `entries` to `sink`. `log_file` is only used by `LogSink::File`.
pub fn write_entries(sink: LogSink, entries: &[LogEntry], log_file: &Path) -> io::Result<()> {
    let content = render(sink, entries);
    match sink {
        LogSink::Screen => {
            let mut out = io::stdout().lock();
            out.write_all(content.as_bytes())?;
            out.flush()
        }
        LogSink::Console => {
            let mut err = io::stderr().lock();
            writeln!(err, "{}", content)
        }
        LogSink::File => {
            if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let mut file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)?;
            file.write_all(content.as_bytes())
        }
    }
}
