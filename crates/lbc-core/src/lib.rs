pub mod config;
pub mod logging;

pub mod batch;
pub mod downloader;
pub mod error;
pub mod fetch_head;
pub mod refresher;
pub mod storage;
pub mod url_model;

pub use batch::{Batch, BatchDefaults};
pub use error::RefreshError;
pub use refresher::{CacheRefresher, CacheStatus, LogEntry, LogSink, Refreshed};
