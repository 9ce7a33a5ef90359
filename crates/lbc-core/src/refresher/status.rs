//! Freshness of a cached copy, for reporting.

use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// No cached copy at the destination.
    Missing,
    /// Younger than the TTL; a run would not touch the network.
    Fresh { age: Duration },
    /// TTL elapsed; a run would probe the origin.
    Stale { age: Duration },
}

impl CacheStatus {
    /// Classifies a copy of `age` against `ttl_secs` with the same
    /// whole-second comparison the destination check uses.
    pub fn from_age(age: Duration, ttl_secs: u64) -> Self {
        if age.as_secs() < ttl_secs {
            CacheStatus::Fresh { age }
        } else {
            CacheStatus::Stale { age }
        }
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheStatus::Missing => write!(f, "missing"),
            CacheStatus::Fresh { age } => write!(f, "fresh ({}s old)", age.as_secs()),
            CacheStatus::Stale { age } => write!(f, "stale ({}s old)", age.as_secs()),
        }
    }
}
