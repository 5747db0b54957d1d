//! Cache configuration.

use serde::{Deserialize, Serialize};

/// In-process cache configuration for versions and pending conflicts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries held in the cache.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// TTL for cached version records in seconds.
    #[serde(default = "default_version_ttl")]
    pub version_ttl_seconds: u64,
    /// How long a detected conflict stays resolvable, in seconds.
    #[serde(default = "default_conflict_ttl")]
    pub conflict_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            version_ttl_seconds: default_version_ttl(),
            conflict_ttl_seconds: default_conflict_ttl(),
        }
    }
}

fn default_max_capacity() -> u64 {
    10_000
}

fn default_version_ttl() -> u64 {
    60
}

fn default_conflict_ttl() -> u64 {
    3600
}
