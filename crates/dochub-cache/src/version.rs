//! Typed caches for version records and pending conflicts.
//!
//! Cache failures never fail the caller: reads degrade to a miss and
//! writes are dropped, both with a warning.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use dochub_core::config::CacheConfig;
use dochub_core::traits::cache::CacheProvider;
use dochub_core::types::{ConflictId, VersionId};
use dochub_entity::conflict::VersionConflict;
use dochub_entity::version::Version;

use crate::keys;
use crate::provider::CacheManager;

/// Read-through cache for versions plus the conflict store.
#[derive(Debug, Clone)]
pub struct VersionCache {
    cache: Arc<CacheManager>,
    version_ttl: Duration,
    conflict_ttl: Duration,
}

impl VersionCache {
    /// Create a cache over an existing manager.
    pub fn new(cache: Arc<CacheManager>, config: &CacheConfig) -> Self {
        Self {
            cache,
            version_ttl: Duration::from_secs(config.version_ttl_seconds),
            conflict_ttl: Duration::from_secs(config.conflict_ttl_seconds),
        }
    }

    /// Create a cache with its own in-memory provider.
    pub fn in_memory(config: &CacheConfig) -> Self {
        Self::new(Arc::new(CacheManager::new(config)), config)
    }

    /// Cached version, if present.
    pub async fn get_version(&self, id: VersionId) -> Option<Version> {
        match self.cache.get_json::<Version>(&keys::version_by_id(id)).await {
            Ok(found) => found,
            Err(e) => {
                warn!(version_id = %id, error = %e, "Version cache read failed");
                None
            }
        }
    }

    /// Store a version.
    pub async fn put_version(&self, version: &Version) {
        let key = keys::version_by_id(version.version_id);
        if let Err(e) = self.cache.set_json(&key, version, self.version_ttl).await {
            warn!(version_id = %version.version_id, error = %e, "Version cache write failed");
        }
    }

    /// Drop a version whose flags changed.
    pub async fn invalidate_version(&self, id: VersionId) {
        if let Err(e) = self.cache.delete(&keys::version_by_id(id)).await {
            warn!(version_id = %id, error = %e, "Version cache invalidation failed");
        }
    }

    /// Pending conflict, if it has not expired.
    pub async fn get_conflict(&self, id: ConflictId) -> Option<VersionConflict> {
        match self
            .cache
            .get_json::<VersionConflict>(&keys::conflict_by_id(id))
            .await
        {
            Ok(found) => found,
            Err(e) => {
                warn!(conflict_id = %id, error = %e, "Conflict cache read failed");
                None
            }
        }
    }

    /// Store a conflict until it is resolved or expires.
    pub async fn put_conflict(&self, conflict: &VersionConflict) {
        let key = keys::conflict_by_id(conflict.conflict_id);
        if let Err(e) = self.cache.set_json(&key, conflict, self.conflict_ttl).await {
            warn!(conflict_id = %conflict.conflict_id, error = %e, "Conflict cache write failed");
        }
    }

    /// Forget a resolved conflict.
    pub async fn remove_conflict(&self, id: ConflictId) {
        if let Err(e) = self.cache.delete(&keys::conflict_by_id(id)).await {
            warn!(conflict_id = %id, error = %e, "Conflict cache removal failed");
        }
    }
}
