//! In-memory version repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use dochub_core::result::AppResult;
use dochub_core::types::VersionId;
use dochub_entity::version::{Version, VersionStatus};

use crate::traits::VersionRepository;

/// Version records held in a single map behind an async lock.
#[derive(Debug, Default)]
pub struct MemoryVersionRepository {
    versions: RwLock<HashMap<VersionId, Version>>,
}

impl MemoryVersionRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a stored record verbatim, bypassing every check.
    ///
    /// Used for fault injection (storage corruption, broken invariants).
    pub async fn put_raw(&self, version: Version) {
        self.versions
            .write()
            .await
            .insert(version.version_id, version);
    }

    /// Number of stored records, deleted ones included.
    pub async fn len(&self) -> usize {
        self.versions.read().await.len()
    }

    /// Whether the repository holds no records.
    pub async fn is_empty(&self) -> bool {
        self.versions.read().await.is_empty()
    }
}

#[async_trait]
impl VersionRepository for MemoryVersionRepository {
    async fn insert_as_current(&self, version: &Version) -> AppResult<Vec<VersionId>> {
        let mut versions = self.versions.write().await;
        let mut cleared = Vec::new();
        for other in versions.values_mut() {
            if other.doc_id == version.doc_id
                && other.is_current
                && other.version_id != version.version_id
            {
                other.is_current = false;
                cleared.push(other.version_id);
            }
        }
        let mut stored = version.clone();
        stored.is_current = true;
        versions.insert(stored.version_id, stored);
        Ok(cleared)
    }

    async fn find_by_id(&self, id: VersionId) -> AppResult<Option<Version>> {
        Ok(self.versions.read().await.get(&id).cloned())
    }

    async fn find_by_document(&self, doc_id: &str) -> AppResult<Vec<Version>> {
        Ok(self
            .versions
            .read()
            .await
            .values()
            .filter(|v| v.doc_id == doc_id)
            .cloned()
            .collect())
    }

    async fn max_version_number(&self, doc_id: &str) -> AppResult<Option<i64>> {
        Ok(self
            .versions
            .read()
            .await
            .values()
            .filter(|v| v.doc_id == doc_id)
            .map(|v| v.version_number)
            .max())
    }

    async fn document_ids(&self) -> AppResult<Vec<String>> {
        let mut ids: Vec<String> = self
            .versions
            .read()
            .await
            .values()
            .map(|v| v.doc_id.clone())
            .collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    async fn set_current(&self, id: VersionId, is_current: bool) -> AppResult<bool> {
        Ok(match self.versions.write().await.get_mut(&id) {
            Some(version) => {
                version.is_current = is_current;
                true
            }
            None => false,
        })
    }

    async fn set_status(&self, id: VersionId, status: VersionStatus) -> AppResult<bool> {
        Ok(match self.versions.write().await.get_mut(&id) {
            Some(version) => {
                version.status = status;
                true
            }
            None => false,
        })
    }
}
