//! Version store: creation, lookup, history, and cleanup of versions.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use dochub_cache::VersionCache;
use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_core::types::VersionId;
use dochub_database::traits::{ContentIndex, DocumentMetadataProvider, VersionRepository};
use dochub_entity::diff::VersionDiff;
use dochub_entity::document::DocumentUpdate;
use dochub_entity::validation::Severity;
use dochub_entity::version::{
    CleanupStats, NewVersion, Version, VersionStatus, content_digest,
};

use crate::diff::DiffEngine;
use crate::lock::DocumentLocks;
use crate::validation::{Validator, has_critical, messages};

/// Owns the version records of every document.
///
/// Writes to one document are serialized through [`DocumentLocks`];
/// reads never take a lock.
#[derive(Debug, Clone)]
pub struct VersionStore {
    /// Version persistence.
    versions: Arc<dyn VersionRepository>,
    /// Document metadata owned by the document service.
    documents: Arc<dyn DocumentMetadataProvider>,
    /// Searchable index of current content.
    index: Arc<dyn ContentIndex>,
    /// Read-through version cache.
    cache: VersionCache,
    /// Input and integrity checks.
    validator: Validator,
    /// Change metrics.
    diff: DiffEngine,
    /// Per-document write locks.
    locks: DocumentLocks,
}

impl VersionStore {
    /// Creates a new version store.
    pub fn new(
        versions: Arc<dyn VersionRepository>,
        documents: Arc<dyn DocumentMetadataProvider>,
        index: Arc<dyn ContentIndex>,
        cache: VersionCache,
        validator: Validator,
        diff: DiffEngine,
    ) -> Self {
        Self {
            versions,
            documents,
            index,
            cache,
            validator,
            diff,
            locks: DocumentLocks::new(),
        }
    }

    /// Runs `job` against the diff engine on the blocking thread pool.
    pub async fn with_diff_engine<T, F>(&self, job: F) -> AppResult<T>
    where
        F: FnOnce(&DiffEngine) -> T + Send + 'static,
        T: Send + 'static,
    {
        let engine = self.diff.clone();
        tokio::task::spawn_blocking(move || job(&engine))
            .await
            .map_err(|e| AppError::internal(format!("Diff task failed: {e}")))
    }

    /// Diffs `old` against `new` off the async workers.
    pub async fn measure(&self, old: String, new: String) -> AppResult<VersionDiff> {
        self.with_diff_engine(move |engine| engine.diff(&old, &new)).await
    }

    /// Creates a new version and makes it the document's current one.
    pub async fn create_version(&self, new: NewVersion) -> AppResult<Version> {
        let findings = self.validator.validate_version_creation(
            &new.doc_id,
            &new.content,
            &new.author,
            new.operation,
            &new.change_summary,
        );
        for warning in messages(&findings, Severity::Warning) {
            warn!(doc_id = %new.doc_id, author = %new.author, "{warning}");
        }
        if has_critical(&findings) {
            return Err(AppError::validation(
                messages(&findings, Severity::Critical).join("; "),
            ));
        }

        let document = self
            .documents
            .get_document(&new.doc_id)
            .await
            .map_err(|e| storage_failure(&new.doc_id, "read document metadata", e))?
            .ok_or_else(|| AppError::not_found(format!("Document '{}' not found", new.doc_id)))?;

        // Parent content is immutable, so metrics are computed before the
        // write lock is taken.
        let metrics = match new.parent_version_id {
            Some(parent_id) => {
                let parent = self
                    .versions
                    .find_by_id(parent_id)
                    .await
                    .map_err(|e| storage_failure(&new.doc_id, "read parent version", e))?
                    .filter(|p| p.doc_id == new.doc_id)
                    .and_then(|p| self.verified(p))
                    .ok_or_else(|| {
                        AppError::not_found(format!("Parent version {parent_id} not found"))
                    })?;
                Some(self.measure(parent.content, new.content.clone()).await?)
            }
            None => None,
        };

        let _guard = self.locks.acquire(&new.doc_id).await;

        let version_number = self
            .versions
            .max_version_number(&new.doc_id)
            .await
            .map_err(|e| storage_failure(&new.doc_id, "read version numbers", e))?
            .unwrap_or(0)
            + 1;

        let version = Version {
            version_id: VersionId::new(),
            doc_id: new.doc_id.clone(),
            version_number,
            content_hash: content_digest(&new.content),
            content: new.content,
            parent_version_id: new.parent_version_id,
            author: new.author,
            timestamp: Utc::now(),
            operation: new.operation,
            change_summary: new.change_summary,
            lines_added: metrics.as_ref().map_or(0, |d| d.lines_added),
            lines_removed: metrics.as_ref().map_or(0, |d| d.lines_removed),
            lines_modified: metrics.as_ref().map_or(0, |d| d.lines_modified),
            similarity_score: metrics.as_ref().map_or(1.0, |d| d.similarity_score),
            status: VersionStatus::Active,
            is_current: true,
            original_metadata: serde_json::to_value(&document)?,
        };

        let cleared = self
            .versions
            .insert_as_current(&version)
            .await
            .map_err(|e| storage_failure(&version.doc_id, "store version", e))?;
        for id in cleared {
            self.cache.invalidate_version(id).await;
        }

        self.index
            .replace_document_chunks(&version.doc_id, &version.content)
            .await
            .map_err(|e| storage_failure(&version.doc_id, "update content index", e))?;

        let update = DocumentUpdate {
            last_modified: Some(version.timestamp),
            last_modified_by: Some(version.author.clone()),
            current_version_id: Some(version.version_id),
            current_version_number: Some(version.version_number),
        };
        self.documents
            .update_document_metadata(&version.doc_id, &update)
            .await
            .map_err(|e| storage_failure(&version.doc_id, "update document metadata", e))?;

        info!(
            doc_id = %version.doc_id,
            version_id = %version.version_id,
            version_number = version.version_number,
            author = %version.author,
            operation = %version.operation,
            "Version created"
        );

        Ok(version)
    }

    /// Looks up a version. Missing, unreadable, and corrupted versions all
    /// come back as `None`.
    pub async fn get_version(&self, version_id: VersionId) -> Option<Version> {
        if let Some(cached) = self.cache.get_version(version_id).await {
            return self.verified(cached);
        }

        match self.versions.find_by_id(version_id).await {
            Ok(Some(version)) => {
                let version = self.verified(version)?;
                // The current flag changes on the next write; only settled
                // versions are cached.
                if !version.is_current {
                    self.cache.put_version(&version).await;
                }
                Some(version)
            }
            Ok(None) => None,
            Err(e) => {
                error!(version_id = %version_id, error = %e, "Failed to load version");
                None
            }
        }
    }

    /// Content of a version.
    pub async fn get_version_content(&self, version_id: VersionId) -> Option<String> {
        self.get_version(version_id).await.map(|v| v.content)
    }

    /// Versions of a document, newest first.
    pub async fn get_version_history(
        &self,
        doc_id: &str,
        limit: Option<usize>,
        include_deleted: bool,
    ) -> Vec<Version> {
        let versions = match self.versions.find_by_document(doc_id).await {
            Ok(versions) => versions,
            Err(e) => {
                error!(doc_id, error = %e, "Failed to load version history");
                return Vec::new();
            }
        };

        let mut history: Vec<Version> = versions
            .into_iter()
            .filter(|v| include_deleted || v.is_active())
            .filter_map(|v| self.verified(v))
            .collect();
        history.sort_by(|a, b| b.version_number.cmp(&a.version_number));
        if let Some(limit) = limit {
            history.truncate(limit);
        }
        history
    }

    /// The document's current version.
    ///
    /// If storage holds more than one current version, the highest number
    /// wins and the flag is cleared on the others.
    pub async fn get_current_version(&self, doc_id: &str) -> Option<Version> {
        let versions = match self.versions.find_by_document(doc_id).await {
            Ok(versions) => versions,
            Err(e) => {
                error!(doc_id, error = %e, "Failed to load current version");
                return None;
            }
        };

        let mut current: Vec<Version> = versions
            .into_iter()
            .filter(|v| v.is_current && v.is_active())
            .collect();
        match current.len() {
            0 => None,
            1 => current.pop().and_then(|v| self.verified(v)),
            count => {
                error!(doc_id, count, "Multiple current versions found, repairing");
                self.heal_current(doc_id).await
            }
        }
    }

    /// Diff between two versions, oldest argument first.
    pub async fn compare_versions(
        &self,
        version_a: VersionId,
        version_b: VersionId,
    ) -> Option<VersionDiff> {
        let a = self.get_version(version_a).await?;
        let b = self.get_version(version_b).await?;
        match self.measure(a.content, b.content).await {
            Ok(diff) => Some(diff),
            Err(e) => {
                error!(%version_a, %version_b, error = %e, "Failed to compare versions");
                None
            }
        }
    }

    /// Soft-deletes all but the newest `keep_versions` active versions of
    /// one document, or of every document when `doc_id` is `None`. The
    /// current version is never deleted.
    pub async fn cleanup_old_versions(
        &self,
        doc_id: Option<&str>,
        keep_versions: usize,
    ) -> CleanupStats {
        let mut stats = CleanupStats::default();

        let doc_ids = match doc_id {
            Some(id) => vec![id.to_string()],
            None => match self.versions.document_ids().await {
                Ok(ids) => ids,
                Err(e) => {
                    error!(error = %e, "Failed to list documents for cleanup");
                    stats.errors += 1;
                    return stats;
                }
            },
        };

        for doc_id in doc_ids {
            stats.documents_processed += 1;
            match self.cleanup_document(&doc_id, keep_versions).await {
                Ok(deleted) => stats.versions_deleted += deleted,
                Err(e) => {
                    warn!(doc_id = %doc_id, error = %e, "Version cleanup failed");
                    stats.errors += 1;
                }
            }
        }

        info!(
            documents = stats.documents_processed,
            deleted = stats.versions_deleted,
            errors = stats.errors,
            "Version cleanup finished"
        );
        stats
    }

    async fn cleanup_document(&self, doc_id: &str, keep_versions: usize) -> AppResult<usize> {
        let _guard = self.locks.acquire(doc_id).await;

        let mut active: Vec<Version> = self
            .versions
            .find_by_document(doc_id)
            .await?
            .into_iter()
            .filter(Version::is_active)
            .collect();
        active.sort_by(|a, b| b.version_number.cmp(&a.version_number));

        let mut deleted = 0;
        for version in active.iter().skip(keep_versions).filter(|v| !v.is_current) {
            if self
                .versions
                .set_status(version.version_id, VersionStatus::Deleted)
                .await?
            {
                self.cache.invalidate_version(version.version_id).await;
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    async fn heal_current(&self, doc_id: &str) -> Option<Version> {
        let _guard = self.locks.acquire(doc_id).await;

        let versions = match self.versions.find_by_document(doc_id).await {
            Ok(versions) => versions,
            Err(e) => {
                error!(doc_id, error = %e, "Failed to reload versions for repair");
                return None;
            }
        };

        let mut current: Vec<Version> = versions
            .into_iter()
            .filter(|v| v.is_current && v.is_active())
            .collect();
        current.sort_by(|a, b| b.version_number.cmp(&a.version_number));

        let mut stale = current.into_iter();
        let winner = stale.next()?;
        for version in stale {
            match self.versions.set_current(version.version_id, false).await {
                Ok(_) => {
                    self.cache.invalidate_version(version.version_id).await;
                    warn!(
                        doc_id,
                        version_id = %version.version_id,
                        version_number = version.version_number,
                        "Cleared stale current flag"
                    );
                }
                Err(e) => {
                    error!(doc_id, version_id = %version.version_id, error = %e, "Failed to clear current flag");
                }
            }
        }
        self.verified(winner)
    }

    /// Passes a version through integrity validation.
    fn verified(&self, version: Version) -> Option<Version> {
        let findings = self.validator.validate_version_data_integrity(&version);
        if has_critical(&findings) {
            error!(
                doc_id = %version.doc_id,
                version_id = %version.version_id,
                issues = %messages(&findings, Severity::Critical).join("; "),
                "Version failed integrity validation"
            );
            return None;
        }
        Some(version)
    }
}

fn storage_failure(doc_id: &str, action: &str, source: AppError) -> AppError {
    error!(doc_id, action, error = %source, "Version storage failure");
    AppError::with_source(
        ErrorKind::Database,
        format!("Failed to {action} for document '{doc_id}'; the operation can be retried"),
        source,
    )
}
