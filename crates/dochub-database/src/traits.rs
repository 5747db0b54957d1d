//! Collaborator traits consumed by the versioning services.

use std::fmt::Debug;

use async_trait::async_trait;

use dochub_core::result::AppResult;
use dochub_core::types::VersionId;
use dochub_entity::document::{DocumentMetadata, DocumentUpdate};
use dochub_entity::version::{Version, VersionStatus};

/// Storage for version records.
///
/// Records are append-only; only the current flag and the status of an
/// existing record may change.
#[async_trait]
pub trait VersionRepository: Send + Sync + Debug + 'static {
    /// Persist `version` and clear `is_current` on every other version of
    /// the same document, atomically. Returns the ids whose flag was cleared.
    async fn insert_as_current(&self, version: &Version) -> AppResult<Vec<VersionId>>;

    /// Find a version by id.
    async fn find_by_id(&self, id: VersionId) -> AppResult<Option<Version>>;

    /// All versions of a document regardless of status, in no particular order.
    async fn find_by_document(&self, doc_id: &str) -> AppResult<Vec<Version>>;

    /// Highest version number ever assigned for a document.
    async fn max_version_number(&self, doc_id: &str) -> AppResult<Option<i64>>;

    /// Every document id that has at least one version.
    async fn document_ids(&self) -> AppResult<Vec<String>>;

    /// Set the current flag of one version. Returns `false` if it does not exist.
    async fn set_current(&self, id: VersionId, is_current: bool) -> AppResult<bool>;

    /// Set the status of one version. Returns `false` if it does not exist.
    async fn set_status(&self, id: VersionId, status: VersionStatus) -> AppResult<bool>;
}

/// Access to the metadata of documents owned by the document service.
#[async_trait]
pub trait DocumentMetadataProvider: Send + Sync + Debug + 'static {
    /// Fetch a document's metadata.
    async fn get_document(&self, doc_id: &str) -> AppResult<Option<DocumentMetadata>>;

    /// Apply a partial update. Returns `false` if the document is unknown.
    async fn update_document_metadata(&self, doc_id: &str, update: &DocumentUpdate)
    -> AppResult<bool>;

    /// Register (or replace) a document.
    async fn register_document(&self, metadata: &DocumentMetadata) -> AppResult<()>;
}

/// The searchable index that mirrors each document's current content.
#[async_trait]
pub trait ContentIndex: Send + Sync + Debug + 'static {
    /// Replace all chunks of a document with chunks of `content`.
    /// Returns the number of chunks written.
    async fn replace_document_chunks(&self, doc_id: &str, content: &str) -> AppResult<usize>;
}
