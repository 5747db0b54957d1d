//! Document version entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use dochub_core::types::VersionId;

use super::operation::{VersionOperation, VersionStatus};

/// An immutable snapshot of a document's content.
///
/// Only `status` and `is_current` change after the record is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    /// Unique version identifier.
    pub version_id: VersionId,
    /// The document this version belongs to.
    pub doc_id: String,
    /// Sequential per-document number, starting at 1.
    pub version_number: i64,
    /// Full text content.
    pub content: String,
    /// Hex SHA-256 of `content`.
    pub content_hash: String,
    /// The version this one was derived from.
    pub parent_version_id: Option<VersionId>,
    /// Who created the version.
    pub author: String,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// What produced the version.
    pub operation: VersionOperation,
    /// Free-text description of the change.
    pub change_summary: String,
    /// Lines added relative to the parent.
    pub lines_added: usize,
    /// Lines removed relative to the parent.
    pub lines_removed: usize,
    /// Lines changed in place relative to the parent.
    pub lines_modified: usize,
    /// Similarity to the parent, 0.0–1.0.
    pub similarity_score: f64,
    /// Soft-delete status.
    pub status: VersionStatus,
    /// Whether this is the document's live version.
    pub is_current: bool,
    /// Snapshot of the document metadata at creation time.
    pub original_metadata: serde_json::Value,
}

impl Version {
    /// Whether the version shows up in default history queries.
    pub fn is_active(&self) -> bool {
        self.status == VersionStatus::Active
    }

    /// Whether `content_hash` still matches `content`.
    pub fn hash_matches(&self) -> bool {
        content_digest(&self.content) == self.content_hash
    }

    /// Content length in bytes.
    pub fn size_bytes(&self) -> usize {
        self.content.len()
    }
}

/// Input for creating a version.
#[derive(Debug, Clone)]
pub struct NewVersion {
    /// Owning document.
    pub doc_id: String,
    /// Full content.
    pub content: String,
    /// Author identifier.
    pub author: String,
    /// Producing operation.
    pub operation: VersionOperation,
    /// Change description.
    pub change_summary: String,
    /// Version to diff against for change metrics.
    pub parent_version_id: Option<VersionId>,
}

impl NewVersion {
    /// Creates a version request with an empty summary and no parent.
    pub fn new(
        doc_id: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
        operation: VersionOperation,
    ) -> Self {
        Self {
            doc_id: doc_id.into(),
            content: content.into(),
            author: author.into(),
            operation,
            change_summary: String::new(),
            parent_version_id: None,
        }
    }

    /// Sets the change summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.change_summary = summary.into();
        self
    }

    /// Sets the parent version.
    pub fn with_parent(mut self, parent: VersionId) -> Self {
        self.parent_version_id = Some(parent);
        self
    }
}

/// Counters returned by a cleanup run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupStats {
    /// Documents examined.
    pub documents_processed: usize,
    /// Versions flipped to `deleted`.
    pub versions_deleted: usize,
    /// Documents whose cleanup failed.
    pub errors: usize,
}

/// Hex-encoded SHA-256 digest of version content.
pub fn content_digest(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_digest_known_value() {
        assert_eq!(
            content_digest(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_new_version_builder() {
        let parent = VersionId::new();
        let new = NewVersion::new("D1", "text", "alice", VersionOperation::Update)
            .with_summary("fix typo")
            .with_parent(parent);
        assert_eq!(new.change_summary, "fix typo");
        assert_eq!(new.parent_version_id, Some(parent));
    }
}
