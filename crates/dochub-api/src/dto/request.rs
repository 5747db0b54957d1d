//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use dochub_core::types::VersionId;
use dochub_entity::conflict::ResolutionStrategy;
use dochub_entity::version::VersionOperation;

/// Register document request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterDocumentRequest {
    /// Document identifier.
    #[validate(length(min = 1, max = 256, message = "doc_id must be 1-256 characters"))]
    pub doc_id: String,
    /// Title.
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Document type, e.g. `markdown` or `pdf`.
    #[serde(default = "default_doc_type")]
    pub doc_type: String,
    /// Free-form metadata.
    #[serde(default)]
    pub extra: serde_json::Value,
}

fn default_doc_type() -> String {
    "text".to_string()
}

/// Create version request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVersionRequest {
    /// Full content of the new version.
    pub content: String,
    /// Author.
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    /// Operation; defaults to `create` for a new document and `update` otherwise.
    pub operation: Option<VersionOperation>,
    /// Change description.
    #[serde(default)]
    pub change_summary: String,
    /// Parent version; defaults to the current version.
    pub parent_version_id: Option<VersionId>,
}

/// Version history query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct HistoryQuery {
    /// Maximum number of versions to return.
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<usize>,
    /// Include cleaned-up versions.
    #[serde(default)]
    pub include_deleted: bool,
}

/// Rollback request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RollbackRequest {
    /// Version whose content becomes current again.
    pub target_version_id: VersionId,
    /// Author of the rollback.
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    /// Skip the safety check.
    #[serde(default)]
    pub force: bool,
}

/// Conflict detection request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DetectConflictRequest {
    /// Version the edit was based on.
    pub base_version_id: VersionId,
    /// Edited content.
    pub content: String,
}

/// Conflict resolution request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResolveConflictRequest {
    /// Strategy to apply.
    pub strategy: ResolutionStrategy,
    /// Author of the resolution.
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    /// Content for `manual`, optional override for `force_overwrite`.
    pub merged_content: Option<String>,
}

/// Cleanup request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CleanupRequest {
    /// Restrict cleanup to one document.
    pub doc_id: Option<String>,
    /// Versions to keep per document.
    #[validate(range(min = 1, message = "keep_versions must be at least 1"))]
    pub keep_versions: Option<usize>,
}
