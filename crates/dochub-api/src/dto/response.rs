//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dochub_core::types::VersionId;
use dochub_entity::conflict::VersionConflict;
use dochub_entity::version::{Version, VersionOperation, VersionStatus};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }

    /// Wraps the result of an operation that reports its own success.
    pub fn outcome(success: bool, data: T) -> Self {
        Self { success, data }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database cannot be reached.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Storage backend in use.
    pub backend: String,
    /// `in_process`, `connected` or `unreachable`.
    pub database: String,
}

/// Version without its content, for history listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionSummary {
    pub version_id: VersionId,
    pub doc_id: String,
    pub version_number: i64,
    pub parent_version_id: Option<VersionId>,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub operation: VersionOperation,
    pub change_summary: String,
    pub lines_added: usize,
    pub lines_removed: usize,
    pub lines_modified: usize,
    pub similarity_score: f64,
    pub status: VersionStatus,
    pub is_current: bool,
    pub content_hash: String,
    pub size_bytes: usize,
}

impl From<&Version> for VersionSummary {
    fn from(v: &Version) -> Self {
        Self {
            version_id: v.version_id,
            doc_id: v.doc_id.clone(),
            version_number: v.version_number,
            parent_version_id: v.parent_version_id,
            author: v.author.clone(),
            timestamp: v.timestamp,
            operation: v.operation,
            change_summary: v.change_summary.clone(),
            lines_added: v.lines_added,
            lines_removed: v.lines_removed,
            lines_modified: v.lines_modified,
            similarity_score: v.similarity_score,
            status: v.status,
            is_current: v.is_current,
            content_hash: v.content_hash.clone(),
            size_bytes: v.size_bytes(),
        }
    }
}

/// Raw content of a version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionContentResponse {
    /// Version ID.
    pub version_id: VersionId,
    /// Full content.
    pub content: String,
}

/// Conflict detection result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckResponse {
    /// Whether the edit overlaps with changes made since its base.
    pub has_conflict: bool,
    /// The stored conflict, when there is one.
    pub conflict: Option<VersionConflict>,
}
