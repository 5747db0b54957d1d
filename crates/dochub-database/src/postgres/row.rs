//! Mapping between domain entities and table rows.
//!
//! This module is the only place that knows how a [`Version`] is laid out
//! in `document_versions`; enums are stored as lowercase text and counters
//! as `BIGINT`.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::warn;
use uuid::Uuid;

use dochub_core::error::AppError;
use dochub_core::types::VersionId;
use dochub_entity::document::DocumentMetadata;
use dochub_entity::version::{Version, VersionOperation, VersionStatus};

/// A `document_versions` row.
#[derive(Debug, Clone, FromRow)]
pub struct VersionRow {
    pub version_id: Uuid,
    pub doc_id: String,
    pub version_number: i64,
    pub content: String,
    pub content_hash: String,
    pub parent_version_id: Option<Uuid>,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub operation: String,
    pub change_summary: String,
    pub lines_added: i64,
    pub lines_removed: i64,
    pub lines_modified: i64,
    pub similarity_score: f64,
    pub status: String,
    pub is_current: bool,
    pub original_metadata: serde_json::Value,
}

impl From<&Version> for VersionRow {
    fn from(v: &Version) -> Self {
        Self {
            version_id: v.version_id.into_uuid(),
            doc_id: v.doc_id.clone(),
            version_number: v.version_number,
            content: v.content.clone(),
            content_hash: v.content_hash.clone(),
            parent_version_id: v.parent_version_id.map(VersionId::into_uuid),
            author: v.author.clone(),
            created_at: v.timestamp,
            operation: v.operation.as_str().to_string(),
            change_summary: v.change_summary.clone(),
            lines_added: v.lines_added as i64,
            lines_removed: v.lines_removed as i64,
            lines_modified: v.lines_modified as i64,
            similarity_score: v.similarity_score,
            status: v.status.as_str().to_string(),
            is_current: v.is_current,
            original_metadata: v.original_metadata.clone(),
        }
    }
}

impl TryFrom<VersionRow> for Version {
    type Error = AppError;

    fn try_from(row: VersionRow) -> Result<Self, Self::Error> {
        let operation = row
            .operation
            .parse::<VersionOperation>()
            .map_err(|e| AppError::integrity(format!("Version {}: {e}", row.version_id)))?;
        let status = row
            .status
            .parse::<VersionStatus>()
            .map_err(|e| AppError::integrity(format!("Version {}: {e}", row.version_id)))?;

        Ok(Self {
            version_id: VersionId::from_uuid(row.version_id),
            doc_id: row.doc_id,
            version_number: row.version_number,
            content: row.content,
            content_hash: row.content_hash,
            parent_version_id: row.parent_version_id.map(VersionId::from_uuid),
            author: row.author,
            timestamp: row.created_at,
            operation,
            change_summary: row.change_summary,
            lines_added: non_negative(row.lines_added),
            lines_removed: non_negative(row.lines_removed),
            lines_modified: non_negative(row.lines_modified),
            similarity_score: row.similarity_score,
            status,
            is_current: row.is_current,
            original_metadata: row.original_metadata,
        })
    }
}

/// Converts fetched rows, skipping and logging rows that do not map to a
/// [`Version`].
pub fn readable_versions(rows: Vec<VersionRow>) -> Vec<Version> {
    rows.into_iter()
        .filter_map(|row| {
            let (version_id, doc_id) = (row.version_id, row.doc_id.clone());
            match Version::try_from(row) {
                Ok(version) => Some(version),
                Err(e) => {
                    warn!(
                        %version_id,
                        doc_id = %doc_id,
                        error = %e,
                        "Skipping unreadable version row"
                    );
                    None
                }
            }
        })
        .collect()
}

fn non_negative(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}

/// A `documents` row.
#[derive(Debug, Clone, FromRow)]
pub struct DocumentRow {
    pub doc_id: String,
    pub title: String,
    pub doc_type: String,
    pub created_at: DateTime<Utc>,
    pub last_modified: Option<DateTime<Utc>>,
    pub last_modified_by: Option<String>,
    pub current_version_id: Option<Uuid>,
    pub current_version_number: Option<i64>,
    pub extra: serde_json::Value,
}

impl From<DocumentRow> for DocumentMetadata {
    fn from(row: DocumentRow) -> Self {
        Self {
            doc_id: row.doc_id,
            title: row.title,
            doc_type: row.doc_type,
            created_at: row.created_at,
            last_modified: row.last_modified,
            last_modified_by: row.last_modified_by,
            current_version_id: row.current_version_id.map(VersionId::from_uuid),
            current_version_number: row.current_version_number,
            extra: row.extra,
        }
    }
}
