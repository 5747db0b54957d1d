//! Document metadata owned by the external document service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dochub_core::types::VersionId;

/// Metadata describing a versioned document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Document identifier.
    pub doc_id: String,
    /// Human-readable title.
    pub title: String,
    /// Document type, e.g. `"pdf"` or `"markdown"`.
    pub doc_type: String,
    /// When the document was registered.
    pub created_at: DateTime<Utc>,
    /// Last content change.
    pub last_modified: Option<DateTime<Utc>>,
    /// Author of the last content change.
    pub last_modified_by: Option<String>,
    /// Pointer to the live version.
    pub current_version_id: Option<VersionId>,
    /// Number of the live version.
    pub current_version_number: Option<i64>,
    /// Arbitrary additional fields.
    #[serde(default)]
    pub extra: serde_json::Value,
}

impl DocumentMetadata {
    /// Creates metadata for a newly registered document.
    pub fn new(doc_id: impl Into<String>, title: impl Into<String>, doc_type: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            title: title.into(),
            doc_type: doc_type.into(),
            created_at: Utc::now(),
            last_modified: None,
            last_modified_by: None,
            current_version_id: None,
            current_version_number: None,
            extra: serde_json::Value::Null,
        }
    }

    /// Applies a partial update in place.
    pub fn apply(&mut self, update: &DocumentUpdate) {
        if let Some(ts) = update.last_modified {
            self.last_modified = Some(ts);
        }
        if let Some(author) = &update.last_modified_by {
            self.last_modified_by = Some(author.clone());
        }
        if let Some(id) = update.current_version_id {
            self.current_version_id = Some(id);
        }
        if let Some(n) = update.current_version_number {
            self.current_version_number = Some(n);
        }
    }
}

/// Partial metadata update stamped after a version change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentUpdate {
    /// New last-modified time.
    pub last_modified: Option<DateTime<Utc>>,
    /// New last-modified author.
    pub last_modified_by: Option<String>,
    /// New current version pointer.
    pub current_version_id: Option<VersionId>,
    /// New current version number.
    pub current_version_number: Option<i64>,
}
