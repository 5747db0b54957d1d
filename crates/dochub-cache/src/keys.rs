//! Cache key builders for all DocHub cache entries.

use dochub_core::types::{ConflictId, VersionId};

/// Prefix applied to all DocHub cache keys.
const PREFIX: &str = "dochub";

/// Cache key for a version record by ID.
pub fn version_by_id(version_id: VersionId) -> String {
    format!("{PREFIX}:version:{version_id}")
}

/// Cache key for a pending conflict.
pub fn conflict_by_id(conflict_id: ConflictId) -> String {
    format!("{PREFIX}:conflict:{conflict_id}")
}
