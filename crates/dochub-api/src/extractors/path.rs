//! Typed path parameter helpers.

use dochub_core::error::AppError;
use dochub_core::types::{ConflictId, VersionId};

/// Parses a version ID from a path segment.
pub fn parse_version_id(s: &str) -> Result<VersionId, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid version ID: {s}")))
}

/// Parses a conflict ID from a path segment.
pub fn parse_conflict_id(s: &str) -> Result<ConflictId, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid conflict ID: {s}")))
}
