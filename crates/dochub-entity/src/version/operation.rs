//! Version operation and status enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The operation that produced a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionOperation {
    /// First version of a document.
    Create,
    /// Ordinary edit.
    Update,
    /// Restores the content of an older version.
    Rollback,
    /// Result of resolving concurrent edits.
    Merge,
    /// Marks the document content as removed.
    Delete,
}

impl VersionOperation {
    /// Return the operation as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Rollback => "rollback",
            Self::Merge => "merge",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for VersionOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VersionOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "rollback" => Ok(Self::Rollback),
            "merge" => Ok(Self::Merge),
            "delete" => Ok(Self::Delete),
            other => Err(format!("Unknown version operation: '{other}'")),
        }
    }
}

/// Soft-delete status of a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    /// Visible in history.
    #[default]
    Active,
    /// Removed by cleanup; kept for audit.
    Deleted,
}

impl VersionStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VersionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "deleted" => Ok(Self::Deleted),
            other => Err(format!("Unknown version status: '{other}'")),
        }
    }
}
