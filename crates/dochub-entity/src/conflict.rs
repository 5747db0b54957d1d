//! Concurrent-edit conflicts and their resolution.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dochub_core::types::{ConflictId, VersionId};

use crate::version::Version;

/// Kind of detected conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    /// Current and incoming edits touch the same base lines.
    ConcurrentEdit,
}

/// An overlapping line range, 1-based and inclusive, in base-version lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictArea {
    /// First overlapping line.
    pub start_line: usize,
    /// Last overlapping line.
    pub end_line: usize,
    /// Human-readable description.
    pub description: String,
}

impl ConflictArea {
    /// Whether a 1-based line number falls inside the area.
    pub fn contains_line(&self, line: usize) -> bool {
        (self.start_line..=self.end_line).contains(&line)
    }
}

/// Overlapping edits detected between base, current, and incoming content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionConflict {
    /// Identifier used to resolve the conflict later.
    pub conflict_id: ConflictId,
    /// Owning document.
    pub doc_id: String,
    /// Version the incoming edit was based on.
    pub base_version_id: VersionId,
    /// Version that is current at detection time.
    pub current_version_id: VersionId,
    /// The incoming edit.
    pub incoming_content: String,
    /// Conflict kind.
    pub conflict_type: ConflictType,
    /// Overlapping regions.
    pub conflict_areas: Vec<ConflictArea>,
    /// Detection time.
    pub detected_at: DateTime<Utc>,
}

/// How a caller wants a conflict settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// Do nothing.
    Abort,
    /// Write the supplied content, or the current content when none is
    /// given, as a new version.
    ForceOverwrite,
    /// Three-way merge against the base version.
    AutoMerge,
    /// Use caller-supplied merged content.
    Manual,
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Abort => "abort",
            Self::ForceOverwrite => "force_overwrite",
            Self::AutoMerge => "auto_merge",
            Self::Manual => "manual",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ResolutionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "force_overwrite" => Ok(Self::ForceOverwrite),
            "auto_merge" => Ok(Self::AutoMerge),
            "manual" => Ok(Self::Manual),
            other => Err(format!("Unknown resolution strategy: '{other}'")),
        }
    }
}

/// Outcome of a resolution attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictResolution {
    /// Whether a version was written.
    pub success: bool,
    /// The version created by the resolution.
    pub version: Option<Version>,
    /// Human-readable notes, including dropped merge hunks.
    pub messages: Vec<String>,
}

impl ConflictResolution {
    /// A failed resolution carrying a single message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            version: None,
            messages: vec![message.into()],
        }
    }

    /// A successful resolution.
    pub fn resolved(version: Version, messages: Vec<String>) -> Self {
        Self {
            success: true,
            version: Some(version),
            messages,
        }
    }
}
