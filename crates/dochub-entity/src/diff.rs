//! Derived comparison between two versions.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Kind of a non-equal diff block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeTag {
    /// Source lines replaced by destination lines.
    Replace,
    /// Destination lines inserted.
    Insert,
    /// Source lines removed.
    Delete,
}

impl fmt::Display for ChangeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Replace => "replace",
            Self::Insert => "insert",
            Self::Delete => "delete",
        };
        write!(f, "{s}")
    }
}

/// One contiguous changed region. Ranges are 0-based and half open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeBlock {
    /// Block kind.
    pub tag: ChangeTag,
    /// Line range in the source text.
    pub source_range: Range<usize>,
    /// Line range in the destination text.
    pub dest_range: Range<usize>,
    /// The affected source lines.
    pub source_lines: Vec<String>,
    /// The affected destination lines.
    pub dest_lines: Vec<String>,
}

/// Line-level comparison between two contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionDiff {
    /// Character-level similarity ratio, 0.0–1.0.
    pub similarity_score: f64,
    /// Lines present only in the destination.
    pub lines_added: usize,
    /// Lines present only in the source.
    pub lines_removed: usize,
    /// Lines changed in place.
    pub lines_modified: usize,
    /// Sum of the three counters.
    pub total_changes: usize,
    /// Unified diff, bounded in size.
    pub unified_diff: String,
    /// Non-equal blocks in order.
    pub change_blocks: Vec<ChangeBlock>,
    /// Heuristic observations such as whitespace-only changes.
    pub structural_changes: Vec<String>,
}

impl VersionDiff {
    /// Whether the two sides are identical.
    pub fn is_identical(&self) -> bool {
        self.total_changes == 0 && self.change_blocks.is_empty()
    }
}
