//! Line-level comparison of two version contents.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use similar::{Algorithm, DiffTag, TextDiff, capture_diff_slices_deadline};

use dochub_core::config::VersioningConfig;
use dochub_entity::diff::{ChangeBlock, ChangeTag, VersionDiff};

use super::merge::{self, MergeOutcome};

/// Appended to unified diff text cut at the byte cap.
const TRUNCATION_MARKER: &str = "\n... (diff truncated)";

/// Computes [`VersionDiff`]s between content strings.
///
/// Every diff runs against a wall-clock budget. Once it is spent the
/// alignment degrades to coarser hunks, so results stay valid but may
/// report more changed lines than a full search would.
#[derive(Debug, Clone)]
pub struct DiffEngine {
    max_diff_bytes: usize,
    context_lines: usize,
    timeout: Duration,
    char_similarity_max_bytes: usize,
}

impl DiffEngine {
    /// Creates an engine from the versioning limits.
    pub fn new(config: &VersioningConfig) -> Self {
        Self {
            max_diff_bytes: config.max_diff_bytes,
            context_lines: config.diff_context_lines,
            timeout: Duration::from_millis(config.diff_timeout_ms),
            char_similarity_max_bytes: config.char_similarity_max_bytes,
        }
    }

    fn deadline(&self) -> Instant {
        Instant::now() + self.timeout
    }

    /// Compares `old` against `new`.
    pub fn diff(&self, old: &str, new: &str) -> VersionDiff {
        let old_lines: Vec<&str> = old.lines().collect();
        let new_lines: Vec<&str> = new.lines().collect();
        let ops = capture_diff_slices_deadline(
            Algorithm::Myers,
            &old_lines,
            &new_lines,
            Some(self.deadline()),
        );

        let mut lines_added = 0;
        let mut lines_removed = 0;
        let mut lines_modified = 0;
        let mut change_blocks = Vec::new();

        for op in &ops {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            let tag = match tag {
                DiffTag::Equal => continue,
                DiffTag::Replace => {
                    let paired = old_range.len().min(new_range.len());
                    lines_modified += paired;
                    lines_added += new_range.len() - paired;
                    lines_removed += old_range.len() - paired;
                    ChangeTag::Replace
                }
                DiffTag::Insert => {
                    lines_added += new_range.len();
                    ChangeTag::Insert
                }
                DiffTag::Delete => {
                    lines_removed += old_range.len();
                    ChangeTag::Delete
                }
            };

            change_blocks.push(ChangeBlock {
                tag,
                source_lines: to_owned_lines(&old_lines[old_range.clone()]),
                dest_lines: to_owned_lines(&new_lines[new_range.clone()]),
                source_range: old_range,
                dest_range: new_range,
            });
        }

        VersionDiff {
            similarity_score: self.similarity(old, new),
            lines_added,
            lines_removed,
            lines_modified,
            total_changes: lines_added + lines_removed + lines_modified,
            unified_diff: self.unified_diff(old, new),
            change_blocks,
            structural_changes: structural_changes(old, new, old_lines.len(), new_lines.len()),
        }
    }

    /// Zero-based indices of `base` lines touched on the way to `other`.
    ///
    /// An insertion marks the base line it is inserted before, so edits at
    /// the same position on two branches are seen as overlapping.
    pub fn changed_base_lines(&self, base: &str, other: &str) -> BTreeSet<usize> {
        let base_lines: Vec<&str> = base.lines().collect();
        let other_lines: Vec<&str> = other.lines().collect();

        let mut changed = BTreeSet::new();
        for hunk in merge::hunks(&base_lines, &other_lines, Some(self.deadline())) {
            if hunk.base.is_empty() {
                changed.insert(hunk.base.start);
            } else {
                changed.extend(hunk.base);
            }
        }
        changed
    }

    /// Three-way merge of `current` and `incoming` under the engine's budget.
    pub fn merge(&self, base: &str, current: &str, incoming: &str) -> MergeOutcome {
        merge::three_way_merge(base, current, incoming, Some(self.deadline()))
    }

    /// Similarity ratio in 0.0..=1.0.
    ///
    /// Character level up to the configured size, line level beyond it.
    pub fn similarity(&self, old: &str, new: &str) -> f64 {
        if old == new {
            return 1.0;
        }
        if old.is_empty() || new.is_empty() {
            return 0.0;
        }
        let mut config = TextDiff::configure();
        config.algorithm(Algorithm::Myers).timeout(self.timeout);
        let ratio = if old.len().max(new.len()) <= self.char_similarity_max_bytes {
            config.diff_chars(old, new).ratio()
        } else {
            config.diff_lines(old, new).ratio()
        };
        f64::from(ratio)
    }

    fn unified_diff(&self, old: &str, new: &str) -> String {
        let text_diff = TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .timeout(self.timeout)
            .diff_lines(old, new);
        let mut rendered = text_diff
            .unified_diff()
            .context_radius(self.context_lines)
            .header("version_a", "version_b")
            .to_string();

        if rendered.len() > self.max_diff_bytes {
            let mut cut = self.max_diff_bytes;
            while !rendered.is_char_boundary(cut) {
                cut -= 1;
            }
            rendered.truncate(cut);
            rendered.push_str(TRUNCATION_MARKER);
        }
        rendered
    }
}

fn structural_changes(old: &str, new: &str, old_count: usize, new_count: usize) -> Vec<String> {
    let mut changes = Vec::new();
    if old_count != new_count {
        changes.push(format!("Line count changed from {old_count} to {new_count}"));
    }
    if old != new {
        if strip_blanks(old) == strip_blanks(new) {
            changes.push("Whitespace-only changes".to_string());
        } else if old.to_lowercase() == new.to_lowercase() {
            changes.push("Case-only changes".to_string());
        }
    }
    changes
}

fn strip_blanks(text: &str) -> String {
    text.chars().filter(|c| *c != ' ' && *c != '\t').collect()
}

fn to_owned_lines(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| (*l).to_string()).collect()
}
