//! Version creation, rollback, and content index settings.

use serde::{Deserialize, Serialize};

/// Limits applied when creating and diffing versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersioningConfig {
    /// Largest accepted version content in bytes.
    #[serde(default = "default_max_content_bytes")]
    pub max_content_bytes: usize,
    /// Cap on the stored unified diff text in bytes.
    #[serde(default = "default_max_diff_bytes")]
    pub max_diff_bytes: usize,
    /// Context lines around each hunk of the unified diff.
    #[serde(default = "default_diff_context_lines")]
    pub diff_context_lines: usize,
    /// Versions kept per document when cleanup is called without a count.
    #[serde(default = "default_keep_versions")]
    pub default_keep_versions: usize,
    /// Longest accepted author identifier.
    #[serde(default = "default_max_author_length")]
    pub max_author_length: usize,
    /// Wall-clock budget for a single diff in milliseconds. Past it the
    /// diff falls back to a coarser but still valid alignment.
    #[serde(default = "default_diff_timeout_ms")]
    pub diff_timeout_ms: u64,
    /// Contents longer than this many bytes are scored line by line
    /// instead of character by character.
    #[serde(default = "default_char_similarity_max_bytes")]
    pub char_similarity_max_bytes: usize,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            max_content_bytes: default_max_content_bytes(),
            max_diff_bytes: default_max_diff_bytes(),
            diff_context_lines: default_diff_context_lines(),
            default_keep_versions: default_keep_versions(),
            max_author_length: default_max_author_length(),
            diff_timeout_ms: default_diff_timeout_ms(),
            char_similarity_max_bytes: default_char_similarity_max_bytes(),
        }
    }
}

/// Thresholds used by the rollback safety check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollbackConfig {
    /// Rollback spans above this produce a validator warning.
    #[serde(default = "default_large_span_warning")]
    pub large_span_warning: i64,
    /// Version distance above which risk is at least medium.
    #[serde(default = "default_medium_risk_distance")]
    pub medium_risk_distance: i64,
    /// Version distance above which risk is high.
    #[serde(default = "default_high_risk_distance")]
    pub high_risk_distance: i64,
    /// Changed lines between target and current above which risk is high.
    #[serde(default = "default_high_risk_changed_lines")]
    pub high_risk_changed_lines: usize,
    /// Lowest risk level (`low`, `medium`, `high`, `critical`) that blocks
    /// an unforced rollback.
    #[serde(default = "default_block_at_risk")]
    pub block_at_risk: String,
}

impl Default for RollbackConfig {
    fn default() -> Self {
        Self {
            large_span_warning: default_large_span_warning(),
            medium_risk_distance: default_medium_risk_distance(),
            high_risk_distance: default_high_risk_distance(),
            high_risk_changed_lines: default_high_risk_changed_lines(),
            block_at_risk: default_block_at_risk(),
        }
    }
}

/// Chunking used when pushing new current content to the content index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Chunk length in characters.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

fn default_max_content_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_max_diff_bytes() -> usize {
    10_000
}

fn default_diff_context_lines() -> usize {
    3
}

fn default_keep_versions() -> usize {
    10
}

fn default_max_author_length() -> usize {
    256
}

fn default_diff_timeout_ms() -> u64 {
    500
}

fn default_char_similarity_max_bytes() -> usize {
    20_000
}

fn default_large_span_warning() -> i64 {
    10
}

fn default_medium_risk_distance() -> i64 {
    10
}

fn default_high_risk_distance() -> i64 {
    25
}

fn default_high_risk_changed_lines() -> usize {
    100
}

fn default_block_at_risk() -> String {
    "critical".to_string()
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}
