//! Concurrent-edit detection and resolution.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use dochub_cache::VersionCache;
use dochub_core::error::AppError;
use dochub_core::result::AppResult;
use dochub_core::types::{ConflictId, VersionId};
use dochub_entity::conflict::{
    ConflictArea, ConflictResolution, ConflictType, ResolutionStrategy, VersionConflict,
};
use dochub_entity::version::{NewVersion, Version, VersionOperation};

use crate::version::VersionStore;

/// Detects edits made against a stale base and resolves them.
#[derive(Debug, Clone)]
pub struct ConflictService {
    store: Arc<VersionStore>,
    cache: VersionCache,
}

impl ConflictService {
    /// Creates a new conflict service.
    pub fn new(store: Arc<VersionStore>, cache: VersionCache) -> Self {
        Self { store, cache }
    }

    /// Checks whether `new_content`, written against `base_version_id`,
    /// overlaps with changes made since.
    ///
    /// Returns `None` when the base is still current or the edits touch
    /// different lines. A detected conflict is kept for later resolution.
    pub async fn detect_conflicts(
        &self,
        doc_id: &str,
        new_content: &str,
        base_version_id: VersionId,
    ) -> AppResult<Option<VersionConflict>> {
        let base = self
            .store
            .get_version(base_version_id)
            .await
            .filter(|v| v.doc_id == doc_id)
            .ok_or_else(|| {
                AppError::not_found(format!("Base version {base_version_id} not found"))
            })?;
        let current = self.store.get_current_version(doc_id).await.ok_or_else(|| {
            AppError::not_found(format!("Document '{doc_id}' has no current version"))
        })?;

        if base.version_id == current.version_id {
            return Ok(None);
        }

        let (base_content, current_content, incoming) =
            (base.content.clone(), current.content.clone(), new_content.to_string());
        let overlap: BTreeSet<usize> = self
            .store
            .with_diff_engine(move |diff| {
                let theirs = diff.changed_base_lines(&base_content, &current_content);
                let ours = diff.changed_base_lines(&base_content, &incoming);
                theirs.intersection(&ours).copied().collect::<BTreeSet<usize>>()
            })
            .await?;
        if overlap.is_empty() {
            return Ok(None);
        }

        let conflict = VersionConflict {
            conflict_id: ConflictId::new(),
            doc_id: doc_id.to_string(),
            base_version_id: base.version_id,
            current_version_id: current.version_id,
            incoming_content: new_content.to_string(),
            conflict_type: ConflictType::ConcurrentEdit,
            conflict_areas: conflict_areas(&overlap),
            detected_at: Utc::now(),
        };
        self.cache.put_conflict(&conflict).await;

        info!(
            doc_id,
            conflict_id = %conflict.conflict_id,
            base_version = base.version_number,
            current_version = current.version_number,
            areas = conflict.conflict_areas.len(),
            "Conflict detected"
        );

        Ok(Some(conflict))
    }

    /// A previously detected conflict that has not been resolved or expired.
    pub async fn get_conflict(&self, conflict_id: ConflictId) -> Option<VersionConflict> {
        self.cache.get_conflict(conflict_id).await
    }

    /// Applies a resolution strategy. Failures are reported in the result.
    pub async fn resolve_conflict(
        &self,
        conflict: &VersionConflict,
        strategy: ResolutionStrategy,
        author: &str,
        merged_content: Option<&str>,
    ) -> ConflictResolution {
        let Some(current) = self.store.get_current_version(&conflict.doc_id).await else {
            return ConflictResolution::failed(format!(
                "Document '{}' has no current version",
                conflict.doc_id
            ));
        };

        let (content, operation, messages) = match strategy {
            ResolutionStrategy::Abort => {
                return ConflictResolution::failed("Conflict resolution aborted");
            }
            ResolutionStrategy::ForceOverwrite => (
                merged_content.unwrap_or(&current.content).to_string(),
                VersionOperation::Update,
                Vec::new(),
            ),
            ResolutionStrategy::AutoMerge => {
                let Some(base) = self.store.get_version(conflict.base_version_id).await else {
                    return ConflictResolution::failed(format!(
                        "Base version {} is no longer available",
                        conflict.base_version_id
                    ));
                };
                let (current_content, incoming) =
                    (current.content.clone(), conflict.incoming_content.clone());
                let merged = self
                    .store
                    .with_diff_engine(move |diff| {
                        diff.merge(&base.content, &current_content, &incoming)
                    })
                    .await;
                let outcome = match merged {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        return ConflictResolution::failed(format!(
                            "Automatic merge failed: {}",
                            e.message
                        ));
                    }
                };
                if outcome.content.trim().is_empty() {
                    return ConflictResolution::failed("Automatic merge produced empty content");
                }
                (outcome.content, VersionOperation::Merge, outcome.dropped)
            }
            ResolutionStrategy::Manual => match merged_content {
                Some(merged) => (merged.to_string(), VersionOperation::Merge, Vec::new()),
                None => {
                    return ConflictResolution::failed(
                        "Manual resolution requires merged content",
                    );
                }
            },
        };

        match self
            .create_resolved(conflict, &current, content, operation, strategy, author)
            .await
        {
            Ok(version) => {
                self.cache.remove_conflict(conflict.conflict_id).await;
                info!(
                    doc_id = %conflict.doc_id,
                    conflict_id = %conflict.conflict_id,
                    strategy = %strategy,
                    version_number = version.version_number,
                    dropped = messages.len(),
                    "Conflict resolved"
                );
                ConflictResolution::resolved(version, messages)
            }
            Err(e) => {
                warn!(
                    doc_id = %conflict.doc_id,
                    conflict_id = %conflict.conflict_id,
                    error = %e,
                    "Conflict resolution failed"
                );
                ConflictResolution::failed(format!("Failed to create resolved version: {}", e.message))
            }
        }
    }

    async fn create_resolved(
        &self,
        conflict: &VersionConflict,
        current: &Version,
        content: String,
        operation: VersionOperation,
        strategy: ResolutionStrategy,
        author: &str,
    ) -> AppResult<Version> {
        let summary = format!(
            "Resolved conflict {} with {strategy} strategy",
            conflict.conflict_id
        );
        self.store
            .create_version(
                NewVersion::new(&conflict.doc_id, content, author, operation)
                    .with_summary(summary)
                    .with_parent(current.version_id),
            )
            .await
    }
}

/// Groups zero-based line indices into 1-based contiguous areas.
fn conflict_areas(lines: &BTreeSet<usize>) -> Vec<ConflictArea> {
    let mut areas: Vec<ConflictArea> = Vec::new();
    let mut run: Option<(usize, usize)> = None;

    for &line in lines {
        run = match run {
            Some((start, end)) if line == end + 1 => Some((start, line)),
            Some((start, end)) => {
                areas.push(area(start, end));
                Some((line, line))
            }
            None => Some((line, line)),
        };
    }
    if let Some((start, end)) = run {
        areas.push(area(start, end));
    }
    areas
}

fn area(start: usize, end: usize) -> ConflictArea {
    let (start_line, end_line) = (start + 1, end + 1);
    let description = if start_line == end_line {
        format!("Line {start_line} was changed in both the current version and the incoming edit")
    } else {
        format!(
            "Lines {start_line}-{end_line} were changed in both the current version and the incoming edit"
        )
    };
    ConflictArea {
        start_line,
        end_line,
        description,
    }
}
