//! Rollback risk assessment and execution.

use std::sync::Arc;

use tracing::{info, warn};

use dochub_core::config::RollbackConfig;
use dochub_core::error::AppError;
use dochub_core::result::AppResult;
use dochub_core::types::VersionId;
use dochub_entity::rollback::{
    ImpactSummary, RiskLevel, RollbackOutcome, RollbackSafetyCheck, affected_systems,
};
use dochub_entity::validation::Severity;
use dochub_entity::version::{NewVersion, VersionOperation};

use crate::validation::{Validator, has_critical, messages};
use crate::version::VersionStore;

/// Assesses and performs rollbacks to earlier versions.
#[derive(Debug, Clone)]
pub struct RollbackService {
    store: Arc<VersionStore>,
    validator: Validator,
    config: RollbackConfig,
    block_at: RiskLevel,
}

impl RollbackService {
    /// Creates a new rollback service.
    ///
    /// Fails if `rollback.block_at_risk` is not a known risk level.
    pub fn new(
        store: Arc<VersionStore>,
        validator: Validator,
        config: &RollbackConfig,
    ) -> AppResult<Self> {
        let block_at = config
            .block_at_risk
            .parse::<RiskLevel>()
            .map_err(|e| AppError::configuration(format!("rollback.block_at_risk: {e}")))?;
        Ok(Self {
            store,
            validator,
            config: config.clone(),
            block_at,
        })
    }

    /// Assesses the risk of rolling `doc_id` back to `target_version_id`.
    ///
    /// Anything that cannot be resolved yields an unsafe, critical result.
    pub async fn validate_rollback_safety(
        &self,
        doc_id: &str,
        target_version_id: VersionId,
    ) -> RollbackSafetyCheck {
        let Some(target) = self.store.get_version(target_version_id).await else {
            return RollbackSafetyCheck::blocked(format!(
                "Target version {target_version_id} not found"
            ));
        };
        if target.doc_id != doc_id {
            return RollbackSafetyCheck::blocked(format!(
                "Target version {target_version_id} belongs to another document"
            ));
        }
        let Some(current) = self.store.get_current_version(doc_id).await else {
            return RollbackSafetyCheck::blocked(format!(
                "Document '{doc_id}' has no current version"
            ));
        };

        let mut risk = RiskLevel::Low;
        let mut warnings = Vec::new();
        let mut blocking_issues = Vec::new();

        let distance = current.version_number - target.version_number;
        if distance == 0 {
            blocking_issues.push("Target version is already the current version".to_string());
        } else if distance < 0 {
            blocking_issues.push("Target version is newer than the current version".to_string());
        }
        if distance > self.config.medium_risk_distance {
            risk.escalate(RiskLevel::Medium);
            warnings.push(format!("Rollback spans {distance} versions"));
        }
        if distance > self.config.high_risk_distance {
            risk.escalate(RiskLevel::High);
        }

        let diff = match self
            .store
            .measure(target.content.clone(), current.content.clone())
            .await
        {
            Ok(diff) => diff,
            Err(e) => {
                return RollbackSafetyCheck::blocked(format!(
                    "Could not compare target and current content: {}",
                    e.message
                ));
            }
        };
        if diff.total_changes > self.config.high_risk_changed_lines {
            risk.escalate(RiskLevel::High);
            warnings.push(format!(
                "Rollback reverts {} changed lines",
                diff.total_changes
            ));
        }

        let merge_operations = self
            .store
            .get_version_history(doc_id, None, true)
            .await
            .iter()
            .filter(|v| {
                v.operation == VersionOperation::Merge
                    && v.version_number > target.version_number
                    && v.version_number <= current.version_number
            })
            .count();
        if merge_operations > 0 {
            risk.escalate(RiskLevel::High);
            warnings.push(format!(
                "Rollback undoes {merge_operations} merge operation(s)"
            ));
        }

        if !target.is_active() {
            warnings.push(format!(
                "Target version {} has been removed by cleanup",
                target.version_number
            ));
        }

        if risk >= self.block_at {
            blocking_issues.push(format!("Risk level {risk} requires a forced rollback"));
        }

        RollbackSafetyCheck {
            is_safe: blocking_issues.is_empty(),
            risk_level: risk,
            warnings,
            blocking_issues,
            affected_systems: affected_systems(),
            impact: ImpactSummary {
                content_changes: diff.total_changes,
                version_distance: distance,
                merge_operations,
            },
        }
    }

    /// Creates a new version carrying the content of `target_version_id`.
    ///
    /// Refusals are reported in the outcome, never as an error. `force`
    /// skips the safety check but not input validation.
    pub async fn rollback_to_version(
        &self,
        doc_id: &str,
        target_version_id: VersionId,
        author: &str,
        force: bool,
    ) -> RollbackOutcome {
        let Some(target) = self
            .store
            .get_version(target_version_id)
            .await
            .filter(|v| v.doc_id == doc_id)
        else {
            return RollbackOutcome::refused(
                vec![format!("Target version {target_version_id} not found")],
                Vec::new(),
            );
        };
        let Some(current) = self.store.get_current_version(doc_id).await else {
            return RollbackOutcome::refused(
                vec![format!("Document '{doc_id}' has no current version")],
                Vec::new(),
            );
        };

        let findings = self.validator.validate_rollback_operation(
            doc_id,
            target_version_id,
            author,
            current.version_number,
            target.version_number,
        );
        let mut warnings = messages(&findings, Severity::Warning);
        if has_critical(&findings) {
            return RollbackOutcome::refused(messages(&findings, Severity::Critical), warnings);
        }

        if force {
            warnings.push("Safety check skipped for forced rollback".to_string());
        } else {
            let check = self.validate_rollback_safety(doc_id, target_version_id).await;
            warnings.extend(check.warnings);
            if !check.is_safe {
                warn!(
                    doc_id,
                    target_version = target.version_number,
                    risk = %check.risk_level,
                    "Rollback refused by safety check"
                );
                return RollbackOutcome::refused(check.blocking_issues, warnings);
            }
        }

        let new = NewVersion::new(doc_id, target.content, author, VersionOperation::Rollback)
            .with_summary(format!("Rollback to version {}", target.version_number))
            .with_parent(current.version_id);

        match self.store.create_version(new).await {
            Ok(version) => {
                info!(
                    doc_id,
                    from_version = current.version_number,
                    to_version = target.version_number,
                    version_number = version.version_number,
                    author,
                    force,
                    "Rollback completed"
                );
                RollbackOutcome {
                    success: true,
                    version: Some(version),
                    warnings,
                    errors: Vec::new(),
                }
            }
            Err(e) => RollbackOutcome::refused(vec![e.message], warnings),
        }
    }
}
