//! Rollback risk assessment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::version::Version;

/// Downstream systems touched by replacing a document's current content.
pub const AFFECTED_SYSTEMS: &[&str] = &[
    "document content",
    "search index and embeddings",
    "search results",
];

/// [`AFFECTED_SYSTEMS`] as owned strings.
pub fn affected_systems() -> Vec<String> {
    AFFECTED_SYSTEMS.iter().map(|s| (*s).to_string()).collect()
}

/// Ordered rollback risk scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Small, recent change.
    #[default]
    Low,
    /// Spans many versions.
    Medium,
    /// Large content change, very long span, or intervening merges.
    High,
    /// Rollback cannot be evaluated.
    Critical,
}

impl RiskLevel {
    /// Raise the level to at least `other`.
    pub fn escalate(&mut self, other: RiskLevel) {
        if other > *self {
            *self = other;
        }
    }

    /// Return the level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(format!("Unknown risk level: '{other}'")),
        }
    }
}

/// What a rollback would change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactSummary {
    /// Lines added, removed, or modified between target and current.
    pub content_changes: usize,
    /// Versions between target and current.
    pub version_distance: i64,
    /// Merge versions that the rollback would discard.
    pub merge_operations: usize,
}

/// Risk assessment for reverting a document to an older version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollbackSafetyCheck {
    /// False when any blocking issue was recorded.
    pub is_safe: bool,
    /// Overall risk.
    pub risk_level: RiskLevel,
    /// Non-blocking concerns.
    pub warnings: Vec<String>,
    /// Reasons the rollback must not proceed without `force`.
    pub blocking_issues: Vec<String>,
    /// Downstream systems that need refreshing after the rollback.
    pub affected_systems: Vec<String>,
    /// Change volume.
    pub impact: ImpactSummary,
}

impl RollbackSafetyCheck {
    /// A check that failed closed. The systems a rollback would touch are
    /// still listed.
    pub fn blocked(issue: impl Into<String>) -> Self {
        Self {
            is_safe: false,
            risk_level: RiskLevel::Critical,
            warnings: Vec::new(),
            blocking_issues: vec![issue.into()],
            affected_systems: affected_systems(),
            impact: ImpactSummary::default(),
        }
    }
}

/// Result of a rollback request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollbackOutcome {
    /// Whether a rollback version was written.
    pub success: bool,
    /// The new version.
    pub version: Option<Version>,
    /// Validator and safety warnings.
    pub warnings: Vec<String>,
    /// Reasons the rollback did not happen.
    pub errors: Vec<String>,
}

impl RollbackOutcome {
    /// A refused rollback.
    pub fn refused(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            success: false,
            version: None,
            warnings,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escalate_never_lowers() {
        let mut level = RiskLevel::High;
        level.escalate(RiskLevel::Medium);
        assert_eq!(level, RiskLevel::High);
        level.escalate(RiskLevel::Critical);
        assert_eq!(level, RiskLevel::Critical);
    }

    #[test]
    fn test_blocked_check_is_unsafe() {
        let check = RollbackSafetyCheck::blocked("Target version not found");
        assert!(!check.is_safe);
        assert_eq!(check.risk_level, RiskLevel::Critical);
        assert_eq!(check.affected_systems.len(), AFFECTED_SYSTEMS.len());
        assert!(check.affected_systems.iter().any(|s| s == "search results"));
    }

    #[test]
    fn test_risk_level_parse() {
        assert_eq!("HIGH".parse::<RiskLevel>(), Ok(RiskLevel::High));
        assert!("severe".parse::<RiskLevel>().is_err());
    }
}
