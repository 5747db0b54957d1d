//! Stateless input and integrity checks.
//!
//! Validation never fails outright. Every check returns a list of
//! [`ValidationFinding`]s and the caller decides what a critical finding
//! means for its operation.

use dochub_core::config::{RollbackConfig, VersioningConfig};
use dochub_core::types::VersionId;
use dochub_entity::validation::{Severity, ValidationFinding};
use dochub_entity::version::{Version, VersionOperation};

/// Content that is almost certainly a stand-in for a real document.
const PLACEHOLDER_CONTENT: &[&str] = &[
    "todo",
    "tbd",
    "placeholder",
    "lorem ipsum",
    "test",
    "content",
    "...",
];

/// Checks applied before writes and after reads.
#[derive(Debug, Clone)]
pub struct Validator {
    max_content_bytes: usize,
    max_author_length: usize,
    large_span_warning: i64,
}

impl Validator {
    /// Creates a validator from the versioning and rollback limits.
    pub fn new(versioning: &VersioningConfig, rollback: &RollbackConfig) -> Self {
        Self {
            max_content_bytes: versioning.max_content_bytes,
            max_author_length: versioning.max_author_length,
            large_span_warning: rollback.large_span_warning,
        }
    }

    /// Checks the inputs of a version creation.
    pub fn validate_version_creation(
        &self,
        doc_id: &str,
        content: &str,
        author: &str,
        operation: VersionOperation,
        change_summary: &str,
    ) -> Vec<ValidationFinding> {
        let mut findings = Vec::new();

        if doc_id.trim().is_empty() {
            findings.push(ValidationFinding::critical(
                "EMPTY_DOC_ID",
                "Document ID is required",
            ));
        }

        findings.extend(self.check_author(author));

        if content.len() > self.max_content_bytes {
            findings.push(ValidationFinding::critical(
                "CONTENT_TOO_LARGE",
                format!(
                    "Content is {} bytes, exceeding the {} byte limit",
                    content.len(),
                    self.max_content_bytes
                ),
            ));
        }

        if operation != VersionOperation::Create && change_summary.trim().is_empty() {
            findings.push(ValidationFinding::warning(
                "MISSING_CHANGE_SUMMARY",
                format!("No change summary given for {operation} operation"),
            ));
        }

        if is_placeholder(content) {
            findings.push(ValidationFinding::warning(
                "PLACEHOLDER_CONTENT",
                "Content looks like a placeholder",
            ));
        }

        if operation == VersionOperation::Create && content.is_empty() {
            findings.push(ValidationFinding::info(
                "EMPTY_CONTENT",
                "Document is created with empty content",
            ));
        }

        findings
    }

    /// Checks a rollback request against the current and target numbers.
    pub fn validate_rollback_operation(
        &self,
        doc_id: &str,
        target_version_id: VersionId,
        author: &str,
        current_version_number: i64,
        target_version_number: i64,
    ) -> Vec<ValidationFinding> {
        let mut findings = Vec::new();

        if doc_id.trim().is_empty() {
            findings.push(ValidationFinding::critical(
                "EMPTY_DOC_ID",
                "Document ID is required",
            ));
        }

        findings.extend(self.check_author(author));

        if target_version_number == current_version_number {
            findings.push(ValidationFinding::critical(
                "ROLLBACK_TO_CURRENT",
                format!("Version {target_version_id} is already the current version"),
            ));
        } else if target_version_number > current_version_number {
            findings.push(ValidationFinding::critical(
                "TARGET_NOT_OLDER",
                format!(
                    "Target version {target_version_number} is not older than current version {current_version_number}"
                ),
            ));
        }

        let span = current_version_number - target_version_number;
        if span > self.large_span_warning {
            findings.push(ValidationFinding::warning(
                "LARGE_ROLLBACK_SPAN",
                format!("Rollback spans {span} versions"),
            ));
        }

        findings
    }

    /// Checks a version record read back from storage.
    pub fn validate_version_data_integrity(&self, version: &Version) -> Vec<ValidationFinding> {
        let mut findings = Vec::new();

        if version.doc_id.trim().is_empty() {
            findings.push(ValidationFinding::critical(
                "EMPTY_DOC_ID",
                format!("Version {} has no document ID", version.version_id),
            ));
        }

        if version.version_number < 1 {
            findings.push(ValidationFinding::critical(
                "INVALID_VERSION_NUMBER",
                format!(
                    "Version {} has invalid number {}",
                    version.version_id, version.version_number
                ),
            ));
        }

        if version.content_hash.is_empty() {
            findings.push(ValidationFinding::critical(
                "MISSING_CONTENT_HASH",
                format!("Version {} has no content hash", version.version_id),
            ));
        } else if !version.hash_matches() {
            findings.push(ValidationFinding::critical(
                "CONTENT_HASH_MISMATCH",
                format!(
                    "Content hash mismatch for version {}: stored content has been altered",
                    version.version_id
                ),
            ));
        }

        if !(0.0..=1.0).contains(&version.similarity_score) {
            findings.push(ValidationFinding::warning(
                "SIMILARITY_OUT_OF_RANGE",
                format!(
                    "Similarity score {} of version {} is outside 0.0-1.0",
                    version.similarity_score, version.version_id
                ),
            ));
        }

        findings
    }

    fn check_author(&self, author: &str) -> Option<ValidationFinding> {
        if author.trim().is_empty() {
            Some(ValidationFinding::critical("EMPTY_AUTHOR", "Author is required"))
        } else if author.chars().any(char::is_control) {
            Some(ValidationFinding::critical(
                "INVALID_AUTHOR",
                "Author contains control characters",
            ))
        } else if author.chars().count() > self.max_author_length {
            Some(ValidationFinding::critical(
                "AUTHOR_TOO_LONG",
                format!(
                    "Author exceeds the {} character limit",
                    self.max_author_length
                ),
            ))
        } else {
            None
        }
    }
}

/// Whether any finding is critical.
pub fn has_critical(findings: &[ValidationFinding]) -> bool {
    findings.iter().any(ValidationFinding::is_critical)
}

/// Messages of the findings with exactly the given severity.
pub fn messages(findings: &[ValidationFinding], severity: Severity) -> Vec<String> {
    findings
        .iter()
        .filter(|f| f.severity == severity)
        .map(|f| f.message.clone())
        .collect()
}

fn is_placeholder(content: &str) -> bool {
    let trimmed = content.trim();
    trimmed.is_empty()
        || PLACEHOLDER_CONTENT
            .iter()
            .any(|p| trimmed.eq_ignore_ascii_case(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dochub_entity::version::{VersionStatus, content_digest};

    fn validator() -> Validator {
        Validator::new(&VersioningConfig::default(), &RollbackConfig::default())
    }

    fn codes(findings: &[ValidationFinding]) -> Vec<&str> {
        findings.iter().map(|f| f.code.as_str()).collect()
    }

    fn stored(content: &str) -> Version {
        Version {
            version_id: VersionId::new(),
            doc_id: "D1".to_string(),
            version_number: 1,
            content: content.to_string(),
            content_hash: content_digest(content),
            parent_version_id: None,
            author: "alice".to_string(),
            timestamp: Utc::now(),
            operation: VersionOperation::Create,
            change_summary: String::new(),
            lines_added: 0,
            lines_removed: 0,
            lines_modified: 0,
            similarity_score: 1.0,
            status: VersionStatus::Active,
            is_current: true,
            original_metadata: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_clean_creation_has_no_findings() {
        let findings = validator().validate_version_creation(
            "D1",
            "Hello world.",
            "alice",
            VersionOperation::Create,
            "",
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_missing_identity_is_critical() {
        let findings =
            validator().validate_version_creation("", "text", " ", VersionOperation::Create, "");
        assert!(has_critical(&findings));
        assert_eq!(codes(&findings), vec!["EMPTY_DOC_ID", "EMPTY_AUTHOR"]);
    }

    #[test]
    fn test_author_with_control_characters_is_critical() {
        let findings = validator().validate_version_creation(
            "D1",
            "text",
            "ali\u{0007}ce",
            VersionOperation::Create,
            "",
        );
        assert_eq!(codes(&findings), vec!["INVALID_AUTHOR"]);
    }

    #[test]
    fn test_oversized_content_is_critical() {
        let versioning = VersioningConfig {
            max_content_bytes: 8,
            ..Default::default()
        };
        let validator = Validator::new(&versioning, &RollbackConfig::default());
        let findings = validator.validate_version_creation(
            "D1",
            "0123456789",
            "alice",
            VersionOperation::Create,
            "",
        );
        assert_eq!(codes(&findings), vec!["CONTENT_TOO_LARGE"]);
    }

    #[test]
    fn test_update_without_summary_and_placeholder_warns() {
        let findings = validator().validate_version_creation(
            "D1",
            "  TODO ",
            "alice",
            VersionOperation::Update,
            "",
        );
        assert!(!has_critical(&findings));
        assert_eq!(
            messages(&findings, Severity::Warning).len(),
            2,
            "expected summary and placeholder warnings: {findings:?}"
        );
    }

    #[test]
    fn test_empty_create_is_informational() {
        let findings =
            validator().validate_version_creation("D1", "", "alice", VersionOperation::Create, "");
        assert!(!has_critical(&findings));
        assert!(codes(&findings).contains(&"EMPTY_CONTENT"));
    }

    #[test]
    fn test_rollback_to_current_is_critical() {
        let findings =
            validator().validate_rollback_operation("D1", VersionId::new(), "alice", 3, 3);
        assert_eq!(codes(&findings), vec!["ROLLBACK_TO_CURRENT"]);
    }

    #[test]
    fn test_rollback_forward_is_critical() {
        let findings =
            validator().validate_rollback_operation("D1", VersionId::new(), "alice", 3, 5);
        assert_eq!(codes(&findings), vec!["TARGET_NOT_OLDER"]);
    }

    #[test]
    fn test_large_rollback_span_warns() {
        let findings =
            validator().validate_rollback_operation("D1", VersionId::new(), "alice", 20, 2);
        assert!(!has_critical(&findings));
        assert_eq!(codes(&findings), vec!["LARGE_ROLLBACK_SPAN"]);
    }

    #[test]
    fn test_integrity_accepts_untouched_record() {
        assert!(validator()
            .validate_version_data_integrity(&stored("Hello"))
            .is_empty());
    }

    #[test]
    fn test_integrity_rejects_tampered_content() {
        let mut version = stored("Hello");
        version.content.push('!');
        let findings = validator().validate_version_data_integrity(&version);
        assert_eq!(codes(&findings), vec!["CONTENT_HASH_MISMATCH"]);
    }

    #[test]
    fn test_integrity_flags_bad_identity_and_score() {
        let mut version = stored("Hello");
        version.version_number = 0;
        version.similarity_score = 1.5;
        let findings = validator().validate_version_data_integrity(&version);
        assert!(has_critical(&findings));
        assert_eq!(
            codes(&findings),
            vec!["INVALID_VERSION_NUMBER", "SIMILARITY_OUT_OF_RANGE"]
        );
    }
}
