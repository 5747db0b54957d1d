//! # dochub-entity
//!
//! Domain entity models for DocHub. [`version::Version`] is the only
//! persisted record; diffs, conflicts, and rollback safety checks are
//! derived values computed by the service layer.

pub mod conflict;
pub mod diff;
pub mod document;
pub mod rollback;
pub mod validation;
pub mod version;

pub use conflict::{ConflictArea, ConflictResolution, ConflictType, ResolutionStrategy, VersionConflict};
pub use diff::{ChangeBlock, ChangeTag, VersionDiff};
pub use document::{DocumentMetadata, DocumentUpdate};
pub use rollback::{ImpactSummary, RiskLevel, RollbackOutcome, RollbackSafetyCheck};
pub use validation::{Severity, ValidationFinding};
pub use version::{CleanupStats, NewVersion, Version, VersionOperation, VersionStatus};
