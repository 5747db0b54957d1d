//! # dochub-service
//!
//! Versioning services for DocHub. Each service is built from its
//! collaborators at construction time and shared behind `Arc`.
//!
//! - [`Validator`]: stateless input and integrity checks
//! - [`DiffEngine`]: line statistics, similarity, unified diff text
//! - [`VersionStore`]: version creation, history, current pointer, cleanup
//! - [`ConflictService`]: overlapping-edit detection and resolution
//! - [`RollbackService`]: rollback risk assessment and execution

pub mod conflict;
pub mod diff;
pub mod lock;
pub mod rollback;
pub mod validation;
pub mod version;

#[cfg(test)]
pub(crate) mod testing;

pub use conflict::ConflictService;
pub use diff::{DiffEngine, MergeOutcome, three_way_merge};
pub use lock::{DocumentLock, DocumentLocks};
pub use rollback::RollbackService;
pub use validation::Validator;
pub use version::VersionStore;
