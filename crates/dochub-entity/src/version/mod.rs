//! Version domain entities.

pub mod model;
pub mod operation;

pub use model::{CleanupStats, NewVersion, Version, content_digest};
pub use operation::{VersionOperation, VersionStatus};
