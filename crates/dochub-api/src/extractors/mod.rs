//! Custom Axum extractors.

pub mod path;
pub mod validated;

pub use path::{parse_conflict_id, parse_version_id};
pub use validated::ValidatedJson;
