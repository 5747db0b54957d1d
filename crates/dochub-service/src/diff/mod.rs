//! Content comparison: version diffs and three-way merging.

pub mod engine;
pub mod merge;

pub use engine::DiffEngine;
pub use merge::{MergeOutcome, three_way_merge};
