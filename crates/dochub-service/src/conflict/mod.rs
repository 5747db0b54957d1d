//! Conflict detection and resolution.

pub mod service;

pub use service::ConflictService;
