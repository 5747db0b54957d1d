//! Rollback safety checks and execution.

pub mod service;

pub use service::RollbackService;
