//! Version storage services.

pub mod store;

pub use store::VersionStore;
