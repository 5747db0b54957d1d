//! # dochub-database
//!
//! Persistence for DocHub. Defines the collaborator traits the service
//! layer talks to ([`VersionRepository`], [`DocumentMetadataProvider`],
//! [`ContentIndex`]) and ships two backends: PostgreSQL via sqlx and a
//! process-local in-memory store.

pub mod chunking;
pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod traits;

pub use connection::DatabasePool;
pub use traits::{ContentIndex, DocumentMetadataProvider, VersionRepository};
