//! PostgreSQL backends.

pub mod document;
pub mod row;
pub mod version;

pub use document::PgDocumentStore;
pub use version::PgVersionRepository;
