//! Process-local backends used by tests and the `memory` database backend.

pub mod document;
pub mod version;

pub use document::MemoryDocumentStore;
pub use version::MemoryVersionRepository;
