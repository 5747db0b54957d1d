//! HTTP request handlers, one module per resource.

pub mod conflict;
pub mod document;
pub mod health;
pub mod rollback;
pub mod version;
