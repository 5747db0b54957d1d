//! HTTP-level integration tests against the in-memory backend.

mod helpers;

mod conflict_test;
mod document_test;
mod rollback_test;
mod version_test;
