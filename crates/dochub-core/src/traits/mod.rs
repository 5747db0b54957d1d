//! Core traits defined in `dochub-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
