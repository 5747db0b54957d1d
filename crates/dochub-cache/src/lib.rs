//! # dochub-cache
//!
//! Cache support for DocHub:
//!
//! - **memory**: in-process cache provider using [moka](https://crates.io/crates/moka)
//!   with per-entry TTLs
//! - **version**: typed read-through cache for version records and the
//!   transient store for detected conflicts

pub mod keys;
pub mod memory;
pub mod provider;
pub mod version;

pub use provider::CacheManager;
pub use version::VersionCache;
