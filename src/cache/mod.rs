//! Cache Module
//!
//! Read-through caching of upstream answers: deterministic key derivation,
//! a pluggable key/value backend with TTL, and the best-effort gateway the
//! pipeline talks to.

mod backend;
mod entry;
mod gateway;
pub mod key;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use backend::{CacheBackend, InMemoryCache};
pub use entry::CacheEntry;
pub use gateway::{CacheGateway, CacheStatus};
pub use key::CacheKey;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 512;

/// Maximum allowed serialized payload size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
