//! In-memory cache with per-entry TTL expiration
//!
//! Every entry carries its own time-to-live. Expired entries behave as absent
//! and are evicted lazily on read, or in bulk by [`spawn_sweeper`] so that keys
//! which are never read again do not accumulate. There is no capacity limit.

mod cache;
mod sweeper;
mod types;

pub use cache::TtlCache;
pub use sweeper::{spawn_sweeper, DEFAULT_SWEEP_INTERVAL};
pub use types::{CacheEntry, CacheStats};
