//! Key/value storage with lazy expiry

use crate::types::{CacheEntry, CacheStats};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

/// A process-wide cache where every entry carries its own TTL
///
/// Create one instance at startup, wrap it in an `Arc` and hand it to whoever
/// needs it. It lives for the whole process and has no teardown.
pub struct TtlCache<V> {
    /// Stored entries, including expired ones not yet evicted
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    /// Cache hit counter
    hits: AtomicU64,
    /// Cache miss counter
    misses: AtomicU64,
}

impl<V: Clone> TtlCache<V> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Store `value` under `key` for `ttl`, replacing any previous entry
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        debug!(key = %key, ttl_secs = ttl.as_secs(), "Cached entry");

        let mut entries = self.entries.write().await;
        entries.insert(key, CacheEntry::new(value, ttl));
    }

    /// Get a fresh value, evicting the entry if it has expired
    pub async fn get(&self, key: &str) -> Option<V> {
        let value = self.lookup(key).await;

        if value.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }

        value
    }

    /// Whether a fresh entry exists, evicting the entry if it has expired
    pub async fn has(&self, key: &str) -> bool {
        self.lookup(key).await.is_some()
    }

    /// Remove every entry
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of stored entries, counting expired ones that were not evicted yet
    pub async fn size(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Remove every expired entry, returning how many were removed
    pub async fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - entries.len();

        if removed > 0 {
            debug!(removed, remaining = entries.len(), "Swept expired cache entries");
        }

        removed
    }

    /// Get current cache statistics
    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.size().await,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    async fn lookup(&self, key: &str) -> Option<V> {
        let now = Instant::now();

        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired_at(now) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        self.evict_if_expired(key, now).await;
        None
    }

    /// Re-check under the write lock: a concurrent `set` may have replaced the entry
    async fn evict_if_expired(&self, key: &str, now: Instant) {
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.is_expired_at(now)) {
            entries.remove(key);
            debug!(key = %key, "Cache entry expired");
        }
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
