//! Short-lived memoization of enrichment results
//!
//! Process-lifetime map from URL to extracted metadata/summary with a
//! fixed TTL; expired entries are evicted on read. No size bound — the
//! cache is session-scoped and entries age out in minutes, so growth is
//! bounded by the user's own submission rate (known caveat).

use linkmark_core::PageMetadata;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default time-to-live for cached enrichment results
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

impl<V: Clone> CacheEntry<V> {
    fn new(value: V) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() > ttl
    }
}

/// TTL-evicting map. Unlike an LRU it has no capacity bound; staleness is
/// the only eviction trigger.
struct TtlMap<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    ttl: Duration,
}

impl<K: Eq + Hash, V: Clone> TtlMap<K, V> {
    fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    fn get(&mut self, key: &K) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired(self.ttl) => {
                self.entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    fn insert(&mut self, key: K, value: V) {
        self.entries.insert(key, CacheEntry::new(value));
    }

    fn cleanup_expired(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| !entry.is_expired(ttl));
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Thread-safe cache for enrichment results, keyed by URL
pub struct ResultCache {
    metadata: RwLock<TtlMap<String, PageMetadata>>,
    summaries: RwLock<TtlMap<String, String>>,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            metadata: RwLock::new(TtlMap::new(ttl)),
            summaries: RwLock::new(TtlMap::new(ttl)),
        }
    }

    pub async fn get_metadata(&self, url: &str) -> Option<PageMetadata> {
        self.metadata.write().await.get(&url.to_string())
    }

    pub async fn put_metadata(&self, url: &str, metadata: PageMetadata) {
        self.metadata.write().await.insert(url.to_string(), metadata);
    }

    pub async fn get_summary(&self, url: &str) -> Option<String> {
        self.summaries.write().await.get(&url.to_string())
    }

    pub async fn put_summary(&self, url: &str, summary: String) {
        self.summaries.write().await.insert(url.to_string(), summary);
    }

    /// Drop every expired entry from both maps.
    pub async fn cleanup_expired(&self) {
        self.metadata.write().await.cleanup_expired();
        self.summaries.write().await.cleanup_expired();
    }

    pub async fn clear(&self) {
        self.metadata.write().await.clear();
        self.summaries.write().await.clear();
    }

    /// Current entry count across both maps.
    pub async fn len(&self) -> usize {
        self.metadata.read().await.len() + self.summaries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
