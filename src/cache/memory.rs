//! In-memory LRU cache backend with per-entry TTL.

use crate::cache::CacheStore;
use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// LRU cache with TTL support, safe for concurrent independent key access.
pub struct MemoryCache {
    inner: Mutex<LruCache<String, Entry>>,
    default_ttl: Duration,
}

impl MemoryCache {
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        // Capacity must be at least 1 for a valid NonZeroUsize.
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
            default_ttl,
        }
    }

    /// Number of live (possibly expired, not yet reaped) entries.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut cache = self.inner.lock().await;
        match cache.get(key) {
            Some(entry) if entry.is_expired() => {
                cache.pop(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.inner.lock().await.put(key.to_string(), entry);
    }

    async fn delete(&self, key: &str) {
        self.inner.lock().await.pop(key);
    }

    async fn delete_by_prefix(&self, prefix: &str) {
        let mut cache = self.inner.lock().await;
        let matching: Vec<String> = cache
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect();

        for key in matching {
            cache.pop(&key);
        }
    }
}
