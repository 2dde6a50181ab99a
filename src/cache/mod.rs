//! Cache store abstraction.
//!
//! The cache is a pure performance optimization: every operation here is
//! infallible from the caller's point of view. Backend errors are logged and
//! degrade to a miss (reads) or a no-op (writes), so a broken cache can slow
//! requests down but never fail them.

pub mod keys;
pub mod memory;

pub use memory::MemoryCache;

use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

/// Capability interface for a key/value store with per-entry TTL.
///
/// One implementation per backend; the orchestrator only ever sees
/// `dyn CacheStore`. Keys are independent: one key's failure must not affect
/// another's, and no cross-key locking is assumed.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read a value. Expired entries behave exactly like misses.
    async fn get(&self, key: &str) -> Option<String>;

    /// Write a value. `ttl = None` uses the store's configured default.
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>);

    /// Best-effort single-key invalidation.
    async fn delete(&self, key: &str);

    /// Best-effort prefix invalidation; a no-op on backends that cannot
    /// scan keys.
    async fn delete_by_prefix(&self, prefix: &str);

    /// Concurrent independent per-key reads; a missing key is simply absent
    /// from the map.
    async fn get_many(&self, keys: &[String]) -> HashMap<String, String> {
        let lookups = keys.iter().map(|key| async move {
            self.get(key).await.map(|value| (key.clone(), value))
        });
        join_all(lookups).await.into_iter().flatten().collect()
    }

    /// Concurrent independent per-key writes with the default TTL.
    async fn set_many(&self, entries: Vec<(String, String)>) {
        let writes = entries
            .into_iter()
            .map(|(key, value)| async move { self.set(&key, value, None).await });
        join_all(writes).await;
    }
}

/// Read and decode a cached JSON payload. Decode failures are logged and
/// treated as a miss so a stale or corrupt entry never fails a request.
pub async fn get_json<T: DeserializeOwned>(store: &dyn CacheStore, key: &str) -> Option<T> {
    let raw = store.get(key).await?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("cache entry under {key} failed to decode, treating as miss: {err}");
            None
        }
    }
}

/// Encode a JSON payload into an entry for [`CacheStore::set_many`]. Encode
/// failures are logged and yield no entry, same posture as [`set_json`].
pub fn encode_json<T: Serialize>(key: &str, value: &T) -> Option<(String, String)> {
    match serde_json::to_string(value) {
        Ok(raw) => Some((key.to_string(), raw)),
        Err(err) => {
            log::warn!("skipping cache write for {key}: {err}");
            None
        }
    }
}

/// Encode and write a JSON payload. Encode failures are logged and swallowed.
pub async fn set_json<T: Serialize>(
    store: &dyn CacheStore,
    key: &str,
    value: &T,
    ttl: Option<Duration>,
) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, raw, ttl).await,
        Err(err) => log::warn!("skipping cache write for {key}: {err}"),
    }
}
