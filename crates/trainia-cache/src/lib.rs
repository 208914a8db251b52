//! Bounded TTL cache for scope-qualified entity data.
//!
//! Entries record their insertion instant; freshness is decided at *read*
//! time against a caller-supplied TTL, so the same entry can be fresh for one
//! caller and stale for another. Capacity is bounded: the least-recently-used
//! entry is evicted when a new key would exceed it.
//!
//! [`TtlCache::fetch_with`] adds per-key in-flight deduplication: concurrent
//! callers for the same key share a single loader invocation instead of
//! issuing duplicate requests with last-write-wins results.

use std::collections::HashMap;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use trainia_core::AppError;

#[derive(Clone)]
struct Entry {
    value: serde_json::Value,
    stored_at: Instant,
}

impl Entry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

/// Bounded key-value cache with read-time TTL semantics.
pub struct TtlCache {
    entries: Mutex<LruCache<String, Entry>>,
    flights: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TtlCache {
    /// Create a cache holding at most `capacity` entries.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            flights: Mutex::new(HashMap::new()),
        }
    }

    /// Store `value` under `key`, stamping the current instant. Overwrites
    /// any prior entry; may evict the least-recently-used key.
    pub async fn set(&self, key: &str, value: serde_json::Value) {
        let mut entries = self.entries.lock().await;
        entries.put(
            key.to_string(),
            Entry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Serialize and store a typed value.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let value = serde_json::to_value(value)?;
        self.set(key, value).await;
        Ok(())
    }

    /// Return the value under `key` if it was stored less than `ttl` ago.
    /// A hit counts as a use for eviction ordering.
    pub async fn get(&self, key: &str, ttl: Duration) -> Option<serde_json::Value> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.is_fresh(ttl) => Some(entry.value.clone()),
            _ => None,
        }
    }

    /// Fetch and deserialize a typed value. An entry that no longer decodes
    /// into `T` (model drift) is dropped and reported as a miss.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str, ttl: Duration) -> Option<T> {
        let value = self.get(key, ttl).await?;
        match serde_json::from_value(value) {
            Ok(typed) => Some(typed),
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Dropping undecodable cache entry");
                self.invalidate(key).await;
                None
            }
        }
    }

    /// Freshness check without touching eviction order.
    pub async fn has(&self, key: &str, ttl: Duration) -> bool {
        let entries = self.entries.lock().await;
        entries
            .peek(key)
            .map(|entry| entry.is_fresh(ttl))
            .unwrap_or(false)
    }

    /// Remove the entry under `key`. No-op if absent.
    pub async fn invalidate(&self, key: &str) {
        let mut entries = self.entries.lock().await;
        entries.pop(key);
    }

    /// Remove every entry whose key starts with `prefix`. Returns the number
    /// of removed entries. Used to bulk-invalidate an entity family's cached
    /// pages after a mutation.
    pub async fn invalidate_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries.lock().await;
        let keys: Vec<String> = entries
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &keys {
            entries.pop(key);
        }
        keys.len()
    }

    /// Remove all entries.
    pub async fn clear(&self) {
        let mut entries = self.entries.lock().await;
        entries.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Cache-or-load with per-key in-flight deduplication.
    ///
    /// Acquires the key's flight guard, re-checks the cache, and only then
    /// runs `loader`. A concurrent caller for the same key waits on the guard
    /// and observes the first caller's cached result. Loader failures are not
    /// cached.
    pub async fn fetch_with<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        loader: F,
    ) -> Result<T, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let flight = {
            let mut flights = self.flights.lock().await;
            flights
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        let _guard = flight.lock().await;

        if let Some(cached) = self.get_json::<T>(key, ttl).await {
            tracing::debug!(key = %key, "Cache hit");
            return Ok(cached);
        }

        tracing::debug!(key = %key, "Cache miss, loading");
        let result = loader().await;
        if let Ok(ref value) = result {
            // A cache-write problem degrades to a miss for later callers;
            // the loaded value still goes back to this caller.
            if let Err(err) = self.set_json(key, value).await {
                tracing::warn!(key = %key, error = %err, "Failed to cache loaded value");
            }
        }

        // Waiters hold their own Arc to the guard; dropping the map entry
        // only stops new callers from piling onto a finished flight.
        self.flights.lock().await.remove(key);

        result
    }
}
