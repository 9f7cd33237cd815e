//! Read-through cache for single-record lookups.

use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use contact_core::{ContactId, ContactRecord};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use telemetry::{health, metrics};
use tracing::debug;

/// Cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry time-to-live in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Maximum cache entries
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
}

fn default_ttl_secs() -> u64 {
    3
}

fn default_max_capacity() -> u64 {
    10_000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            max_capacity: default_max_capacity(),
        }
    }
}

/// Key-value cache populated on read.
///
/// Entries expire after the configured TTL. Only found values are cached, and
/// a failing loader caches nothing. Concurrent misses on the same key may
/// both run the loader; the loader is an idempotent read so the race is benign.
#[derive(Clone)]
pub struct ReadThroughCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Cache<K, V>,
    ttl: Duration,
}

/// Cache of contact records by id.
pub type RecordCache = ReadThroughCache<ContactId, ContactRecord>;

impl<K, V> ReadThroughCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates a cache from config and marks the cache component healthy.
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Self::with_ttl(Duration::from_secs(config.ttl_secs), config.max_capacity);
        health().cache.set_healthy();
        cache
    }

    pub fn with_ttl(ttl: Duration, max_capacity: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value for `key`, or runs `loader` and caches a
    /// found result. Loader errors propagate unchanged.
    pub async fn get_or_load<F, Fut, E>(&self, key: K, loader: F) -> Result<Option<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<V>, E>>,
    {
        if let Some(cached) = self.inner.get(&key).await {
            metrics().cache_hits.inc();
            debug!("Record cache hit");
            return Ok(Some(cached));
        }

        metrics().cache_misses.inc();
        debug!("Record cache miss");

        let loaded = loader().await?;
        if let Some(value) = &loaded {
            self.inner.insert(key, value.clone()).await;
        }
        Ok(loaded)
    }

    /// Drops the entry for `key`.
    pub async fn invalidate(&self, key: &K) {
        self.inner.invalidate(key).await;
    }

    /// Drops the entries for every key in `keys`.
    pub async fn invalidate_many<'a>(&self, keys: impl IntoIterator<Item = &'a K>)
    where
        K: 'a,
    {
        for key in keys {
            self.inner.invalidate(key).await;
        }
    }

    /// Approximate number of live entries.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Drops every entry and applies pending maintenance. Called on shutdown.
    pub async fn flush(&self) {
        self.inner.invalidate_all();
        self.inner.run_pending_tasks().await;
    }
}
