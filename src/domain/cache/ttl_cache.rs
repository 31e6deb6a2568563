//! Generic TTL cache over the key-value adapter
//!
//! One value per logical key, bounded by a per-instance TTL. Bookkeeping is
//! split between a per-namespace index (the only source of truth for
//! existence and freshness) and one blob per key under a derived storage key.
//! The two writes are independent, so read paths tolerate an index entry
//! whose blob is gone and treat it as a miss.
//!
//! Storage and codec failures never escape the public surface: they are
//! logged here and degrade to a miss or a no-op.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::domain::DomainError;
use crate::domain::storage::{KeyValueStore, KeyValueStoreExt};

use super::clock::{Clock, SystemClock};
use super::codec::{CacheCodec, JsonCodec};
use super::index::{CacheIndex, IndexEntry};
use super::key::{HashedKeyGenerator, StorageKeyGenerator};

const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);
const DEFAULT_KEY_PREFIX: &str = "cache";

/// Constructor-time configuration for one cache instance
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Namespace; also the storage key the index lives under. Required.
    pub namespace: String,
    /// Entry lifetime. Defaults to 24 hours.
    pub ttl: Duration,
    /// Prefix used when deriving blob storage keys.
    pub key_prefix: String,
}

impl CacheConfig {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ttl: DEFAULT_TTL,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }
}

/// Sweep surface exposed to the periodic sweeper
#[async_trait]
pub trait ExpirySweep: Send + Sync + std::fmt::Debug {
    fn namespace(&self) -> &str;

    /// Removes every currently-expired entry; returns how many were removed.
    async fn clear_expired(&self) -> usize;
}

/// TTL-bounded cache of one value per logical key
#[derive(Debug)]
pub struct TtlCache<V, C: CacheCodec<V>> {
    store: Arc<dyn KeyValueStore>,
    config: CacheConfig,
    key_generator: Arc<dyn StorageKeyGenerator>,
    codec: C,
    clock: Arc<dyn Clock>,
    _marker: PhantomData<fn() -> V>,
}

impl<V> TtlCache<V, JsonCodec<V>>
where
    V: Serialize + DeserializeOwned + Send + Sync,
{
    /// Creates a cache with the default JSON codec.
    pub fn json(store: Arc<dyn KeyValueStore>, config: CacheConfig) -> Result<Self, DomainError> {
        Self::with_codec(store, config, JsonCodec::new())
    }
}

impl<V, C: CacheCodec<V>> TtlCache<V, C> {
    /// Creates a cache with a custom codec.
    pub fn with_codec(
        store: Arc<dyn KeyValueStore>,
        config: CacheConfig,
        codec: C,
    ) -> Result<Self, DomainError> {
        if config.namespace.is_empty() {
            return Err(DomainError::configuration(
                "cache namespace must not be empty",
            ));
        }

        Ok(Self {
            store,
            config,
            key_generator: Arc::new(HashedKeyGenerator::new()),
            codec,
            clock: Arc::new(SystemClock),
            _marker: PhantomData,
        })
    }

    pub fn with_key_generator(mut self, generator: Arc<dyn StorageKeyGenerator>) -> Self {
        self.key_generator = generator;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }

    /// Reads the value for `key`, expiring it on the way if its TTL has
    /// elapsed. Returns `None` on miss, expiry, missing blob, or any
    /// storage/codec failure.
    pub async fn get(&self, key: &str) -> Option<V> {
        match self.try_get(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    "cache '{}': read for key failed, treating as miss: {}",
                    self.config.namespace,
                    e
                );
                None
            }
        }
    }

    /// Writes `value` under `key`, stamping the index entry with the current
    /// time and the encoded byte length. Failures are logged and dropped.
    pub async fn set(&self, key: &str, value: &V) {
        if let Err(e) = self.try_set(key, value).await {
            tracing::warn!("cache '{}': write failed: {}", self.config.namespace, e);
        }
    }

    /// Removes `key` (index entry and blob) if present.
    pub async fn remove(&self, key: &str) {
        if let Err(e) = self.try_remove(key).await {
            tracing::warn!("cache '{}': remove failed: {}", self.config.namespace, e);
        }
    }

    /// Removes every entry expired as of a single "now" snapshot.
    /// Returns the number of removed entries.
    pub async fn clear_expired(&self) -> usize {
        match self.try_clear_expired().await {
            Ok(removed) => removed,
            Err(e) => {
                tracing::warn!("cache '{}': sweep failed: {}", self.config.namespace, e);
                0
            }
        }
    }

    /// Removes the index and every blob it references in one batched call.
    pub async fn clear(&self) {
        if let Err(e) = self.try_clear().await {
            tracing::warn!("cache '{}': clear failed: {}", self.config.namespace, e);
        }
    }

    /// Sum of entry sizes as recorded at write time. Not re-measured, so it
    /// can overstate if the storage layer dropped blobs on its own.
    pub async fn cache_size(&self) -> u64 {
        match self.load_index().await {
            Ok(index) => index.values().map(|entry| entry.size_bytes).sum(),
            Err(e) => {
                tracing::warn!(
                    "cache '{}': size scan failed: {}",
                    self.config.namespace,
                    e
                );
                0
            }
        }
    }

    fn ttl_ms(&self) -> i64 {
        self.config.ttl.as_millis() as i64
    }

    fn storage_key(&self, logical_key: &str) -> String {
        self.key_generator
            .derive(&self.config.key_prefix, logical_key)
    }

    async fn load_index(&self) -> Result<CacheIndex, DomainError> {
        match self.store.get_one(&self.config.namespace).await? {
            Some(raw) => match serde_json::from_value::<CacheIndex>(raw) {
                Ok(index) => Ok(index),
                Err(e) => {
                    // An unreadable index is abandoned; the next write
                    // replaces it.
                    tracing::warn!(
                        "cache '{}': unreadable index, starting empty: {}",
                        self.config.namespace,
                        e
                    );
                    Ok(CacheIndex::new())
                }
            },
            None => Ok(CacheIndex::new()),
        }
    }

    async fn save_index(&self, index: &CacheIndex) -> Result<(), DomainError> {
        let raw = serde_json::to_value(index)
            .map_err(|e| DomainError::cache(format!("Failed to serialize index: {}", e)))?;
        self.store.set_one(&self.config.namespace, raw).await
    }

    async fn try_get(&self, key: &str) -> Result<Option<V>, DomainError> {
        let mut index = self.load_index().await?;
        let Some(entry) = index.get(key) else {
            return Ok(None);
        };

        if entry.is_expired(self.clock.now_ms(), self.ttl_ms()) {
            self.remove_from(&mut index, key).await?;
            return Ok(None);
        }

        match self.store.get_one(&self.storage_key(key)).await? {
            // Index entry without a blob: a torn write. Read as a miss and
            // leave the index alone; the next set repairs it.
            None => Ok(None),
            Some(Value::String(raw)) => Ok(Some(self.codec.decode(&raw)?)),
            Some(_) => Err(DomainError::cache(format!(
                "cache '{}': blob for key is not a string",
                self.config.namespace
            ))),
        }
    }

    async fn try_set(&self, key: &str, value: &V) -> Result<(), DomainError> {
        let encoded = self.codec.encode(value)?;
        let entry = IndexEntry::new(self.clock.now_ms(), encoded.len() as u64);

        let mut index = self.load_index().await?;
        index.insert(key.to_string(), entry);

        // Two independent writes; a failure in between leaves partial state
        // that the read path tolerates.
        self.save_index(&index).await?;
        self.store
            .set_one(&self.storage_key(key), Value::String(encoded))
            .await
    }

    async fn try_remove(&self, key: &str) -> Result<(), DomainError> {
        let mut index = self.load_index().await?;
        if index.contains_key(key) {
            self.remove_from(&mut index, key).await?;
        }
        Ok(())
    }

    /// Shared per-key removal path: drops the index entry, persists the
    /// index, then drops the blob.
    async fn remove_from(&self, index: &mut CacheIndex, key: &str) -> Result<(), DomainError> {
        index.remove(key);
        self.save_index(index).await?;
        self.store.remove_one(&self.storage_key(key)).await
    }

    async fn try_clear_expired(&self) -> Result<usize, DomainError> {
        let mut index = self.load_index().await?;
        let now_ms = self.clock.now_ms();
        let ttl_ms = self.ttl_ms();

        let expired: Vec<String> = index
            .iter()
            .filter(|(_, entry)| entry.is_expired(now_ms, ttl_ms))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove_from(&mut index, key).await?;
        }

        Ok(expired.len())
    }

    async fn try_clear(&self) -> Result<(), DomainError> {
        let index = self.load_index().await?;

        let mut keys: Vec<String> = index.keys().map(|key| self.storage_key(key)).collect();
        keys.push(self.config.namespace.clone());

        self.store.remove(&keys).await
    }
}

#[async_trait]
impl<V, C> ExpirySweep for TtlCache<V, C>
where
    V: Send + Sync + std::fmt::Debug,
    C: CacheCodec<V>,
{
    fn namespace(&self) -> &str {
        TtlCache::namespace(self)
    }

    async fn clear_expired(&self) -> usize {
        TtlCache::clear_expired(self).await
    }
}
