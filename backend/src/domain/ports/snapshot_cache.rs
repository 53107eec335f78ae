//! Cache port for serialized read-model snapshots.
//!
//! The cache sits in front of the store as a read-through layer: reads consult
//! it first, writes drop the affected keys. Entries are JSON strings with a
//! fixed expiry. Cache trouble must never fail a request, so the helper
//! functions here log failures at warn level and carry on as if the cache
//! missed.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use super::cache_key::CacheKey;

/// Expiry applied to every snapshot entry.
pub const SNAPSHOT_TTL: Duration = Duration::from_secs(600);

/// Errors raised by cache adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// Cache backend is unavailable, timing out, or refusing the operation.
    #[error("cache backend failure: {message}")]
    Backend {
        /// Adapter-provided detail.
        message: String,
    },
}

impl CacheError {
    /// Helper for backend-level failures.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Key-value port for snapshot storage.
///
/// Values are opaque strings; callers serialize and deserialize. There is no
/// locking and no single-flight guarantee: concurrent misses may each query
/// the store and each repopulate the entry, and a read racing a write may
/// observe the previous snapshot until the removal lands.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotCache: Send + Sync {
    /// Read the entry for `key`, if present and not expired.
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key` with the supplied expiry.
    async fn set(&self, key: &CacheKey, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Drop the entry for `key`, if present.
    async fn remove(&self, key: &CacheKey) -> Result<(), CacheError>;
}

/// Cache that never holds anything.
///
/// Lookups miss and writes are discarded, which degrades read-through callers
/// to plain store queries. Used when no cache backend is configured and in
/// tests that are not about caching.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSnapshotCache;

#[async_trait]
impl SnapshotCache for FixtureSnapshotCache {
    async fn get(&self, _key: &CacheKey) -> Result<Option<String>, CacheError> {
        Ok(None)
    }

    async fn set(&self, _key: &CacheKey, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }

    async fn remove(&self, _key: &CacheKey) -> Result<(), CacheError> {
        Ok(())
    }
}

/// Read and deserialize a snapshot, treating every failure as a miss.
pub async fn read_snapshot<C, T>(cache: &C, key: &CacheKey) -> Option<T>
where
    C: SnapshotCache + ?Sized,
    T: DeserializeOwned,
{
    match cache.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(key = %key, error = %error, "discarding unreadable cache snapshot");
                None
            }
        },
        Ok(None) => None,
        Err(error) => {
            warn!(key = %key, error = %error, "cache read failed; querying the store");
            None
        }
    }
}

/// Serialize and store a snapshot under the fixed expiry, logging failures.
pub async fn write_snapshot<C, T>(cache: &C, key: &CacheKey, value: &T)
where
    C: SnapshotCache + ?Sized,
    T: Serialize + Sync,
{
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(error) => {
            warn!(key = %key, error = %error, "failed to serialize cache snapshot");
            return;
        }
    };

    if let Err(error) = cache.set(key, &raw, SNAPSHOT_TTL).await {
        warn!(key = %key, error = %error, "cache write failed; entry left unpopulated");
    }
}

/// Drop a set of snapshot keys, logging failures and continuing.
///
/// A failed removal leaves a stale entry behind until its expiry; the fixed
/// TTL bounds how long that can last.
pub async fn drop_snapshots<C>(cache: &C, keys: &[CacheKey])
where
    C: SnapshotCache + ?Sized,
{
    for key in keys {
        if let Err(error) = cache.remove(key).await {
            warn!(key = %key, error = %error, "cache invalidation failed; stale entry until expiry");
        }
    }
}
