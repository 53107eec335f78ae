//! Redis-backed snapshot cache adapter.
//!
//! Entries are JSON strings written with `SET EX`, so Redis expires them
//! without any bookkeeping on our side. All failures surface as
//! [`CacheError::Backend`]; the domain helpers decide whether that degrades
//! to a store query or is ignored.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::redis::AsyncCommands;
use bb8_redis::{RedisConnectionManager, bb8};

use crate::domain::ports::{CacheError, CacheKey, SnapshotCache};

/// Snapshot cache backed by a Redis connection pool.
#[derive(Clone, Debug)]
pub struct RedisSnapshotCache {
    pool: bb8::Pool<RedisConnectionManager>,
}

impl RedisSnapshotCache {
    /// Build a cache over a pooled client for the given Redis URL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Backend`] when the URL does not parse or the
    /// pool cannot be constructed. Connections themselves are established
    /// lazily on first use.
    pub async fn connect(redis_url: &str) -> Result<Self, CacheError> {
        let manager = RedisConnectionManager::new(redis_url)
            .map_err(|err| CacheError::backend(err.to_string()))?;
        let pool = bb8::Pool::builder()
            .build(manager)
            .await
            .map_err(|err| CacheError::backend(err.to_string()))?;

        Ok(Self { pool })
    }

    async fn connection(
        &self,
    ) -> Result<bb8::PooledConnection<'_, RedisConnectionManager>, CacheError> {
        self.pool
            .get()
            .await
            .map_err(|err| CacheError::backend(err.to_string()))
    }
}

/// Clamp an expiry to whole seconds; `SET` with `EX` rejects a zero expiry.
fn expiry_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl SnapshotCache for RedisSnapshotCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;

        conn.get(key.to_string())
            .await
            .map_err(|err| CacheError::backend(err.to_string()))
    }

    async fn set(&self, key: &CacheKey, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;

        conn.set_ex::<_, _, ()>(key.to_string(), value, expiry_seconds(ttl))
            .await
            .map_err(|err| CacheError::backend(err.to_string()))
    }

    async fn remove(&self, key: &CacheKey) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;

        conn.del::<_, ()>(key.to_string())
            .await
            .map_err(|err| CacheError::backend(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for construction failures and the expiry clamp.

    use rstest::rstest;

    use super::*;

    #[tokio::test]
    async fn connect_rejects_malformed_urls() {
        let error = RedisSnapshotCache::connect("not a redis url")
            .await
            .expect_err("malformed URL rejected");

        assert!(matches!(error, CacheError::Backend { .. }));
    }

    #[rstest]
    #[case(Duration::ZERO, 1)]
    #[case(Duration::from_millis(250), 1)]
    #[case(Duration::from_secs(600), 600)]
    fn expiry_clamps_to_whole_positive_seconds(#[case] ttl: Duration, #[case] expected: u64) {
        assert_eq!(expiry_seconds(ttl), expected);
    }
}
