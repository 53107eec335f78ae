//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use zeroize::Zeroizing;

use crate::outbound::cache::RedisSnapshotCache;
use crate::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) signing_key: Zeroizing<Vec<u8>>,
    pub(crate) access_token_ttl: Duration,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) snapshot_cache: Option<RedisSnapshotCache>,
}

impl ServerConfig {
    /// Construct a server configuration from the validated settings.
    #[must_use]
    pub fn new(
        signing_key: Zeroizing<Vec<u8>>,
        access_token_ttl: Duration,
        bind_addr: SocketAddr,
    ) -> Self {
        Self {
            signing_key,
            access_token_ttl,
            bind_addr,
            db_pool: None,
            snapshot_cache: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server uses database-backed implementations for
    /// every port; without it the fixture adapters serve requests.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach a Redis-backed snapshot cache for read models.
    #[must_use]
    pub fn with_snapshot_cache(mut self, cache: RedisSnapshotCache) -> Self {
        self.snapshot_cache = Some(cache);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
