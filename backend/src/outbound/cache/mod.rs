//! Redis cache adapters.
//!
//! Implements the snapshot cache port over a pooled Redis client. The cache
//! is optional infrastructure: when no Redis URL is configured the server
//! wires the fixture cache instead and every read goes to the store.

mod redis_snapshot_cache;

pub use redis_snapshot_cache::RedisSnapshotCache;
