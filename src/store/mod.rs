pub mod memory;
pub mod redis;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),
    #[error("store operation failed: {0}")]
    Operation(String),
}

/// Durable string/list storage consumed by the link registry, click
/// tracker and auth service. Mirrors the subset of the Redis command
/// surface the service actually uses.
///
/// `exists` followed by `set` is not atomic; the alias generator and
/// registration both live with that narrow race.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Stores `value` under `key` with no expiry, overwriting any
    /// previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn delete(&self, keys: &[&str]) -> Result<(), StoreError>;
    /// Pushes `value` onto the front of the list at `key`, creating the
    /// list if absent.
    async fn list_push_front(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Returns the elements of the list at `key` between `start` and
    /// `stop` inclusive. Negative indices count from the end, so
    /// `(0, -1)` is the whole list. Missing keys yield an empty list.
    async fn list_range(&self, key: &str, start: isize, stop: isize)
    -> Result<Vec<String>, StoreError>;
    /// Removes occurrences of `value` from the list at `key`. A `count`
    /// of 0 removes them all.
    async fn list_remove(&self, key: &str, count: isize, value: &str) -> Result<(), StoreError>;
    /// Liveness probe for health checks.
    async fn ping(&self) -> Result<(), StoreError>;
}
