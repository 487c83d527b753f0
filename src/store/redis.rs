use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};

use crate::store::{KvStore, StoreError};

fn op_err(e: redis::RedisError) -> StoreError {
    StoreError::Operation(e.to_string())
}

/// Redis-backed [`KvStore`]. The multiplexed connection is cheap to
/// clone, so every call works on its own handle.
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
}

impl RedisStore {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client =
            redis::Client::open(url).map_err(|e| StoreError::Connection(e.to_string()))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self { conn })
    }

    pub fn from_connection(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        conn.exists::<_, bool>(key).await.map_err(op_err)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(key).await.map_err(op_err)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value).await.map_err(op_err)
    }

    async fn delete(&self, keys: &[&str]) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(keys).await.map_err(op_err)
    }

    async fn list_push_front(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.lpush::<_, _, ()>(key, value).await.map_err(op_err)
    }

    async fn list_range(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        conn.lrange::<_, Vec<String>>(key, start, stop)
            .await
            .map_err(op_err)
    }

    async fn list_remove(&self, key: &str, count: isize, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.lrem::<_, _, ()>(key, count, value).await.map_err(op_err)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(op_err)?;
        Ok(())
    }
}
