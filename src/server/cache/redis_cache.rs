//! Redis-backed cache using a `deadpool-redis` connection pool.

use async_trait::async_trait;
use deadpool_redis::{
    redis::{cmd, AsyncCommands},
    Config, Connection, Pool, Runtime,
};

use crate::server::{cache::PollCache, error::cache::CacheError};

pub struct RedisCache {
    pool: Pool,
}

impl RedisCache {
    /// Creates the pool and verifies the server answers `PING`.
    ///
    /// # Returns
    /// - `Ok(RedisCache)` - Pool ready for use
    /// - `Err(CacheError)` - Invalid URL or the server is unreachable
    pub async fn connect(redis_url: &str) -> Result<Self, CacheError> {
        let pool = Config::from_url(redis_url).create_pool(Some(Runtime::Tokio1))?;
        let cache = Self { pool };
        cache.ping().await?;

        Ok(cache)
    }

    async fn conn(&self) -> Result<Connection, CacheError> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait]
impl PollCache for RedisCache {
    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.conn().await?;
        Ok(conn.exists(key).await?)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn().await?;
        Ok(conn.get(key).await?)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError> {
        let mut conn = self.conn().await?;
        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn().await?;
        conn.del::<_, ()>(key).await?;
        Ok(())
    }

    async fn publish(&self, channel: &str, payload: &str) -> Result<(), CacheError> {
        let mut conn = self.conn().await?;
        conn.publish::<_, _, ()>(channel, payload).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.conn().await?;
        cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
