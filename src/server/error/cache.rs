use thiserror::Error;

/// Failures of the cache / pub-sub store.
///
/// These never surface to clients: callers degrade a failed read to a miss and
/// log failed writes.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error(transparent)]
    Redis(#[from] deadpool_redis::redis::RedisError),

    #[error(transparent)]
    Pool(#[from] deadpool_redis::PoolError),

    #[error(transparent)]
    CreatePool(#[from] deadpool_redis::CreatePoolError),

    #[error("Failed to decode cached value: {0}")]
    Decode(#[from] serde_json::Error),
}
