//! In-process cache used when Redis is not configured or unreachable.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::server::{cache::PollCache, error::cache::CacheError, realtime::hub::Hub};

struct Entry {
    value: String,
    expires_at: Instant,
}

/// Expiring key/value map whose publishes feed the local hub directly.
///
/// Expired entries are dropped lazily on access.
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
    hub: Hub,
}

impl MemoryCache {
    pub fn new(hub: Hub) -> Self {
        Self {
            entries: DashMap::new(),
            hub,
        }
    }

    fn live_value(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > now {
                return Some(entry.value.clone());
            }
        }
        self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        None
    }
}

#[async_trait]
impl PollCache for MemoryCache {
    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.live_value(key).is_some())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.live_value(key))
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + Duration::from_secs(ttl_secs),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn publish(&self, channel: &str, payload: &str) -> Result<(), CacheError> {
        self.hub.dispatch(channel, payload);
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn expires_entries() {
        let cache = MemoryCache::new(Hub::new(4));

        cache.set_ex("short", "v", 0).await.unwrap();
        cache.set_ex("long", "v", 60).await.unwrap();

        assert!(!cache.exists("short").await.unwrap());
        assert_eq!(cache.get("long").await.unwrap().as_deref(), Some("v"));

        cache.delete("long").await.unwrap();
        assert!(cache.get("long").await.unwrap().is_none());
    }
}
