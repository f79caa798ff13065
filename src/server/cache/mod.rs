//! Ephemeral cache and pub/sub store.
//!
//! Vote markers, the short-lived results snapshot and the realtime channel all
//! live behind [`PollCache`], implemented by Redis when it is reachable and by an
//! in-process store otherwise. Services talk to the store through
//! [`CacheHandle`], which owns key naming, TTLs and serialization and never lets
//! a cache failure reach the caller.

pub mod keys;
pub mod memory;
pub mod redis_cache;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    model::socket::ServerEvent,
    server::{error::cache::CacheError, model::poll::Poll, model::vote::IdentityKind},
};

/// String key/value store with expiry and channel publishing.
#[async_trait]
pub trait PollCache: Send + Sync {
    async fn exists(&self, key: &str) -> Result<bool, CacheError>;

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    async fn publish(&self, channel: &str, payload: &str) -> Result<(), CacheError>;

    async fn ping(&self) -> Result<(), CacheError>;

    /// Short backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;
}

/// Shared handle to the cache store with typed helpers.
#[derive(Clone)]
pub struct CacheHandle {
    store: Arc<dyn PollCache>,
    results_ttl_secs: u64,
    marker_ttl_secs: u64,
}

impl CacheHandle {
    pub fn new(store: Arc<dyn PollCache>, results_ttl_secs: u64, marker_ttl_secs: u64) -> Self {
        Self {
            store,
            results_ttl_secs,
            marker_ttl_secs,
        }
    }

    /// Whether a vote marker exists for the identity in `scope`.
    ///
    /// A failed read counts as "no marker"; the database checks still apply.
    pub async fn has_voted(&self, scope: &str, kind: IdentityKind, identifier: &str) -> bool {
        let key = keys::vote_marker(scope, kind, identifier);
        match self.store.exists(&key).await {
            Ok(exists) => exists,
            Err(err) => {
                tracing::warn!("Vote marker lookup for {} failed: {}", key, err);
                false
            }
        }
    }

    pub async fn mark_voted(&self, scope: &str, kind: IdentityKind, identifier: &str) {
        let key = keys::vote_marker(scope, kind, identifier);
        if let Err(err) = self.store.set_ex(&key, "1", self.marker_ttl_secs).await {
            tracing::warn!("Failed to set vote marker {}: {}", key, err);
        }
    }

    /// Cached results snapshot, if present and decodable.
    pub async fn get_results(&self, poll_id: &str) -> Option<Poll> {
        let key = keys::results(poll_id);
        let cached = match self.store.get(&key).await {
            Ok(cached) => cached?,
            Err(err) => {
                tracing::warn!("Results cache read for {} failed: {}", key, err);
                return None;
            }
        };

        match serde_json::from_str(&cached) {
            Ok(poll) => Some(poll),
            Err(err) => {
                tracing::warn!("Discarding undecodable results cache {}: {}", key, err);
                None
            }
        }
    }

    pub async fn set_results(&self, poll: &Poll) {
        let key = keys::results(&poll.id);
        let payload = match serde_json::to_string(poll) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!("Failed to encode results for {}: {}", key, err);
                return;
            }
        };

        if let Err(err) = self
            .store
            .set_ex(&key, &payload, self.results_ttl_secs)
            .await
        {
            tracing::warn!("Failed to cache results {}: {}", key, err);
        }
    }

    pub async fn invalidate_results(&self, poll_id: &str) {
        let key = keys::results(poll_id);
        if let Err(err) = self.store.delete(&key).await {
            tracing::warn!("Failed to invalidate results {}: {}", key, err);
        }
    }

    /// Publishes an event on the poll's channel for every connected viewer.
    pub async fn publish(&self, event: &ServerEvent) {
        let channel = keys::poll_channel(event.poll_id());
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!("Failed to encode event for {}: {}", channel, err);
                return;
            }
        };

        if let Err(err) = self.store.publish(&channel, &payload).await {
            tracing::warn!("Failed to publish on {}: {}", channel, err);
        }
    }

    /// Health of the store.
    ///
    /// # Returns
    /// - `"connected"` or `"memory"` when reachable
    /// - `"disconnected"` when the ping fails
    pub async fn status(&self) -> &'static str {
        match self.store.ping().await {
            Ok(()) if self.store.backend() == "redis" => "connected",
            Ok(()) => self.store.backend(),
            Err(err) => {
                tracing::warn!("Cache ping failed: {}", err);
                "disconnected"
            }
        }
    }
}
