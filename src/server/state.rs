//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into each handler through
//! Axum's state extraction. It holds:
//! - Database connection pool
//! - Cache / pub-sub handle (Redis or in-process)
//! - Realtime hub feeding WebSocket sessions
//! - JWT signing keys
//! - Loaded configuration

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::{
    cache::CacheHandle, config::Config, realtime::hub::Hub, service::auth::token::TokenKeys,
};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: the connection pool, cache handle and hub
/// share their internals, the rest sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// Vote markers, cached results and event publishing.
    pub cache: CacheHandle,

    /// Fan-out of poll events to connected WebSocket sessions.
    pub hub: Hub,

    /// Secrets and lifetimes for access and refresh tokens.
    pub tokens: Arc<TokenKeys>,

    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `cache` - Cache handle over the selected store
    /// - `hub` - Realtime hub shared with the cache store and the Redis listener
    /// - `config` - Application configuration, also used to derive the token keys
    pub fn new(db: DatabaseConnection, cache: CacheHandle, hub: Hub, config: Config) -> Self {
        Self {
            db,
            cache,
            hub,
            tokens: Arc::new(TokenKeys::from_config(&config)),
            config: Arc::new(config),
        }
    }
}
