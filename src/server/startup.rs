use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    cache::{memory::MemoryCache, redis_cache::RedisCache, CacheHandle, PollCache},
    config::Config,
    error::AppError,
    realtime::{hub::Hub, listener},
    service::auth::{token::TokenKeys, AuthService},
};

/// Buffered events per slow WebSocket session before it starts skipping.
pub const HUB_CAPACITY: usize = 1024;

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration,
/// then runs all pending SeaORM migrations so the schema is up to date before
/// any request is served.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Selects the cache store and wires its events into the hub.
///
/// Redis is used when `REDIS_URL` is set and answers a ping; the `poll:*`
/// listener is started alongside it. Otherwise the in-process store is used and
/// publishing feeds the hub directly.
pub async fn connect_to_cache(config: &Config, hub: &Hub) -> CacheHandle {
    let store: Arc<dyn PollCache> = match &config.redis_url {
        Some(url) => match RedisCache::connect(url).await {
            Ok(redis) => {
                tracing::info!("Connected to Redis");
                listener::spawn(url.clone(), hub.clone());
                Arc::new(redis)
            }
            Err(err) => {
                tracing::warn!(
                    "Redis unavailable ({}), falling back to in-process cache",
                    err
                );
                Arc::new(MemoryCache::new(hub.clone()))
            }
        },
        None => {
            tracing::info!("REDIS_URL not set, using in-process cache");
            Arc::new(MemoryCache::new(hub.clone()))
        }
    };

    CacheHandle::new(
        store,
        config.results_cache_ttl_secs,
        config.vote_marker_ttl_secs,
    )
}

/// Creates the configured admin account when no admin exists yet.
pub async fn check_for_admin(
    db: &DatabaseConnection,
    tokens: &TokenKeys,
    config: &Config,
) -> Result<(), AppError> {
    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        return Ok(());
    };

    if AuthService::new(db, tokens)
        .bootstrap_admin(email, password)
        .await?
    {
        tracing::info!("Created admin account {}", email);
    }

    Ok(())
}
