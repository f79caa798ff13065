use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    cache::CacheHandle,
    data::{password_reset_token::PasswordResetTokenRepository, refresh_token::RefreshTokenRepository},
    error::AppError,
    service::poll::PollService,
};

/// Starts the maintenance scheduler.
///
/// Two jobs run on it:
/// - every minute, polls whose deadline passed are closed and `poll-closed` is
///   broadcast to their rooms
/// - every hour, expired refresh tokens and stale reset tokens are purged
///
/// # Arguments
/// - `db`: Database connection
/// - `cache`: Cache handle used to invalidate results and publish events
pub async fn start_scheduler(db: DatabaseConnection, cache: CacheHandle) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_db = db.clone();
    let job_cache = cache.clone();
    let close_job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = job_db.clone();
        let cache = job_cache.clone();

        Box::pin(async move {
            if let Err(e) = close_expired_polls(&db, &cache).await {
                tracing::error!("Error closing expired polls: {}", e);
            }
        })
    })?;

    let job_db = db.clone();
    let purge_job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let db = job_db.clone();

        Box::pin(async move {
            if let Err(e) = purge_tokens(&db).await {
                tracing::error!("Error purging tokens: {}", e);
            }
        })
    })?;

    scheduler.add(close_job).await?;
    scheduler.add(purge_job).await?;
    scheduler.start().await?;

    tracing::info!("Maintenance scheduler started");

    Ok(())
}

async fn close_expired_polls(db: &DatabaseConnection, cache: &CacheHandle) -> Result<(), AppError> {
    let closed = PollService::new(db, cache).close_expired(Utc::now()).await?;

    if closed > 0 {
        tracing::info!("Closed {} polls past their deadline", closed);
    }

    Ok(())
}

async fn purge_tokens(db: &DatabaseConnection) -> Result<(), AppError> {
    let now = Utc::now();

    let refresh = RefreshTokenRepository::new(db).delete_expired(now).await?;
    let reset = PasswordResetTokenRepository::new(db).delete_stale(now).await?;

    tracing::debug!(
        "Purged {} refresh tokens and {} reset tokens",
        refresh,
        reset
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{cache::memory::MemoryCache, realtime::hub::Hub};
    use chrono::Duration;
    use std::sync::Arc;
    use test_utils::{builder::TestBuilder, factory};

    /// Tests the minute job against one expired and one open poll.
    ///
    /// Expected: only the expired poll is closed and its room notified
    #[tokio::test]
    async fn closes_only_expired_polls() {
        let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let hub = Hub::new(8);
        let mut rx = hub.subscribe();
        let cache = CacheHandle::new(Arc::new(MemoryCache::new(hub.clone())), 5, 60);

        let (expired, _) = factory::poll::PollFactory::new(db)
            .deadline(Utc::now() - Duration::minutes(1))
            .build()
            .await
            .unwrap();
        let (open, _) = factory::poll::PollFactory::new(db)
            .deadline(Utc::now() + Duration::hours(1))
            .build()
            .await
            .unwrap();

        close_expired_polls(db, &cache).await.unwrap();

        let message = rx.recv().await.unwrap();
        assert_eq!(message.poll_id, expired.id);
        assert!(message.payload.contains("\"event\":\"poll-closed\""));

        let service = PollService::new(db, &cache);
        assert!(!service.get_results(&expired.id).await.unwrap().is_active);
        assert!(service.get_results(&open.id).await.unwrap().is_active);
    }

    /// Tests the hourly purge.
    ///
    /// Expected: expired refresh tokens and used reset tokens removed, live ones kept
    #[tokio::test]
    async fn purges_stale_tokens() {
        let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::create_user(db).await.unwrap();

        factory::token::create_refresh_token(db, &user.id, "old", Utc::now() - Duration::days(1))
            .await
            .unwrap();
        factory::token::create_refresh_token(db, &user.id, "live", Utc::now() + Duration::days(1))
            .await
            .unwrap();
        let used = factory::token::create_reset_token(db, &user, "used", Utc::now() + Duration::hours(1))
            .await
            .unwrap();
        PasswordResetTokenRepository::new(db).mark_used(&used.id).await.unwrap();

        purge_tokens(db).await.unwrap();

        let refresh = RefreshTokenRepository::new(db);
        assert!(refresh.find_by_token("old").await.unwrap().is_none());
        assert!(refresh.find_by_token("live").await.unwrap().is_some());
        assert!(PasswordResetTokenRepository::new(db)
            .find_by_token("used")
            .await
            .unwrap()
            .is_none());
    }
}
