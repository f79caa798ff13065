use std::time::Duration;

use futures::StreamExt;

use crate::server::{cache::keys, error::cache::CacheError, realtime::hub::Hub};

const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Spawns the task forwarding Redis `poll:*` messages into the hub.
///
/// The subscription is re-established after a connection loss.
pub fn spawn(redis_url: String, hub: Hub) {
    tokio::spawn(async move {
        loop {
            if let Err(err) = listen(&redis_url, &hub).await {
                tracing::warn!("Redis subscription lost: {}", err);
            }
            tokio::time::sleep(RECONNECT_DELAY).await;
        }
    });
}

async fn listen(redis_url: &str, hub: &Hub) -> Result<(), CacheError> {
    let client = deadpool_redis::redis::Client::open(redis_url)?;
    let mut pubsub = client.get_async_pubsub().await?;
    pubsub.psubscribe(keys::POLL_CHANNEL_PATTERN).await?;

    tracing::info!("Subscribed to {}", keys::POLL_CHANNEL_PATTERN);

    let mut messages = pubsub.on_message();
    while let Some(message) = messages.next().await {
        let payload: String = match message.get_payload() {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!("Dropping undecodable pub/sub message: {}", err);
                continue;
            }
        };
        hub.dispatch(message.get_channel_name(), &payload);
    }

    Ok(())
}
