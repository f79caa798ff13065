use std::sync::Arc;

use tokio::sync::broadcast;

use crate::server::cache::keys;

/// An encoded server event addressed to one poll room.
#[derive(Debug, Clone)]
pub struct HubMessage {
    pub poll_id: String,
    /// JSON frame, shared between every receiving socket.
    pub payload: Arc<str>,
}

/// In-process broadcast of poll events to connected sockets.
#[derive(Clone)]
pub struct Hub {
    sender: broadcast::Sender<HubMessage>,
}

impl Hub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HubMessage> {
        self.sender.subscribe()
    }

    /// Delivers a payload received on a `poll:{id}` channel.
    ///
    /// Payloads on other channels are ignored. Having no connected socket is not
    /// an error.
    pub fn dispatch(&self, channel: &str, payload: &str) {
        let Some(poll_id) = keys::poll_id_from_channel(channel) else {
            tracing::debug!("Ignoring message on unrelated channel {}", channel);
            return;
        };

        let _ = self.sender.send(HubMessage {
            poll_id: poll_id.to_string(),
            payload: Arc::from(payload),
        });
    }
}
