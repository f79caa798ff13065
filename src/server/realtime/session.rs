use std::collections::HashSet;

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use crate::{
    model::socket::ClientEvent,
    server::realtime::hub::{Hub, HubMessage},
};

/// Poll rooms a socket has joined.
#[derive(Debug, Default)]
pub struct Rooms {
    joined: HashSet<String>,
}

impl Rooms {
    /// Applies a client frame.
    ///
    /// Unparseable frames are ignored.
    pub fn apply(&mut self, frame: &str) {
        match serde_json::from_str::<ClientEvent>(frame) {
            Ok(ClientEvent::JoinPoll(room)) => {
                tracing::debug!("Socket joined poll {}", room.poll_id);
                self.joined.insert(room.poll_id);
            }
            Ok(ClientEvent::LeavePoll(room)) => {
                tracing::debug!("Socket left poll {}", room.poll_id);
                self.joined.remove(&room.poll_id);
            }
            Err(err) => tracing::debug!("Ignoring client frame: {}", err),
        }
    }

    pub fn contains(&self, poll_id: &str) -> bool {
        self.joined.contains(poll_id)
    }

    /// The frame to write for a hub message, if this socket is in its room.
    pub fn forward(&self, message: &HubMessage) -> Option<Message> {
        self.contains(&message.poll_id)
            .then(|| Message::Text(message.payload.as_ref().into()))
    }
}

/// Runs one WebSocket connection until either side closes.
pub async fn run(socket: WebSocket, hub: Hub) {
    let (mut sink, mut stream) = socket.split();
    let mut events = hub.subscribe();
    let mut rooms = Rooms::default();

    loop {
        tokio::select! {
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => rooms.apply(text.as_str()),
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    tracing::debug!("Socket read failed: {}", err);
                    break;
                }
            },
            event = events.recv() => match event {
                Ok(message) => {
                    if let Some(frame) = rooms.forward(&message) {
                        if sink.send(frame).await.is_err() {
                            break;
                        }
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Socket lagged behind, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_joined_rooms() {
        let mut rooms = Rooms::default();

        rooms.apply(r#"{"event":"join-poll","data":{"pollId":"p1"}}"#);
        rooms.apply(r#"{"event":"join-poll","data":{"pollId":"p2"}}"#);
        rooms.apply(r#"{"event":"leave-poll","data":{"pollId":"p1"}}"#);
        rooms.apply("not json");

        assert!(!rooms.contains("p1"));
        assert!(rooms.contains("p2"));
    }

    /// Expected: only events for rooms currently joined reach the socket
    #[tokio::test]
    async fn forwards_events_for_joined_rooms() {
        let hub = Hub::new(8);
        let mut events = hub.subscribe();
        let mut rooms = Rooms::default();

        rooms.apply(r#"{"event":"join-poll","data":{"pollId":"p1"}}"#);
        rooms.apply(r#"{"event":"join-poll","data":{"pollId":"p2"}}"#);
        rooms.apply(r#"{"event":"leave-poll","data":{"pollId":"p2"}}"#);

        hub.dispatch("poll:p1", r#"{"event":"vote-update"}"#);
        hub.dispatch("poll:p2", r#"{"event":"vote-update"}"#);
        hub.dispatch("poll:p3", r#"{"event":"poll-closed"}"#);

        let joined = events.recv().await.unwrap();
        match rooms.forward(&joined) {
            Some(Message::Text(text)) => assert_eq!(text.as_str(), r#"{"event":"vote-update"}"#),
            other => panic!("expected a text frame, got {:?}", other),
        }

        let left = events.recv().await.unwrap();
        assert!(rooms.forward(&left).is_none());

        let never_joined = events.recv().await.unwrap();
        assert!(rooms.forward(&never_joined).is_none());
    }
}
