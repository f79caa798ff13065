use serde::{Deserialize, Serialize};

use crate::model::poll::PollDto;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollRoomDto {
    pub poll_id: String,
}

/// Frames sent by WebSocket clients.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    JoinPoll(PollRoomDto),
    LeavePoll(PollRoomDto),
}

/// Frames pushed to every WebSocket client that joined the poll's room.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    VoteUpdate(PollDto),
    PollClosed(PollRoomDto),
}

impl ServerEvent {
    /// Id of the poll whose room receives this event.
    pub fn poll_id(&self) -> &str {
        match self {
            Self::VoteUpdate(poll) => &poll.id,
            Self::PollClosed(room) => &room.poll_id,
        }
    }
}
