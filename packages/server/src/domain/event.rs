//! Events pushed from the room to connected channels.

use super::{
    entity::ChatMessage,
    value_object::{DisplayName, ParticipantId},
};

/// An outbound room event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    ParticipantJoined {
        id: ParticipantId,
        display_name: DisplayName,
    },
    ParticipantLeft {
        id: ParticipantId,
    },
    ParticipantRenamed {
        id: ParticipantId,
        new_name: DisplayName,
    },
    PublicMessage(ChatMessage),
    PrivateMessage(ChatMessage),
}

impl RoomEvent {
    /// Wire event name
    pub fn name(&self) -> &'static str {
        match self {
            RoomEvent::ParticipantJoined { .. } => "participant-joined",
            RoomEvent::ParticipantLeft { .. } => "participant-left",
            RoomEvent::ParticipantRenamed { .. } => "participant-renamed",
            RoomEvent::PublicMessage(_) => "public-message",
            RoomEvent::PrivateMessage(_) => "private-message",
        }
    }
}
