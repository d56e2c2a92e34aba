//! Domain entities.

use super::value_object::{ChannelId, DisplayName, MessageText, ParticipantId, Timestamp};

/// A connected, named chat member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Immutable identity
    pub id: ParticipantId,
    /// Unique among currently registered participants
    pub display_name: DisplayName,
    /// Channel this participant was registered from
    pub channel: ChannelId,
}

impl Participant {
    pub fn new(id: ParticipantId, display_name: DisplayName, channel: ChannelId) -> Self {
        Self {
            id,
            display_name,
            channel,
        }
    }

    /// Replace the display name. Uniqueness is the registry's responsibility.
    pub fn rename(&mut self, new_name: DisplayName) {
        self.display_name = new_name;
    }
}

/// A routed chat message, public or private
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender_id: ParticipantId,
    pub text: MessageText,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(sender_id: ParticipantId, text: MessageText, timestamp: Timestamp) -> Self {
        Self {
            sender_id,
            text,
            timestamp,
        }
    }
}
