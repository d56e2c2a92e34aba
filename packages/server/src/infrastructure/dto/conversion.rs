//! Conversion logic between DTOs and domain entities.

use serde_json::Value;

use tsudoi_shared::time::parse_rfc3339_millis;

use crate::domain::{Participant, RoomEvent, Timestamp};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain
// ========================================

/// Interpret a client-supplied timestamp.
///
/// Accepts Unix milliseconds or an RFC 3339 string. Anything else, including
/// numbers outside the representable calendar range, yields `None` so that
/// the server clock is used instead.
pub fn parse_client_timestamp(value: Option<&Value>) -> Option<Timestamp> {
    let millis = match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
        Value::String(s) => parse_rfc3339_millis(s).or_else(|| s.trim().parse::<i64>().ok())?,
        _ => return None,
    };
    Some(Timestamp::new(millis)).filter(Timestamp::is_valid)
}

// ========================================
// Domain → DTO
// ========================================

impl From<&Participant> for dto::ParticipantInfo {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id.as_str().to_string(),
            display_name: participant.display_name.as_str().to_string(),
        }
    }
}

impl From<&RoomEvent> for dto::ServerMessage {
    fn from(event: &RoomEvent) -> Self {
        match event {
            RoomEvent::ParticipantJoined { id, display_name } => {
                dto::ServerMessage::ParticipantJoined {
                    id: id.as_str().to_string(),
                    display_name: display_name.as_str().to_string(),
                }
            }
            RoomEvent::ParticipantLeft { id } => dto::ServerMessage::ParticipantLeft {
                id: id.as_str().to_string(),
            },
            RoomEvent::ParticipantRenamed { id, new_name } => {
                dto::ServerMessage::ParticipantRenamed {
                    id: id.as_str().to_string(),
                    new_name: new_name.as_str().to_string(),
                }
            }
            RoomEvent::PublicMessage(message) => dto::ServerMessage::PublicMessage {
                sender_id: message.sender_id.as_str().to_string(),
                timestamp: message.timestamp.value(),
                text: message.text.as_str().to_string(),
            },
            RoomEvent::PrivateMessage(message) => dto::ServerMessage::PrivateMessage {
                sender_id: message.sender_id.as_str().to_string(),
                timestamp: message.timestamp.value(),
                text: message.text.as_str().to_string(),
            },
        }
    }
}
