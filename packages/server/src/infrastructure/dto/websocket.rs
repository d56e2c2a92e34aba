//! WebSocket message DTOs.
//!
//! Every frame is a JSON object tagged by `type`, with snake_case fields.
//! Requests that need an acknowledgment carry a client-chosen `request_id`,
//! echoed back in the matching `ack`.

use serde::{Deserialize, Serialize};

/// Client → server request
///
/// Fields are optional at the wire level so that a missing field is reported
/// as a validation failure of the request rather than a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    Join {
        #[serde(default)]
        request_id: Option<String>,
        #[serde(default)]
        display_name: Option<String>,
    },
    PublicMessage {
        #[serde(default)]
        text: Option<String>,
        /// Unix milliseconds or an RFC 3339 string
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<serde_json::Value>,
    },
    PrivateMessage {
        #[serde(default)]
        request_id: Option<String>,
        #[serde(default)]
        recipient_id: Option<String>,
        #[serde(default)]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<serde_json::Value>,
    },
    Rename {
        #[serde(default)]
        request_id: Option<String>,
        #[serde(default)]
        new_name: Option<String>,
    },
}

/// One entry of the room snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub id: String,
    pub display_name: String,
}

/// Payload of a successful join acknowledgment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinedPayload {
    pub id: String,
    pub display_name: String,
    pub snapshot: Vec<ParticipantInfo>,
}

/// Server → client message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Acknowledgment of a request carrying `request_id`
    Ack {
        request_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        joined: Option<JoinedPayload>,
    },
    ParticipantJoined {
        id: String,
        display_name: String,
    },
    ParticipantLeft {
        id: String,
    },
    ParticipantRenamed {
        id: String,
        new_name: String,
    },
    PublicMessage {
        sender_id: String,
        timestamp: i64,
        text: String,
    },
    PrivateMessage {
        sender_id: String,
        timestamp: i64,
        text: String,
    },
    /// Failure of a request that has no acknowledgment
    Error {
        message: String,
    },
}

impl ServerMessage {
    /// Empty successful acknowledgment
    pub fn ack(request_id: String) -> Self {
        ServerMessage::Ack {
            request_id,
            error: None,
            joined: None,
        }
    }

    /// Failed acknowledgment carrying a user-facing message
    pub fn ack_error(request_id: String, message: String) -> Self {
        ServerMessage::Ack {
            request_id,
            error: Some(message),
            joined: None,
        }
    }

    /// Successful join acknowledgment
    pub fn ack_joined(request_id: String, joined: JoinedPayload) -> Self {
        ServerMessage::Ack {
            request_id,
            error: None,
            joined: Some(joined),
        }
    }
}
