//! Inbound frame dispatcher.
//!
//! Decodes one text frame from a channel, runs the matching use case and
//! builds the direct reply for that channel. Events for other channels are
//! pushed by the use cases themselves.

use crate::{
    domain::ChannelId,
    infrastructure::dto::{
        conversion::parse_client_timestamp,
        websocket::{ClientMessage, JoinedPayload, ParticipantInfo, ServerMessage},
    },
    ui::state::AppState,
    usecase::{ChatError, JoinOutcome},
};

/// Handle one inbound text frame.
///
/// Returns the reply for the sending channel, if any. A successful
/// `public-message` has no direct reply: the sender gets its copy through the
/// broadcast like everyone else.
pub async fn dispatch(state: &AppState, channel: &ChannelId, frame: &str) -> Option<ServerMessage> {
    let value: serde_json::Value = match serde_json::from_str(frame) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Channel '{}' sent a frame that is not JSON: {}", channel, e);
            return Some(error_event(ChatError::MalformedRequest(
                "frame is not valid JSON".to_string(),
            )));
        }
    };

    let request: ClientMessage = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Channel '{}' sent an unknown request: {}", channel, e);
            return Some(error_event(ChatError::MalformedRequest(e.to_string())));
        }
    };

    match request {
        ClientMessage::Join {
            request_id,
            display_name,
        } => {
            let Some(request_id) = request_id else {
                return Some(missing_request_id("join"));
            };
            let display_name = display_name.unwrap_or_default();
            let reply = match state
                .join_participant_usecase
                .execute(channel, &display_name)
                .await
            {
                Ok(outcome) => {
                    if outcome.rejoined {
                        tracing::debug!("Channel '{}' repeated its join", channel);
                    }
                    ServerMessage::ack_joined(request_id, joined_payload(&outcome))
                }
                Err(e) => rejected(channel, "join", request_id, e),
            };
            Some(reply)
        }
        ClientMessage::PublicMessage { text, timestamp } => {
            let text = text.unwrap_or_default();
            let timestamp = parse_client_timestamp(timestamp.as_ref());
            match state
                .send_public_message_usecase
                .execute(channel, &text, timestamp)
                .await
            {
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!("Rejected public-message from '{}': {}", channel, e);
                    Some(error_event(e))
                }
            }
        }
        ClientMessage::PrivateMessage {
            request_id,
            recipient_id,
            text,
            timestamp,
        } => {
            let Some(request_id) = request_id else {
                return Some(missing_request_id("private-message"));
            };
            let recipient_id = recipient_id.unwrap_or_default();
            let text = text.unwrap_or_default();
            let timestamp = parse_client_timestamp(timestamp.as_ref());
            let reply = match state
                .send_private_message_usecase
                .execute(channel, &recipient_id, &text, timestamp)
                .await
            {
                Ok(_) => ServerMessage::ack(request_id),
                Err(e) => rejected(channel, "private-message", request_id, e),
            };
            Some(reply)
        }
        ClientMessage::Rename {
            request_id,
            new_name,
        } => {
            let Some(request_id) = request_id else {
                return Some(missing_request_id("rename"));
            };
            let new_name = new_name.unwrap_or_default();
            let reply = match state
                .rename_participant_usecase
                .execute(channel, &new_name)
                .await
            {
                Ok(_) => ServerMessage::ack(request_id),
                Err(e) => rejected(channel, "rename", request_id, e),
            };
            Some(reply)
        }
    }
}

fn joined_payload(outcome: &JoinOutcome) -> JoinedPayload {
    JoinedPayload {
        id: outcome.participant.id.as_str().to_string(),
        display_name: outcome.participant.display_name.as_str().to_string(),
        snapshot: outcome.snapshot.iter().map(ParticipantInfo::from).collect(),
    }
}

fn rejected(channel: &ChannelId, event: &str, request_id: String, error: ChatError) -> ServerMessage {
    tracing::warn!("Rejected {} from '{}': {}", event, channel, error);
    ServerMessage::ack_error(request_id, error.to_string())
}

fn missing_request_id(event: &str) -> ServerMessage {
    error_event(ChatError::MalformedRequest(format!(
        "{} requires a request_id",
        event
    )))
}

fn error_event(error: ChatError) -> ServerMessage {
    ServerMessage::Error {
        message: error.to_string(),
    }
}
