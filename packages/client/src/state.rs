//! Per-connection client state.
//!
//! Turns user commands into requests and server messages into display text.
//! Requests that expect an acknowledgment are remembered by `request_id`
//! until the matching `ack` arrives.

use std::collections::HashMap;

use serde_json::json;
use tsudoi_server::infrastructure::dto::websocket::{ClientMessage, JoinedPayload, ServerMessage};

use crate::{
    domain::ClientCommand,
    formatter::MessageFormatter,
    roster::Roster,
};

/// `request_id` used for the join handshake
pub const JOIN_REQUEST_ID: &str = "join";

/// A request waiting for its acknowledgment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRequest {
    Private {
        to: String,
        text: String,
        timestamp: i64,
    },
    Rename {
        new_name: String,
    },
}

/// What to do with a user command
#[derive(Debug, Clone, PartialEq)]
pub enum Outgoing {
    /// Send a request to the server
    Send(ClientMessage),
    /// Print locally, nothing is sent
    Print(String),
    /// End the session
    Quit,
}

/// State of a joined session
#[derive(Debug)]
pub struct SessionState {
    pub self_id: String,
    pub display_name: String,
    pub roster: Roster,
    pending: HashMap<String, PendingRequest>,
    next_request: u64,
}

impl SessionState {
    /// Build the state from a successful join acknowledgment
    pub fn from_joined(joined: JoinedPayload) -> Self {
        let mut roster = Roster::new();
        roster.seed(&joined.snapshot);
        roster.insert(&joined.id, &joined.display_name);
        Self {
            self_id: joined.id,
            display_name: joined.display_name,
            roster,
            pending: HashMap::new(),
            next_request: 0,
        }
    }

    /// Roster listing, as printed by `/who` and after joining
    pub fn format_roster(&self) -> String {
        MessageFormatter::format_roster(&self.roster.entries(), &self.self_id)
    }

    /// Number of requests still waiting for an acknowledgment
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn next_request_id(&mut self) -> String {
        self.next_request += 1;
        format!("req-{}", self.next_request)
    }

    /// Turn a user command into an action
    ///
    /// # Arguments
    ///
    /// * `command` - The parsed input line
    /// * `now` - Current Unix time in milliseconds, attached to outgoing messages
    pub fn prepare(&mut self, command: ClientCommand, now: i64) -> Outgoing {
        match command {
            ClientCommand::Public(text) => Outgoing::Send(ClientMessage::PublicMessage {
                text: Some(text),
                timestamp: Some(json!(now)),
            }),
            ClientCommand::Private { to, text } => {
                let Some(recipient_id) = self.roster.id_of(&to).map(str::to_string) else {
                    return Outgoing::Print(MessageFormatter::format_error(&format!(
                        "No participant named '{}'",
                        to
                    )));
                };
                let request_id = self.next_request_id();
                self.pending.insert(
                    request_id.clone(),
                    PendingRequest::Private {
                        to,
                        text: text.clone(),
                        timestamp: now,
                    },
                );
                Outgoing::Send(ClientMessage::PrivateMessage {
                    request_id: Some(request_id),
                    recipient_id: Some(recipient_id),
                    text: Some(text),
                    timestamp: Some(json!(now)),
                })
            }
            ClientCommand::Rename(new_name) => {
                let request_id = self.next_request_id();
                self.pending.insert(
                    request_id.clone(),
                    PendingRequest::Rename {
                        new_name: new_name.clone(),
                    },
                );
                Outgoing::Send(ClientMessage::Rename {
                    request_id: Some(request_id),
                    new_name: Some(new_name),
                })
            }
            ClientCommand::Who => Outgoing::Print(self.format_roster()),
            ClientCommand::Quit => Outgoing::Quit,
            ClientCommand::Usage(usage) => Outgoing::Print(MessageFormatter::format_error(usage)),
        }
    }

    /// Apply a server message, returning the text to display, if any
    pub fn apply(&mut self, message: ServerMessage) -> Option<String> {
        match message {
            ServerMessage::Ack {
                request_id, error, ..
            } => {
                let pending = self.pending.remove(&request_id)?;
                if let Some(error) = error {
                    return Some(MessageFormatter::format_error(&error));
                }
                match pending {
                    PendingRequest::Private {
                        to,
                        text,
                        timestamp,
                    } => Some(MessageFormatter::format_private_outgoing(
                        &to, &text, timestamp,
                    )),
                    PendingRequest::Rename { new_name } => {
                        // The server trims the name, as it does on join
                        let new_name = new_name.trim().to_string();
                        self.roster.rename(&self.self_id, &new_name);
                        self.display_name = new_name;
                        Some(MessageFormatter::format_renamed_self(&self.display_name))
                    }
                }
            }
            ServerMessage::ParticipantJoined { id, display_name } => {
                if id == self.self_id {
                    return None;
                }
                self.roster.insert(&id, &display_name);
                Some(MessageFormatter::format_participant_joined(&display_name))
            }
            ServerMessage::ParticipantLeft { id } => {
                let name = self.roster.remove(&id).unwrap_or(id);
                Some(MessageFormatter::format_participant_left(&name))
            }
            ServerMessage::ParticipantRenamed { id, new_name } => {
                let old_name = self.roster.rename(&id, &new_name).unwrap_or(id);
                Some(MessageFormatter::format_participant_renamed(
                    &old_name, &new_name,
                ))
            }
            ServerMessage::PublicMessage {
                sender_id,
                timestamp,
                text,
            } => {
                let from = self.roster.name_of(&sender_id).unwrap_or(sender_id.as_str());
                Some(MessageFormatter::format_public_message(
                    from, &text, timestamp,
                ))
            }
            ServerMessage::PrivateMessage {
                sender_id,
                timestamp,
                text,
            } => {
                let from = self.roster.name_of(&sender_id).unwrap_or(sender_id.as_str());
                Some(MessageFormatter::format_private_incoming(
                    from, &text, timestamp,
                ))
            }
            ServerMessage::Error { message } => Some(MessageFormatter::format_error(&message)),
        }
    }
}
