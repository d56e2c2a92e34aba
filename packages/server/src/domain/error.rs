//! Domain error types.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Participant ID must not be empty")]
    EmptyParticipantId,

    #[error("Display name must not be empty")]
    EmptyDisplayName,

    #[error("Message text must not be empty")]
    EmptyMessageText,
}

/// Participant registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Another participant already uses this display name
    #[error("Display name '{0}' is already taken")]
    NameTaken(String),

    /// No participant is registered under this ID
    #[error("Participant '{0}' not found")]
    UnknownParticipant(String),
}

/// Message push (delivery) errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// The channel is not registered with the pusher
    #[error("Channel '{0}' not found")]
    ChannelNotFound(String),

    /// The channel's outbound queue is closed
    #[error("Failed to push message: {0}")]
    PushFailed(String),

    /// The event could not be encoded for the wire
    #[error("Failed to serialize event: {0}")]
    Serialization(String),
}
