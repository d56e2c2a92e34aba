//! Domain layer for the chat application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, Participant};
pub use error::{MessagePushError, RegistryError, ValueObjectError};
pub use event::RoomEvent;
pub use factory::{ChannelIdFactory, ParticipantIdFactory};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{ParticipantRepository, SessionRepository};
pub use value_object::{ChannelId, DisplayName, MessageText, ParticipantId, Timestamp};
