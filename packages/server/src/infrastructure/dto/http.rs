//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::ParticipantInfo;

/// Response of `GET /api/participants`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantsDto {
    pub count: usize,
    pub participants: Vec<ParticipantInfo>,
}
