//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::{http::ParticipantsDto, websocket::ParticipantInfo},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current participants, ordered by display name
pub async fn get_participants(State(state): State<Arc<AppState>>) -> Json<ParticipantsDto> {
    let snapshot = state.get_room_snapshot_usecase.execute().await;

    // Domain Model から DTO への変換
    let participants: Vec<ParticipantInfo> = snapshot.iter().map(ParticipantInfo::from).collect();

    Json(ParticipantsDto {
        count: participants.len(),
        participants,
    })
}
