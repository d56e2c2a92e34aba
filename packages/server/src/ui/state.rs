//! Shared application state.

use std::sync::Arc;

use tsudoi_shared::time::Clock;

use crate::{
    domain::{MessagePusher, ParticipantRepository, SessionRepository},
    usecase::{
        DisconnectParticipantUseCase, GetRoomSnapshotUseCase, JoinParticipantUseCase,
        RenameParticipantUseCase, SendPrivateMessageUseCase, SendPublicMessageUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// JoinParticipantUseCase（参加のユースケース）
    pub join_participant_usecase: JoinParticipantUseCase,
    /// SendPublicMessageUseCase（全体メッセージのユースケース）
    pub send_public_message_usecase: SendPublicMessageUseCase,
    /// SendPrivateMessageUseCase（プライベートメッセージのユースケース）
    pub send_private_message_usecase: SendPrivateMessageUseCase,
    /// RenameParticipantUseCase（表示名変更のユースケース）
    pub rename_participant_usecase: RenameParticipantUseCase,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: DisconnectParticipantUseCase,
    /// GetRoomSnapshotUseCase（参加者一覧取得のユースケース）
    pub get_room_snapshot_usecase: GetRoomSnapshotUseCase,
    /// MessagePusher（チャンネルの登録に使用）
    pub message_pusher: Arc<dyn MessagePusher>,
}

impl AppState {
    /// Compose every use case from the given adapters
    pub fn new(
        participant_repository: Arc<dyn ParticipantRepository>,
        session_repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            join_participant_usecase: JoinParticipantUseCase::new(
                participant_repository.clone(),
                session_repository.clone(),
                message_pusher.clone(),
            ),
            send_public_message_usecase: SendPublicMessageUseCase::new(
                participant_repository.clone(),
                session_repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            send_private_message_usecase: SendPrivateMessageUseCase::new(
                participant_repository.clone(),
                session_repository.clone(),
                message_pusher.clone(),
                clock,
            ),
            rename_participant_usecase: RenameParticipantUseCase::new(
                participant_repository.clone(),
                session_repository.clone(),
                message_pusher.clone(),
            ),
            disconnect_participant_usecase: DisconnectParticipantUseCase::new(
                participant_repository.clone(),
                session_repository,
                message_pusher.clone(),
            ),
            get_room_snapshot_usecase: GetRoomSnapshotUseCase::new(participant_repository),
            message_pusher,
        }
    }
}
