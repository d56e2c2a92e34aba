//! UseCase: 表示名変更処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RenameParticipantUseCase::execute() メソッド
//! - 表示名の検証、Registry での改名、participant-renamed の通知
//!
//! ### なぜこのテストが必要か
//! - 改名でも表示名の一意性を守る必要がある
//! - 改名した本人は ack で自分の表示を更新するため、通知は他の参加者にだけ送る
//!
//! ### どのような状況を想定しているか
//! - 正常系：改名と他の参加者への通知
//! - 異常系：使用中の名前（自分の現在の名前を含む）、空の名前、未参加のチャンネル

use std::sync::Arc;

use crate::domain::{
    ChannelId, DisplayName, MessagePusher, ParticipantRepository, RoomEvent, SessionRepository,
};

use super::{channels_except, error::ChatError};

/// 表示名変更のユースケース
pub struct RenameParticipantUseCase {
    participant_repository: Arc<dyn ParticipantRepository>,
    session_repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RenameParticipantUseCase {
    /// 新しい RenameParticipantUseCase を作成
    pub fn new(
        participant_repository: Arc<dyn ParticipantRepository>,
        session_repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            participant_repository,
            session_repository,
            message_pusher,
        }
    }

    /// 表示名変更を実行
    ///
    /// # Arguments
    ///
    /// * `channel` - リクエスト元のチャンネル
    /// * `new_name` - 新しい表示名（未加工）
    ///
    /// # Returns
    ///
    /// * `Ok(DisplayName)` - 確定した新しい表示名（トリム済み）
    /// * `Err(ChatError)` - `UnresolvedIdentity` / `InvalidName` / `NameTaken`
    pub async fn execute(
        &self,
        channel: &ChannelId,
        new_name: &str,
    ) -> Result<DisplayName, ChatError> {
        // 1. 検証
        let id = self
            .session_repository
            .resolve(channel)
            .await
            .ok_or(ChatError::UnresolvedIdentity)?;
        let new_name = DisplayName::new(new_name).map_err(|_| ChatError::InvalidName)?;

        // 2. Registry で改名（重複チェックと変更はアトミック）
        self.participant_repository
            .rename(&id, new_name.clone())
            .await?;

        // 3. 他の参加者に通知
        let snapshot = self.participant_repository.snapshot().await;
        let event = RoomEvent::ParticipantRenamed {
            id: id.clone(),
            new_name: new_name.clone(),
        };
        if let Err(e) = self
            .message_pusher
            .broadcast(channels_except(&snapshot, &id), &event)
            .await
        {
            tracing::warn!("Failed to broadcast participant-renamed: {}", e);
        }

        tracing::info!("Participant '{}' renamed to '{}'", id, new_name);

        Ok(new_name)
    }
}
