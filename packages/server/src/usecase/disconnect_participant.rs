//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 紐づけ解除、Registry からの削除、participant-left の通知
//!
//! ### なぜこのテストが必要か
//! - 切断時の後始末は無条件に行う必要がある
//!   （チャンネルのない参加者、削除済みの参加者を指すチャンネルを残さない）
//! - トランスポートが切断を複数回通知しても、後始末と通知は 1 回だけ
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断と通知
//! - エッジケース：未参加のチャンネルの切断、2 回目の切断

use std::sync::Arc;

use crate::domain::{
    ChannelId, MessagePusher, Participant, ParticipantRepository, RoomEvent, SessionRepository,
};

use super::all_channels;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    participant_repository: Arc<dyn ParticipantRepository>,
    session_repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
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

    /// 参加者切断を実行
    ///
    /// # Arguments
    ///
    /// * `channel` - 切断されたチャンネル
    ///
    /// # Returns
    ///
    /// 削除した参加者（未参加のチャンネル、または 2 回目以降の呼び出しでは None）
    ///
    /// join が登録と紐づけの間で中断されていた場合も、そのチャンネルで登録された参加者を削除する。
    pub async fn execute(&self, channel: &ChannelId) -> Option<Participant> {
        // 1. 送信先から外す
        self.message_pusher.unregister_channel(channel).await;

        // 2. 紐づけ解除（ID が返るのは 1 回だけ）
        let Some(id) = self.session_repository.unbind(channel).await else {
            // 紐づけ前に中断された join の登録が残っていれば削除する（未通知なので通知もしない）
            let orphan = self.participant_repository.remove_by_channel(channel).await;
            if let Some(orphan) = &orphan {
                tracing::warn!(
                    "Removed participant '{}' whose join on '{}' never completed",
                    orphan.id,
                    channel
                );
            }
            return orphan;
        };

        // 3. Registry から削除
        let removed = self.participant_repository.remove(&id).await;

        // 4. 残りの参加者に通知
        let remaining = self.participant_repository.snapshot().await;
        let event = RoomEvent::ParticipantLeft { id: id.clone() };
        if let Err(e) = self
            .message_pusher
            .broadcast(all_channels(&remaining), &event)
            .await
        {
            tracing::warn!("Failed to broadcast participant-left: {}", e);
        }

        tracing::info!(
            "Participant '{}' left, {} participant(s) remaining",
            id,
            remaining.len()
        );

        removed
    }
}
