//! UseCase: プライベートメッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendPrivateMessageUseCase::execute() メソッド
//! - 宛先の解決と、宛先のチャンネルだけへの配送
//!
//! ### なぜこのテストが必要か
//! - プライベートメッセージが宛先以外に漏れてはいけない
//! - 送信者自身の控えはクライアント側で作るため、サーバーは送信者に本文を送り返さない
//!
//! ### どのような状況を想定しているか
//! - 正常系：宛先だけに届く
//! - 異常系：未参加の送信者、空の本文、存在しない宛先

use std::sync::Arc;

use tsudoi_shared::time::Clock;

use crate::domain::{
    ChannelId, ChatMessage, MessagePusher, MessageText, ParticipantId, ParticipantRepository,
    RoomEvent, SessionRepository, Timestamp,
};

use super::error::ChatError;

/// プライベートメッセージ送信のユースケース
pub struct SendPrivateMessageUseCase {
    participant_repository: Arc<dyn ParticipantRepository>,
    session_repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendPrivateMessageUseCase {
    /// 新しい SendPrivateMessageUseCase を作成
    pub fn new(
        participant_repository: Arc<dyn ParticipantRepository>,
        session_repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            participant_repository,
            session_repository,
            message_pusher,
            clock,
        }
    }

    /// プライベートメッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `channel` - 送信元のチャンネル
    /// * `recipient_id` - 宛先の参加者 ID（未加工）
    /// * `text` - メッセージ本文（未加工）
    /// * `timestamp` - クライアントが付けた送信時刻（欠落・不正ならサーバー時刻）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 宛先に配送したメッセージ（送信者への ack は呼び出し側が返す）
    /// * `Err(ChatError)` - `UnresolvedIdentity` / `EmptyMessage` / `RecipientNotFound`
    pub async fn execute(
        &self,
        channel: &ChannelId,
        recipient_id: &str,
        text: &str,
        timestamp: Option<Timestamp>,
    ) -> Result<ChatMessage, ChatError> {
        // 1. 検証
        let sender_id = self
            .session_repository
            .resolve(channel)
            .await
            .ok_or(ChatError::UnresolvedIdentity)?;
        // 本文は空白のみでないことだけ確認し、送られたまま届ける
        let text = MessageText::verbatim(text).map_err(|_| ChatError::EmptyMessage)?;
        let recipient_id = ParticipantId::new(recipient_id.to_string())
            .map_err(|_| ChatError::RecipientNotFound)?;
        let recipient = self
            .participant_repository
            .lookup(&recipient_id)
            .await
            .ok_or(ChatError::RecipientNotFound)?;
        let timestamp = timestamp
            .filter(Timestamp::is_valid)
            .unwrap_or_else(|| Timestamp::new(self.clock.now_millis()));

        // 2. 宛先のチャンネルだけに配送
        let message = ChatMessage::new(sender_id, text, timestamp);
        self.message_pusher
            .push_to(
                &recipient.channel,
                &RoomEvent::PrivateMessage(message.clone()),
            )
            .await
            .map_err(|e| {
                // 宛先のチャンネルが閉じている = 切断処理中
                tracing::warn!("Failed to deliver private-message to '{}': {}", recipient.id, e);
                ChatError::RecipientNotFound
            })?;

        tracing::debug!(
            "Private message from '{}' delivered to '{}'",
            message.sender_id,
            recipient.id
        );

        Ok(message)
    }
}
