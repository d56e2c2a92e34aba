//! UseCase: 公開メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendPublicMessageUseCase::execute() メソッド
//! - 送信者を含む全参加者へのブロードキャスト、本文のトリム、タイムスタンプの補完
//!
//! ### なぜこのテストが必要か
//! - 送信者はサーバーが確定させた本文・時刻をエコーで受け取る必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：全参加者（送信者を含む）へのブロードキャスト
//! - 異常系：未参加のチャンネルからの送信、空の本文
//! - エッジケース：タイムスタンプの欠落・不正値

use std::sync::Arc;

use tsudoi_shared::time::Clock;

use crate::domain::{
    ChannelId, ChatMessage, MessagePusher, MessageText, ParticipantRepository, RoomEvent,
    SessionRepository, Timestamp,
};

use super::{all_channels, error::ChatError};

/// 公開メッセージ送信のユースケース
pub struct SendPublicMessageUseCase {
    participant_repository: Arc<dyn ParticipantRepository>,
    session_repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendPublicMessageUseCase {
    /// 新しい SendPublicMessageUseCase を作成
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

    /// 公開メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `channel` - 送信元のチャンネル
    /// * `text` - メッセージ本文（未加工）
    /// * `timestamp` - クライアントが付けた送信時刻（欠落・不正ならサーバー時刻）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - ブロードキャストしたメッセージ
    /// * `Err(ChatError)` - `UnresolvedIdentity` / `EmptyMessage`
    pub async fn execute(
        &self,
        channel: &ChannelId,
        text: &str,
        timestamp: Option<Timestamp>,
    ) -> Result<ChatMessage, ChatError> {
        // 1. 送信者の解決と検証
        let sender_id = self
            .session_repository
            .resolve(channel)
            .await
            .ok_or(ChatError::UnresolvedIdentity)?;
        let text = MessageText::new(text).map_err(|_| ChatError::EmptyMessage)?;
        let timestamp = timestamp
            .filter(Timestamp::is_valid)
            .unwrap_or_else(|| Timestamp::new(self.clock.now_millis()));

        // 2. 送信者を含む全参加者にブロードキャスト
        let message = ChatMessage::new(sender_id, text, timestamp);
        let snapshot = self.participant_repository.snapshot().await;
        if let Err(e) = self
            .message_pusher
            .broadcast(
                all_channels(&snapshot),
                &RoomEvent::PublicMessage(message.clone()),
            )
            .await
        {
            tracing::warn!("Failed to broadcast public-message: {}", e);
        }

        tracing::debug!(
            "Public message from '{}' delivered to {} channel(s)",
            message.sender_id,
            snapshot.len()
        );

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use tsudoi_shared::time::FixedClock;

    use super::*;
    use crate::{
        domain::{ChannelIdFactory, message_pusher::MockMessagePusher},
        infrastructure::dto::websocket::ServerMessage,
        usecase::{JoinParticipantUseCase, testing::TestRoom},
    };

    const NOW: i64 = 1_700_000_000_000;

    fn create_usecases(room: &TestRoom) -> (JoinParticipantUseCase, SendPublicMessageUseCase) {
        let join = JoinParticipantUseCase::new(
            room.participants.clone(),
            room.sessions.clone(),
            room.pusher.clone(),
        );
        let send = SendPublicMessageUseCase::new(
            room.participants.clone(),
            room.sessions.clone(),
            room.pusher.clone(),
            Arc::new(FixedClock::new(NOW)),
        );
        (join, send)
    }

    #[tokio::test]
    async fn test_public_message_is_echoed_to_everyone() {
        // テスト項目: 公開メッセージは送信者を含む全参加者にちょうど 1 回ずつ届く
        // given (前提条件):
        let room = TestRoom::new();
        let (join, send) = create_usecases(&room);
        let (alice_channel, mut alice_inbox) = room.connect().await;
        let (bob_channel, mut bob_inbox) = room.connect().await;
        let alice = join.execute(&alice_channel, "alice").await.unwrap();
        join.execute(&bob_channel, "bob").await.unwrap();
        alice_inbox.drain();

        // when (操作):
        let result = send
            .execute(&alice_channel, "  hello  ", Some(Timestamp::new(42)))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        let expected = ServerMessage::PublicMessage {
            sender_id: alice.participant.id.as_str().to_string(),
            timestamp: 42,
            text: "hello".to_string(),
        };
        assert_eq!(alice_inbox.drain(), vec![expected.clone()]);
        assert_eq!(bob_inbox.drain(), vec![expected]);
    }

    #[tokio::test]
    async fn test_public_message_without_timestamp_uses_server_time() {
        // テスト項目: タイムスタンプが欠落・不正な場合はサーバー時刻が使われる
        // given (前提条件):
        let room = TestRoom::new();
        let (join, send) = create_usecases(&room);
        let (channel, _inbox) = room.connect().await;
        join.execute(&channel, "alice").await.unwrap();

        // when (操作):
        let missing = send.execute(&channel, "a", None).await.unwrap();
        let invalid = send
            .execute(&channel, "b", Some(Timestamp::new(i64::MIN)))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(missing.timestamp, Timestamp::new(NOW));
        assert_eq!(invalid.timestamp, Timestamp::new(NOW));
    }

    #[tokio::test]
    async fn test_public_message_from_unjoined_channel_fails() {
        // テスト項目: 未参加のチャンネルからの送信は UnresolvedIdentity になり、何も届かない
        // given (前提条件):
        let room = TestRoom::new();
        let (join, send) = create_usecases(&room);
        let (alice_channel, mut alice_inbox) = room.connect().await;
        let (stranger_channel, _stranger_inbox) = room.connect().await;
        join.execute(&alice_channel, "alice").await.unwrap();

        // when (操作):
        let result = send.execute(&stranger_channel, "hi", None).await;

        // then (期待する結果):
        assert_eq!(result, Err(ChatError::UnresolvedIdentity));
        assert!(alice_inbox.drain().is_empty());
    }

    #[tokio::test]
    async fn test_public_message_with_blank_text_pushes_nothing() {
        // テスト項目: 空白のみの本文は EmptyMessage になり、ブロードキャストされない
        // given (前提条件):
        let room = TestRoom::new();
        let channel = ChannelIdFactory::generate();
        room.sessions
            .bind(channel.clone(), crate::domain::ParticipantIdFactory::generate())
            .await;
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().times(0);
        let send = SendPublicMessageUseCase::new(
            room.participants.clone(),
            room.sessions.clone(),
            Arc::new(pusher),
            Arc::new(FixedClock::new(NOW)),
        );

        // when (操作):
        let result = send.execute(&channel, " \n ", None).await;

        // then (期待する結果):
        assert_eq!(result, Err(ChatError::EmptyMessage));
    }
}
