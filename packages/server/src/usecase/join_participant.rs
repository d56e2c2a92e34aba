//! UseCase: 参加処理（join）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinParticipantUseCase::execute() メソッド
//! - 表示名の検証、Registry への登録、チャンネルの紐づけ、participant-joined の通知
//!
//! ### なぜこのテストが必要か
//! - 表示名の一意性は部屋全体の不変条件
//! - 同じチャンネルからの再 join は冪等でなければならない（クライアントの再送対策）
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加と他の参加者への通知
//! - 異常系：空の表示名、使用中の表示名
//! - エッジケース：紐づけ済みチャンネルからの再 join

use std::sync::Arc;

use crate::domain::{
    ChannelId, DisplayName, MessagePusher, Participant, ParticipantId, ParticipantRepository,
    RoomEvent, SessionRepository,
};

use super::{channels_except, error::ChatError};

/// join の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// 参加者（再 join の場合は既存の参加者）
    pub participant: Participant,
    /// join 時点の部屋の参加者一覧（自分を含む）
    pub snapshot: Vec<Participant>,
    /// 既に参加済みのチャンネルからの再 join だったか
    pub rejoined: bool,
}

/// 参加のユースケース
pub struct JoinParticipantUseCase {
    participant_repository: Arc<dyn ParticipantRepository>,
    session_repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinParticipantUseCase {
    /// 新しい JoinParticipantUseCase を作成
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

    /// 参加を実行
    ///
    /// # Arguments
    ///
    /// * `channel` - リクエスト元のチャンネル
    /// * `display_name` - クライアントが送ってきた表示名（未加工）
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome)` - 参加成功、または参加済みチャンネルからの再 join
    /// * `Err(ChatError)` - `InvalidName` / `NameTaken`（チャンネルは未参加のまま）
    pub async fn execute(
        &self,
        channel: &ChannelId,
        display_name: &str,
    ) -> Result<JoinOutcome, ChatError> {
        // 1. 再 join: 既存の参加者情報をそのまま返す（通知はしない）
        if let Some(id) = self.session_repository.resolve(channel).await {
            return self.existing_outcome(&id).await;
        }

        // 2. 検証
        let display_name = DisplayName::new(display_name).map_err(|_| ChatError::InvalidName)?;

        // 3. Registry に登録（重複チェックと追加はアトミック）
        let participant = self
            .participant_repository
            .register(display_name, channel.clone())
            .await?;

        // 4. チャンネルを紐づけ
        if let Some(existing) = self
            .session_repository
            .bind(channel.clone(), participant.id.clone())
            .await
        {
            // 同じチャンネルの処理は直列なので通常は起きない。登録を取り消して既存を返す
            tracing::warn!(
                "Channel '{}' was bound concurrently, discarding participant '{}'",
                channel,
                participant.id
            );
            self.participant_repository.remove(&participant.id).await;
            return self.existing_outcome(&existing).await;
        }

        // 5. 他の参加者に通知
        let snapshot = self.participant_repository.snapshot().await;
        let event = RoomEvent::ParticipantJoined {
            id: participant.id.clone(),
            display_name: participant.display_name.clone(),
        };
        if let Err(e) = self
            .message_pusher
            .broadcast(channels_except(&snapshot, &participant.id), &event)
            .await
        {
            tracing::warn!("Failed to broadcast participant-joined: {}", e);
        }

        tracing::info!(
            "Participant '{}' joined as '{}'",
            participant.id,
            participant.display_name
        );

        Ok(JoinOutcome {
            participant,
            snapshot,
            rejoined: false,
        })
    }

    async fn existing_outcome(&self, id: &ParticipantId) -> Result<JoinOutcome, ChatError> {
        let participant = self
            .participant_repository
            .lookup(id)
            .await
            .ok_or(ChatError::UnresolvedIdentity)?;
        let snapshot = self.participant_repository.snapshot().await;

        tracing::debug!("Participant '{}' sent a duplicate join", participant.id);

        Ok(JoinOutcome {
            participant,
            snapshot,
            rejoined: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ChannelIdFactory, message_pusher::MockMessagePusher},
        infrastructure::dto::websocket::ServerMessage,
        usecase::testing::TestRoom,
    };

    fn create_usecase(room: &TestRoom) -> JoinParticipantUseCase {
        JoinParticipantUseCase::new(
            room.participants.clone(),
            room.sessions.clone(),
            room.pusher.clone(),
        )
    }

    #[tokio::test]
    async fn test_join_success() {
        // テスト項目: 新規参加者が登録され、チャンネルが紐づき、スナップショットに自分が含まれる
        // given (前提条件):
        let room = TestRoom::new();
        let usecase = create_usecase(&room);
        let (channel, _inbox) = room.connect().await;

        // when (操作):
        let result = usecase.execute(&channel, "  alice ").await;

        // then (期待する結果):
        let outcome = result.unwrap();
        assert!(!outcome.rejoined);
        assert_eq!(outcome.participant.display_name.as_str(), "alice");
        assert_eq!(outcome.snapshot, vec![outcome.participant.clone()]);
        assert_eq!(
            room.sessions.resolve(&channel).await,
            Some(outcome.participant.id.clone())
        );
    }

    #[tokio::test]
    async fn test_join_broadcasts_to_others_only() {
        // テスト項目: participant-joined は他の参加者にだけ届き、本人には届かない
        // given (前提条件):
        let room = TestRoom::new();
        let usecase = create_usecase(&room);
        let (alice_channel, mut alice_inbox) = room.connect().await;
        let (bob_channel, mut bob_inbox) = room.connect().await;
        usecase.execute(&alice_channel, "alice").await.unwrap();

        // when (操作):
        let bob = usecase.execute(&bob_channel, "bob").await.unwrap();

        // then (期待する結果):
        assert_eq!(
            alice_inbox.drain(),
            vec![ServerMessage::ParticipantJoined {
                id: bob.participant.id.as_str().to_string(),
                display_name: "bob".to_string(),
            }]
        );
        assert!(bob_inbox.drain().is_empty());
        assert_eq!(bob.snapshot.len(), 2);
    }

    #[tokio::test]
    async fn test_join_unjoined_channels_receive_nothing() {
        // テスト項目: まだ join していないチャンネルには participant-joined が届かない
        // given (前提条件):
        let room = TestRoom::new();
        let usecase = create_usecase(&room);
        let (_lurker_channel, mut lurker_inbox) = room.connect().await;
        let (alice_channel, _alice_inbox) = room.connect().await;

        // when (操作):
        usecase.execute(&alice_channel, "alice").await.unwrap();

        // then (期待する結果):
        assert!(lurker_inbox.drain().is_empty());
    }

    #[tokio::test]
    async fn test_join_twice_on_same_channel_is_idempotent() {
        // テスト項目: 同じチャンネルからの 2 回目の join は同じ ID と名前を返し、通知しない
        // given (前提条件):
        let room = TestRoom::new();
        let usecase = create_usecase(&room);
        let (alice_channel, _alice_inbox) = room.connect().await;
        let (bob_channel, mut bob_inbox) = room.connect().await;
        usecase.execute(&bob_channel, "bob").await.unwrap();
        let first = usecase.execute(&alice_channel, "alice").await.unwrap();
        bob_inbox.drain();

        // when (操作): 別の名前を指定しても既存の参加者が返る
        let second = usecase
            .execute(&alice_channel, "someone-else")
            .await
            .unwrap();

        // then (期待する結果):
        assert!(second.rejoined);
        assert_eq!(second.participant, first.participant);
        assert_eq!(room.participants.count().await, 2);
        assert!(bob_inbox.drain().is_empty());
    }

    #[tokio::test]
    async fn test_join_with_blank_name_fails() {
        // テスト項目: 空白のみの表示名は InvalidName になり、チャンネルは未参加のまま
        // given (前提条件):
        let room = TestRoom::new();
        let usecase = create_usecase(&room);
        let (channel, _inbox) = room.connect().await;

        // when (操作):
        let result = usecase.execute(&channel, "   ").await;

        // then (期待する結果):
        assert_eq!(result, Err(ChatError::InvalidName));
        assert_eq!(room.sessions.resolve(&channel).await, None);
        assert_eq!(room.participants.count().await, 0);
    }

    #[tokio::test]
    async fn test_join_with_taken_name_fails() {
        // テスト項目: 使用中の表示名（前後の空白は無視）は NameTaken になる
        // given (前提条件):
        let room = TestRoom::new();
        let usecase = create_usecase(&room);
        let (alice_channel, mut alice_inbox) = room.connect().await;
        let (other_channel, _other_inbox) = room.connect().await;
        usecase.execute(&alice_channel, "alice").await.unwrap();

        // when (操作):
        let result = usecase.execute(&other_channel, " alice").await;

        // then (期待する結果):
        assert_eq!(result, Err(ChatError::NameTaken("alice".to_string())));
        assert_eq!(room.sessions.resolve(&other_channel).await, None);
        assert!(alice_inbox.drain().is_empty());
    }

    #[tokio::test]
    async fn test_join_failure_pushes_nothing() {
        // テスト項目: 失敗した join は一切のイベントを送信しない
        // given (前提条件):
        let room = TestRoom::new();
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().times(0);
        pusher.expect_push_to().times(0);
        let usecase = JoinParticipantUseCase::new(
            room.participants.clone(),
            room.sessions.clone(),
            Arc::new(pusher),
        );

        // when (操作):
        let result = usecase.execute(&ChannelIdFactory::generate(), "").await;

        // then (期待する結果):
        assert_eq!(result, Err(ChatError::InvalidName));
    }
}
