//! UseCase: 部屋のスナップショット取得

use std::sync::Arc;

use crate::domain::{Participant, ParticipantRepository};

/// 部屋のスナップショット取得のユースケース
pub struct GetRoomSnapshotUseCase {
    participant_repository: Arc<dyn ParticipantRepository>,
}

impl GetRoomSnapshotUseCase {
    /// 新しい GetRoomSnapshotUseCase を作成
    pub fn new(participant_repository: Arc<dyn ParticipantRepository>) -> Self {
        Self {
            participant_repository,
        }
    }

    /// 現在の参加者一覧（表示名順）を取得
    pub async fn execute(&self) -> Vec<Participant> {
        self.participant_repository.snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ChannelIdFactory, DisplayName},
        infrastructure::repository::InMemoryParticipantRepository,
    };

    #[tokio::test]
    async fn test_snapshot_lists_current_participants() {
        // テスト項目: 現在の参加者一覧が取得できる
        // given (前提条件):
        let repository = Arc::new(InMemoryParticipantRepository::new());
        for name in ["bob", "alice"] {
            repository
                .register(DisplayName::new(name).unwrap(), ChannelIdFactory::generate())
                .await
                .unwrap();
        }
        let usecase = GetRoomSnapshotUseCase::new(repository);

        // when (操作):
        let snapshot = usecase.execute().await;

        // then (期待する結果):
        let names: Vec<&str> = snapshot.iter().map(|p| p.display_name.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }
}
