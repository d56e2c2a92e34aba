//! InMemory Participant Repository 実装
//!
//! ドメイン層が定義する ParticipantRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用し、1 つの Mutex で全操作を直列化します。
//! 重複チェックと追加・変更は同じロックの中で行うため、同名の同時登録は片方しか成功しません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChannelId, DisplayName, Participant, ParticipantId, ParticipantIdFactory,
    ParticipantRepository, RegistryError,
};

/// インメモリ Participant Repository 実装
#[derive(Default)]
pub struct InMemoryParticipantRepository {
    /// Key: 参加者 ID, Value: 参加者
    participants: Mutex<HashMap<ParticipantId, Participant>>,
}

impl InMemoryParticipantRepository {
    /// 空の InMemoryParticipantRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_name_used(participants: &HashMap<ParticipantId, Participant>, name: &DisplayName) -> bool {
    participants.values().any(|p| &p.display_name == name)
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn register(
        &self,
        display_name: DisplayName,
        channel: ChannelId,
    ) -> Result<Participant, RegistryError> {
        let mut participants = self.participants.lock().await;

        if is_name_used(&participants, &display_name) {
            return Err(RegistryError::NameTaken(display_name.into_string()));
        }

        // UUID v4 の衝突は現実的には起きないが、採番と挿入は同じロック内で確認する
        let id = loop {
            let candidate = ParticipantIdFactory::generate();
            if !participants.contains_key(&candidate) {
                break candidate;
            }
            tracing::warn!("Participant ID collision on '{}', drawing again", candidate);
        };

        let participant = Participant::new(id.clone(), display_name, channel);
        participants.insert(id, participant.clone());
        tracing::debug!(
            "Participant '{}' registered as '{}'",
            participant.id,
            participant.display_name
        );

        Ok(participant)
    }

    async fn rename(
        &self,
        id: &ParticipantId,
        new_name: DisplayName,
    ) -> Result<(), RegistryError> {
        let mut participants = self.participants.lock().await;

        if !participants.contains_key(id) {
            return Err(RegistryError::UnknownParticipant(id.as_str().to_string()));
        }
        if is_name_used(&participants, &new_name) {
            return Err(RegistryError::NameTaken(new_name.into_string()));
        }

        if let Some(participant) = participants.get_mut(id) {
            participant.rename(new_name);
        }
        Ok(())
    }

    async fn remove(&self, id: &ParticipantId) -> Option<Participant> {
        let mut participants = self.participants.lock().await;
        participants.remove(id)
    }

    async fn remove_by_channel(&self, channel: &ChannelId) -> Option<Participant> {
        let mut participants = self.participants.lock().await;
        let id = participants
            .values()
            .find(|p| &p.channel == channel)
            .map(|p| p.id.clone())?;
        participants.remove(&id)
    }

    async fn lookup(&self, id: &ParticipantId) -> Option<Participant> {
        let participants = self.participants.lock().await;
        participants.get(id).cloned()
    }

    async fn is_name_taken(&self, name: &DisplayName) -> bool {
        let participants = self.participants.lock().await;
        is_name_used(&participants, name)
    }

    async fn snapshot(&self) -> Vec<Participant> {
        let participants = self.participants.lock().await;
        let mut snapshot: Vec<Participant> = participants.values().cloned().collect();

        // Sort for consistent enumeration
        snapshot.sort_by(|a, b| {
            a.display_name
                .cmp(&b.display_name)
                .then_with(|| a.id.cmp(&b.id))
        });

        snapshot
    }

    async fn count(&self) -> usize {
        let participants = self.participants.lock().await;
        participants.len()
    }
}
