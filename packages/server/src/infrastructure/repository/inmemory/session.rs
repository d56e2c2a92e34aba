//! InMemory Session Repository 実装
//!
//! チャンネル ID から参加者 ID への対応表。
//! 参加者の状態をトランスポートのオブジェクトに持たせず、このサイドテーブルで管理します。

use std::collections::{HashMap, hash_map::Entry};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChannelId, ParticipantId, SessionRepository};

/// インメモリ Session Repository 実装
#[derive(Default)]
pub struct InMemorySessionRepository {
    /// Key: チャンネル ID, Value: 参加者 ID
    bindings: Mutex<HashMap<ChannelId, ParticipantId>>,
}

impl InMemorySessionRepository {
    /// 空の InMemorySessionRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn bind(&self, channel: ChannelId, id: ParticipantId) -> Option<ParticipantId> {
        let mut bindings = self.bindings.lock().await;
        match bindings.entry(channel) {
            Entry::Occupied(entry) => Some(entry.get().clone()),
            Entry::Vacant(entry) => {
                entry.insert(id);
                None
            }
        }
    }

    async fn resolve(&self, channel: &ChannelId) -> Option<ParticipantId> {
        let bindings = self.bindings.lock().await;
        bindings.get(channel).cloned()
    }

    async fn unbind(&self, channel: &ChannelId) -> Option<ParticipantId> {
        let mut bindings = self.bindings.lock().await;
        bindings.remove(channel)
    }
}
