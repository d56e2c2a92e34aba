//! UseCase テスト用の共通セットアップ

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::{ChannelId, ChannelIdFactory, MessagePusher},
    infrastructure::{
        dto::websocket::ServerMessage,
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryParticipantRepository, InMemorySessionRepository},
    },
};

/// 実際のインメモリ実装で組み立てた部屋
pub(crate) struct TestRoom {
    pub participants: Arc<InMemoryParticipantRepository>,
    pub sessions: Arc<InMemorySessionRepository>,
    pub pusher: Arc<WebSocketMessagePusher>,
}

impl TestRoom {
    pub fn new() -> Self {
        Self {
            participants: Arc::new(InMemoryParticipantRepository::new()),
            sessions: Arc::new(InMemorySessionRepository::new()),
            pusher: Arc::new(WebSocketMessagePusher::default()),
        }
    }

    /// 新しいチャンネルを接続し、その受信キューを返す
    pub async fn connect(&self) -> (ChannelId, TestInbox) {
        let (tx, rx) = mpsc::unbounded_channel();
        let channel = ChannelIdFactory::generate();
        self.pusher.register_channel(channel.clone(), tx).await;
        (channel, TestInbox { rx })
    }
}

/// チャンネルに届いたメッセージを読み出す
pub(crate) struct TestInbox {
    rx: mpsc::UnboundedReceiver<String>,
}

impl TestInbox {
    /// 既に届いているメッセージを全て取り出す
    pub fn drain(&mut self) -> Vec<ServerMessage> {
        let mut messages = Vec::new();
        while let Ok(json) = self.rx.try_recv() {
            messages.push(serde_json::from_str(&json).expect("pushed JSON should parse"));
        }
        messages
    }
}
