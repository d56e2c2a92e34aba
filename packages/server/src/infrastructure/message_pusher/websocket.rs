//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - チャンネルごとの送信キュー（`UnboundedSender`）を管理
//! - ドメインイベントを JSON に変換して送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 1 つのチャンネルへの送信は必ず同じキューを通るため、受信側から見た順序は送信順と一致します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ChannelId, MessagePushError, MessagePusher, PusherChannel, RoomEvent},
    infrastructure::dto::websocket::ServerMessage,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new(Arc::new(Mutex::new(HashMap::new())));
/// pusher.register_channel(channel.clone(), tx).await;
/// pusher.push_to(&channel, &event).await?;
/// ```
pub struct WebSocketMessagePusher {
    /// 接続中のチャンネルの送信キュー
    ///
    /// Key: チャンネル ID
    /// Value: PusherChannel
    channels: Arc<Mutex<HashMap<ChannelId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(channels: Arc<Mutex<HashMap<ChannelId, PusherChannel>>>) -> Self {
        Self { channels }
    }

    fn encode(event: &RoomEvent) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerMessage::from(event))
            .map_err(|e| MessagePushError::Serialization(e.to_string()))
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_channel(&self, channel: ChannelId, sender: PusherChannel) {
        let mut channels = self.channels.lock().await;
        tracing::debug!("Channel '{}' registered to MessagePusher", channel);
        channels.insert(channel, sender);
    }

    async fn unregister_channel(&self, channel: &ChannelId) {
        let mut channels = self.channels.lock().await;
        channels.remove(channel);
        tracing::debug!("Channel '{}' unregistered from MessagePusher", channel);
    }

    async fn push_to(
        &self,
        channel: &ChannelId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;
        let channels = self.channels.lock().await;

        if let Some(sender) = channels.get(channel) {
            sender
                .send(content)
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed {} to channel '{}'", event.name(), channel);
            Ok(())
        } else {
            Err(MessagePushError::ChannelNotFound(channel.as_str().to_string()))
        }
    }

    async fn broadcast(
        &self,
        targets: Vec<ChannelId>,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;
        let channels = self.channels.lock().await;

        for target in targets {
            if let Some(sender) = channels.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.clone()) {
                    tracing::warn!("Failed to push {} to channel '{}': {}", event.name(), target, e);
                } else {
                    tracing::debug!("Broadcasted {} to channel '{}'", event.name(), target);
                }
            } else {
                tracing::warn!("Channel '{}' not found during broadcast, skipping", target);
            }
        }

        Ok(())
    }
}
