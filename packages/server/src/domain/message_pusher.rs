//! MessagePusher trait 定義
//!
//! 接続中のチャンネルへイベントを送り出すためのインターフェース。
//! 送信はベストエフォートで、再送やバックプレッシャーはトランスポート側の責務。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ChannelId, MessagePushError, RoomEvent};

/// チャンネルごとの送信キュー（WebSocket の送信タスクが受信側を持つ）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// チャンネルを送信先として登録する
    async fn register_channel(&self, channel: ChannelId, sender: PusherChannel);

    /// チャンネルの登録を解除する
    async fn unregister_channel(&self, channel: &ChannelId);

    /// 特定のチャンネルにイベントを送信する
    async fn push_to(&self, channel: &ChannelId, event: &RoomEvent)
    -> Result<(), MessagePushError>;

    /// 複数のチャンネルにイベントを送信する（一部の送信失敗は許容）
    async fn broadcast(
        &self,
        targets: Vec<ChannelId>,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;
}
