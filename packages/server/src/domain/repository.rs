//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ChannelId, DisplayName, Participant, ParticipantId, RegistryError};

/// Participant Registry trait
///
/// 接続中の参加者の一覧を保持する唯一の情報源。
/// 全ての更新操作（register, rename, remove）は他の操作に対してアトミックでなければならない。
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// 参加者を登録する
    ///
    /// 表示名の重複チェックと追加は 1 つのアトミックな操作として行われる。
    /// 新しい ID はこのメソッドの中で採番される。
    async fn register(
        &self,
        display_name: DisplayName,
        channel: ChannelId,
    ) -> Result<Participant, RegistryError>;

    /// 表示名を変更する
    ///
    /// 自分自身の現在の名前への変更も `NameTaken` になる。
    async fn rename(&self, id: &ParticipantId, new_name: DisplayName)
    -> Result<(), RegistryError>;

    /// 参加者を削除する（冪等）
    async fn remove(&self, id: &ParticipantId) -> Option<Participant>;

    /// 指定チャンネルで登録された参加者を削除する（冪等）
    ///
    /// 登録後、チャンネルの紐づけ前に中断された join の後始末に使う。
    async fn remove_by_channel(&self, channel: &ChannelId) -> Option<Participant>;

    /// ID で参加者を検索する
    async fn lookup(&self, id: &ParticipantId) -> Option<Participant>;

    /// 表示名が使用中かどうか
    async fn is_name_taken(&self, name: &DisplayName) -> bool;

    /// 呼び出し時点の全参加者（表示名順）
    async fn snapshot(&self) -> Vec<Participant>;

    /// 参加者数
    async fn count(&self) -> usize;
}

/// Session Binding trait
///
/// チャンネルと参加者 ID の対応表。1 つのチャンネルは生存期間中に高々 1 人の参加者に紐づく。
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// チャンネルを参加者に紐づける
    ///
    /// 既に紐づいている場合は何も変更せず、既存の参加者 ID を返す。
    async fn bind(&self, channel: ChannelId, id: ParticipantId) -> Option<ParticipantId>;

    /// チャンネルに紐づく参加者 ID を取得する
    async fn resolve(&self, channel: &ChannelId) -> Option<ParticipantId>;

    /// 紐づけを解除し、解除前の参加者 ID を返す（2 回目以降は None）
    async fn unbind(&self, channel: &ChannelId) -> Option<ParticipantId>;
}
