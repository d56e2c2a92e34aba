//! UseCase 層のエラー定義
//!
//! 全てのエラーはリクエスト単位で回復可能です。失敗したリクエストを送ったチャンネルだけが
//! エラーを受け取り、そのチャンネルの状態も他のチャンネルも変化しません。

use thiserror::Error;

use crate::domain::RegistryError;

/// Router の操作が返すエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// 空または空白のみの表示名
    #[error("Enter a display name.")]
    InvalidName,

    /// 表示名が他の参加者と重複
    #[error("The name '{0}' is already taken in this room, choose another one.")]
    NameTaken(String),

    /// 参加者に紐づいていないチャンネルからの操作
    #[error("Join the chat first.")]
    UnresolvedIdentity,

    /// プライベートメッセージの宛先が部屋にいない
    #[error("The selected recipient is not in the room.")]
    RecipientNotFound,

    /// 空または空白のみのメッセージ本文
    #[error("Enter the message text.")]
    EmptyMessage,

    /// 必須フィールドの欠落、解釈できないフレームなど
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

impl From<RegistryError> for ChatError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::NameTaken(name) => ChatError::NameTaken(name),
            // Registry から消えた参加者のチャンネルは、もう誰にも紐づいていないのと同じ
            RegistryError::UnknownParticipant(_) => ChatError::UnresolvedIdentity,
        }
    }
}
