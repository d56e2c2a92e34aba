//! UseCase 層
//!
//! Message Router の各操作を 1 つのユースケースとして実装します。
//! 各ユースケースは入力を検証してから状態を変更し、途中まで適用された状態を残しません。

mod disconnect_participant;
mod error;
mod get_room_snapshot;
mod join_participant;
mod rename_participant;
mod send_private_message;
mod send_public_message;

#[cfg(test)]
pub(crate) mod testing;

pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::ChatError;
pub use get_room_snapshot::GetRoomSnapshotUseCase;
pub use join_participant::{JoinOutcome, JoinParticipantUseCase};
pub use rename_participant::RenameParticipantUseCase;
pub use send_private_message::SendPrivateMessageUseCase;
pub use send_public_message::SendPublicMessageUseCase;

use crate::domain::{ChannelId, Participant, ParticipantId};

/// 指定した参加者以外のチャンネル一覧
fn channels_except(participants: &[Participant], exclude: &ParticipantId) -> Vec<ChannelId> {
    participants
        .iter()
        .filter(|p| &p.id != exclude)
        .map(|p| p.channel.clone())
        .collect()
}

/// 全参加者のチャンネル一覧
fn all_channels(participants: &[Participant]) -> Vec<ChannelId> {
    participants.iter().map(|p| p.channel.clone()).collect()
}
