//! Identity generation.
//!
//! Identities are random version-4 UUIDs drawn from the operating system's
//! CSPRNG and rendered as 32 lowercase hex characters. They are neither
//! sequential nor derived from the clock.

use uuid::Uuid;

use super::value_object::{ChannelId, ParticipantId};

fn random_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Factory for participant identities
pub struct ParticipantIdFactory;

impl ParticipantIdFactory {
    pub fn generate() -> ParticipantId {
        ParticipantId(random_token())
    }
}

/// Factory for channel identities
pub struct ChannelIdFactory;

impl ChannelIdFactory {
    pub fn generate() -> ChannelId {
        ChannelId(random_token())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_generated_participant_id_has_fixed_length() {
        // テスト項目: 生成された参加者 ID は 32 文字の 16 進数になる
        // given (前提条件):

        // when (操作):
        let id = ParticipantIdFactory::generate();

        // then (期待する結果):
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        // テスト項目: 大量に生成しても ID が重複しない
        // given (前提条件):
        let count = 10_000;

        // when (操作):
        let ids: HashSet<String> = (0..count)
            .map(|_| ParticipantIdFactory::generate().into_string())
            .collect();

        // then (期待する結果):
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_generated_channel_ids_are_unique() {
        // テスト項目: チャンネル ID も一意に生成される
        // given (前提条件):
        let first = ChannelIdFactory::generate();

        // when (操作):
        let second = ChannelIdFactory::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }
}
