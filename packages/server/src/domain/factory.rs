//! Factories for server-issued identifiers.

use uuid::Uuid;

use super::{error::ValueObjectError, value_object::RoomId};

/// Issues fresh room identifiers for the HTTP room-creation endpoint.
pub struct RoomIdFactory;

impl RoomIdFactory {
    /// Generate a random room id (32 lowercase hex characters).
    pub fn generate() -> Result<RoomId, ValueObjectError> {
        RoomId::new(Uuid::new_v4().simple().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_room_id_format() {
        // テスト項目: 生成された RoomId は 32 文字の16進小文字
        // given (前提条件):

        // when (操作):
        let room_id = RoomIdFactory::generate().unwrap();

        // then (期待する結果):
        assert_eq!(room_id.as_str().len(), 32);
        assert!(
            room_id
                .as_str()
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_generate_room_id_is_unique() {
        // テスト項目: 連続して生成した RoomId が重複しない
        // given (前提条件):

        // when (操作):
        let first = RoomIdFactory::generate().unwrap();
        let second = RoomIdFactory::generate().unwrap();

        // then (期待する結果):
        assert_ne!(first, second);
    }
}
