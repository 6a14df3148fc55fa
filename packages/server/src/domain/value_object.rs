//! Value objects.

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// Opaque room identifier supplied by clients or issued over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    /// Any non-empty string is a valid room id.
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyRoomId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of one WebSocket connection.
///
/// Allocated by the server on connect; two connections never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeerId(Uuid);

impl PeerId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_accepts_opaque_token() {
        // テスト項目: 任意の非空文字列を RoomId として受け付ける
        // given (前提条件):
        let raw = "r1 / ルーム?&".to_string();

        // when (操作):
        let result = RoomId::new(raw.clone());

        // then (期待する結果):
        assert_eq!(result.map(RoomId::into_string), Ok(raw));
    }

    #[test]
    fn test_room_id_rejects_empty() {
        // テスト項目: 空文字列の RoomId はエラーになる
        // given (前提条件):
        let raw = String::new();

        // when (操作):
        let result = RoomId::try_from(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyRoomId));
    }

    #[test]
    fn test_room_id_accepts_long_token() {
        // テスト項目: 長い RoomId も長さ制限なく受け付ける
        // given (前提条件):
        let raw = "a".repeat(4096);

        // when (操作):
        let result = RoomId::new(raw.clone());

        // then (期待する結果):
        assert_eq!(result.map(RoomId::into_string), Ok(raw));
    }

    #[test]
    fn test_peer_ids_are_unique() {
        // テスト項目: 生成される PeerId は毎回異なる
        // given (前提条件):

        // when (操作):
        let first = PeerId::generate();
        let second = PeerId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }
}
