//! UseCase: Room ID の発行

use crate::domain::{RoomId, RoomIdFactory, ValueObjectError};

/// A freshly issued room id and the link peers open to join it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedRoom {
    pub room_id: RoomId,
    pub join_url: String,
}

/// Room ID 発行のユースケース
///
/// The id is only a reserved token: the registry creates the room on the
/// first join, so no empty room entry is ever stored.
pub struct CreateRoomUseCase {
    /// Frontend page the join link points at
    frontend_url: String,
}

impl CreateRoomUseCase {
    pub fn new(frontend_url: String) -> Self {
        Self { frontend_url }
    }

    pub fn execute(&self) -> Result<IssuedRoom, ValueObjectError> {
        let room_id = RoomIdFactory::generate()?;
        let separator = if self.frontend_url.contains('?') { '&' } else { '?' };
        let join_url = format!("{}{}room={}", self.frontend_url, separator, room_id);

        tracing::info!("Issued room id {}", room_id);
        Ok(IssuedRoom { room_id, join_url })
    }
}
