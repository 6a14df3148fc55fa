//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{JoinOutcome, LeaveOutcome, PeerId, RepositoryError, Room, RoomId};

/// Room Registry trait
///
/// Process-wide mapping from room id to the peers currently joined to it.
/// Every method is atomic with respect to the others: no two joins to the
/// same room can both observe an empty room.
///
/// A room entry exists only while it has at least one member.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Admit `peer_id` to `room_id`, creating the room if absent.
    async fn join(&self, room_id: RoomId, peer_id: PeerId) -> Result<JoinOutcome, RepositoryError>;

    /// Remove `peer_id` from `room_id`; deletes the room when it becomes empty.
    ///
    /// Unknown rooms and non-members are a no-op.
    async fn leave(&self, room_id: &RoomId, peer_id: &PeerId) -> LeaveOutcome;

    /// Snapshot of the current members; empty for an unknown room.
    async fn members(&self, room_id: &RoomId) -> Vec<PeerId>;

    /// Number of rooms currently held
    async fn count_rooms(&self) -> usize;

    /// All rooms, ordered by id
    async fn get_rooms(&self) -> Vec<Room>;
}
