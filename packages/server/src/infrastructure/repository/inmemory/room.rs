//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! 全ての操作は単一の Mutex で直列化されるため、同じ Room への
//! 同時 join が両方とも initiator になることはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use rendezvous_shared::time::Clock;

use crate::domain::{
    JoinOutcome, LeaveOutcome, PeerId, RepositoryError, Room, RoomError, RoomId, RoomRepository,
    Timestamp,
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// room_id -> Room（メンバーが1人以上いる Room のみ）
    rooms: Mutex<HashMap<RoomId, Room>>,
    /// Room 作成時刻の取得に使う時計
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            clock,
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn join(&self, room_id: RoomId, peer_id: PeerId) -> Result<JoinOutcome, RepositoryError> {
        let mut rooms = self.rooms.lock().await;

        let room = rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::new(room_id, Timestamp::new(self.clock.now_millis())));

        room.admit(peer_id).map_err(|e| match e {
            RoomError::AlreadyMember(peer_id) => RepositoryError::PeerAlreadyJoined {
                room_id: room.id.as_str().to_string(),
                peer_id,
            },
        })
    }

    async fn leave(&self, room_id: &RoomId, peer_id: &PeerId) -> LeaveOutcome {
        let mut rooms = self.rooms.lock().await;

        let Some(room) = rooms.get_mut(room_id) else {
            return LeaveOutcome::default();
        };

        let was_member = room.remove(peer_id);
        let remaining_size = room.size();
        let remaining = room.members.clone();

        let room_deleted = room.is_empty();
        if room_deleted {
            rooms.remove(room_id);
        }

        LeaveOutcome {
            was_member,
            remaining_size,
            room_deleted,
            remaining,
        }
    }

    async fn members(&self, room_id: &RoomId) -> Vec<PeerId> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .map(|room| room.members.clone())
            .unwrap_or_default()
    }

    async fn count_rooms(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }

    async fn get_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        let mut result: Vec<Room> = rooms.values().cloned().collect();
        result.sort_by(|a, b| a.id.cmp(&b.id));
        result
    }
}
