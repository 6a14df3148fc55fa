//! UseCase: Room 一覧取得

use std::sync::Arc;

use crate::domain::{Room, RoomRepository};

/// Room 一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// Rooms currently held, ordered by id
    pub async fn execute(&self) -> Vec<Room> {
        self.repository.get_rooms().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{PeerId, RoomId},
        infrastructure::repository::InMemoryRoomRepository,
    };
    use rendezvous_shared::time::FixedClock;

    #[tokio::test]
    async fn test_get_rooms_lists_populated_rooms() {
        // テスト項目: メンバーのいる Room だけが ID 順に返される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new(Arc::new(FixedClock::new(0))));
        let alice = PeerId::generate();
        let bob = PeerId::generate();
        repository
            .join(RoomId::new("r2".to_string()).unwrap(), alice)
            .await
            .unwrap();
        repository
            .join(RoomId::new("r1".to_string()).unwrap(), bob)
            .await
            .unwrap();
        repository
            .leave(&RoomId::new("r2".to_string()).unwrap(), &alice)
            .await;
        let usecase = GetRoomsUseCase::new(repository);

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id.as_str(), "r1");
        assert_eq!(rooms[0].members, vec![bob]);
    }
}
