//! UseCase: サーバー状態取得

use std::sync::Arc;

use rendezvous_shared::time::{Clock, elapsed_seconds};

use crate::domain::{RoomRepository, Timestamp};

/// Snapshot reported by the health endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerStatus {
    pub room_count: usize,
    /// Seconds since the server started
    pub uptime_seconds: f64,
}

/// サーバー状態取得のユースケース
pub struct GetServerStatusUseCase {
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
    started_at: Timestamp,
}

impl GetServerStatusUseCase {
    /// `started_at` is taken from `clock` at construction.
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        let started_at = Timestamp::new(clock.now_millis());
        Self {
            repository,
            clock,
            started_at,
        }
    }

    pub async fn execute(&self) -> ServerStatus {
        ServerStatus {
            room_count: self.repository.count_rooms().await,
            uptime_seconds: elapsed_seconds(self.started_at.value(), self.clock.now_millis()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockRoomRepository;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Clock that advances by a fixed step each time it is read
    struct SteppingClock {
        now: AtomicI64,
        step: i64,
    }

    impl Clock for SteppingClock {
        fn now_millis(&self) -> i64 {
            self.now.fetch_add(self.step, Ordering::SeqCst)
        }
    }

    #[tokio::test]
    async fn test_status_reports_room_count_and_uptime() {
        // テスト項目: Room 数と起動からの経過秒数が返される
        // given (前提条件):
        let mut repository = MockRoomRepository::new();
        repository.expect_count_rooms().times(1).returning(|| 3);
        let clock = Arc::new(SteppingClock {
            now: AtomicI64::new(10_000),
            step: 1_500,
        });
        let usecase = GetServerStatusUseCase::new(Arc::new(repository), clock);

        // when (操作):
        let status = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(
            status,
            ServerStatus {
                room_count: 3,
                uptime_seconds: 1.5,
            }
        );
    }
}
