//! Serialization point for room mutations.

use tokio::sync::{Mutex, MutexGuard};

/// Process-wide gate held across a registry operation and the notifications
/// it triggers.
///
/// While the gate is held, membership cannot change between the snapshot a
/// broadcast is computed from and the moment the messages are enqueued.
/// Enqueueing never waits on the network, so the gate is held only briefly.
#[derive(Debug, Default)]
pub struct RoomGate {
    lock: Mutex<()>,
}

impl RoomGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}
