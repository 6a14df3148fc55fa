//! UseCase: ピア切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectPeerUseCase::execute() メソッド
//! - 切断時の Room からの退出と peer-left 通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーが残る Room からの切断（残りのメンバーに通知）
//! - エッジケース：最後のメンバーの切断（Room 削除、通知なし）
//! - エッジケース：未入室のままの切断

use std::sync::Arc;

use crate::domain::{LeaveOutcome, MessagePusher, OutboundMessage, PeerId, RoomId, RoomRepository};

use super::gate::RoomGate;

/// ピア切断のユースケース
pub struct DisconnectPeerUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    gate: Arc<RoomGate>,
}

impl DisconnectPeerUseCase {
    /// 新しい DisconnectPeerUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        gate: Arc<RoomGate>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            gate,
        }
    }

    /// 切断を実行
    ///
    /// Runs for graceful closes and transport errors alike.
    ///
    /// # Arguments
    ///
    /// * `peer_id` - 切断するピアの ID
    /// * `joined_room` - 入室していた Room（未入室なら `None`）
    ///
    /// # Returns
    ///
    /// Room から退出した場合はその結果、未入室なら `None`
    pub async fn execute(&self, peer_id: PeerId, joined_room: Option<RoomId>) -> Option<LeaveOutcome> {
        self.message_pusher.mark_closing(&peer_id).await;

        let outcome = match joined_room {
            Some(room_id) => Some(self.leave_room(peer_id, &room_id).await),
            None => None,
        };

        self.message_pusher.unregister_client(&peer_id).await;
        outcome
    }

    async fn leave_room(&self, peer_id: PeerId, room_id: &RoomId) -> LeaveOutcome {
        let _gate = self.gate.enter().await;

        let outcome = self.repository.leave(room_id, &peer_id).await;
        tracing::info!(
            "Peer {} left room {}. Room size: {}",
            peer_id,
            room_id,
            outcome.remaining_size
        );

        if outcome.room_deleted {
            tracing::info!("Room {} deleted (empty)", room_id);
        } else if outcome.was_member {
            match self
                .message_pusher
                .broadcast(outcome.remaining.clone(), &OutboundMessage::PeerLeft)
                .await
            {
                Ok(sent_count) => tracing::info!(
                    "Broadcasted peer-left to {} clients in room {}",
                    sent_count,
                    room_id
                ),
                Err(e) => tracing::warn!("Failed to broadcast peer-left: {}", e),
            }
        }

        outcome
    }
}
