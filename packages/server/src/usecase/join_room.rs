//! UseCase: Room 入室処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - initiator の割り当てと ready 通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：空の Room への入室、既存メンバーがいる Room への入室
//! - エッジケース：同時入室、自分への ready 送信の失敗

use std::sync::Arc;

use crate::domain::{JoinOutcome, MessagePusher, OutboundMessage, PeerId, RoomId, RoomRepository};

use super::{error::SignalingError, gate::RoomGate};

/// Room 入室のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    gate: Arc<RoomGate>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
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

    /// 入室を実行
    ///
    /// Sends `ready{initiator, roomSize}` to the joiner and, when the room
    /// already had members, `ready{initiator: false, roomSize}` to each of
    /// them. Admission and both notifications happen under the room gate.
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome)` - 入室成功
    /// * `Err(SignalingError::Repository)` - 同じ Room への二重入室
    pub async fn execute(
        &self,
        peer_id: PeerId,
        room_id: RoomId,
    ) -> Result<JoinOutcome, SignalingError> {
        let _gate = self.gate.enter().await;

        let outcome = self.repository.join(room_id.clone(), peer_id).await?;
        tracing::info!(
            "Peer {} joined room {}. Room size: {}, Initiator: {}",
            peer_id,
            room_id,
            outcome.room_size,
            outcome.is_initiator
        );

        let ready = OutboundMessage::Ready {
            initiator: outcome.is_initiator,
            room_size: outcome.room_size,
        };
        if let Err(e) = self.message_pusher.push_to(&peer_id, &ready).await {
            tracing::warn!("Failed to send ready to peer {}: {}", peer_id, e);
        }

        if outcome.room_size > 1 {
            let notify = OutboundMessage::Ready {
                initiator: false,
                room_size: outcome.room_size,
            };
            match self
                .message_pusher
                .broadcast(outcome.others.clone(), &notify)
                .await
            {
                Ok(sent_count) => tracing::info!(
                    "Notified {} other peers in room {}",
                    sent_count,
                    room_id
                ),
                Err(e) => tracing::warn!("Failed to notify peers in room {}: {}", room_id, e),
            }
        }

        Ok(outcome)
    }
}
