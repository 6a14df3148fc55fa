//! UseCase: ネゴシエーションメッセージ中継処理

use std::sync::Arc;

use crate::domain::{
    MessagePusher, NegotiationKind, OutboundMessage, PeerId, RawFrame, RoomId, RoomRepository,
};

use super::{error::SignalingError, gate::RoomGate};

/// offer / answer / ice-candidate 中継のユースケース
pub struct RelayMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    gate: Arc<RoomGate>,
}

impl RelayMessageUseCase {
    /// 新しい RelayMessageUseCase を作成
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

    /// Forward `frame` unchanged to every member of `room_id` except `sender`.
    ///
    /// # Returns
    ///
    /// The number of peers the frame was handed to.
    pub async fn execute(
        &self,
        sender: PeerId,
        room_id: &RoomId,
        kind: NegotiationKind,
        frame: RawFrame,
    ) -> Result<usize, SignalingError> {
        let _gate = self.gate.enter().await;

        let members = self.repository.members(room_id).await;
        if members.is_empty() {
            tracing::warn!("Room {} not found for broadcast", room_id);
            return Ok(0);
        }

        let targets: Vec<PeerId> = members
            .into_iter()
            .filter(|member| *member != sender)
            .collect();

        let sent_count = self
            .message_pusher
            .broadcast(targets, &OutboundMessage::Relay(frame))
            .await?;
        tracing::info!(
            "Broadcasted {} to {} clients in room {}",
            kind,
            sent_count,
            room_id
        );

        Ok(sent_count)
    }
}
