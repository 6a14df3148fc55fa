//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - ピアごとの `UnboundedSender` と接続状態（Open / Closing）を管理
//! - ドメインのメッセージをワイヤ形式にエンコードして送信（push_to, broadcast）
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionState, MessagePushError, MessagePusher, OutboundMessage, PeerId, PusherChannel},
    infrastructure::dto::conversion::encode_outbound,
};

/// Registered connection
struct PusherEntry {
    sender: PusherChannel,
    state: ConnectionState,
}

impl PusherEntry {
    /// `Open` only while registered as open and the socket task still drains the channel.
    fn effective_state(&self) -> ConnectionState {
        match self.state {
            ConnectionState::Open if self.sender.is_closed() => ConnectionState::Closed,
            state => state,
        }
    }
}

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// peer_id -> 接続中のピアの sender と状態
    clients: Mutex<HashMap<PeerId, PusherEntry>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// Liveness of a connection; unknown peers are `Closed`.
    #[cfg(test)]
    pub(crate) async fn connection_state(&self, peer_id: &PeerId) -> ConnectionState {
        let clients = self.clients.lock().await;
        clients
            .get(peer_id)
            .map_or(ConnectionState::Closed, PusherEntry::effective_state)
    }
}

fn encode(message: &OutboundMessage) -> Result<String, MessagePushError> {
    encode_outbound(message).map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, peer_id: PeerId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(
            peer_id,
            PusherEntry {
                sender,
                state: ConnectionState::Open,
            },
        );
        tracing::debug!("Peer {} registered to MessagePusher", peer_id);
    }

    async fn mark_closing(&self, peer_id: &PeerId) {
        let mut clients = self.clients.lock().await;
        if let Some(entry) = clients.get_mut(peer_id) {
            entry.state = ConnectionState::Closing;
        }
    }

    async fn unregister_client(&self, peer_id: &PeerId) {
        let mut clients = self.clients.lock().await;
        clients.remove(peer_id);
        tracing::debug!("Peer {} unregistered from MessagePusher", peer_id);
    }

    async fn push_to(
        &self,
        peer_id: &PeerId,
        message: &OutboundMessage,
    ) -> Result<(), MessagePushError> {
        let content = encode(message)?;
        let clients = self.clients.lock().await;

        let entry = clients
            .get(peer_id)
            .ok_or(MessagePushError::ClientNotFound(*peer_id))?;
        if entry.effective_state() != ConnectionState::Open {
            return Err(MessagePushError::NotOpen(*peer_id));
        }

        entry
            .sender
            .send(content)
            .map_err(|_| MessagePushError::NotOpen(*peer_id))?;
        tracing::debug!("Pushed {} to peer {}", message.type_name(), peer_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<PeerId>,
        message: &OutboundMessage,
    ) -> Result<usize, MessagePushError> {
        let content = encode(message)?;
        let clients = self.clients.lock().await;

        let mut sent_count = 0;
        for target in targets {
            let Some(entry) = clients.get(&target) else {
                tracing::warn!("Peer {} not found during broadcast, skipping", target);
                continue;
            };
            if entry.effective_state() != ConnectionState::Open {
                tracing::debug!("Peer {} is not open, skipping", target);
                continue;
            }
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = entry.sender.send(content.clone()) {
                tracing::warn!("Failed to push message to peer {}: {}", target, e);
            } else {
                sent_count += 1;
            }
        }

        Ok(sent_count)
    }
}
