//! MessagePusher trait 定義
//!
//! 接続中のピアへメッセージを届けるためのインターフェース。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, OutboundMessage, PeerId};

/// Outbound channel of one connection; the socket task drains it.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Delivers outbound messages to connected peers.
///
/// Pushing only enqueues onto the peer's channel and never waits on the
/// network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register a new connection in the `Open` state.
    async fn register_client(&self, peer_id: PeerId, sender: PusherChannel);

    /// Move a connection to `Closing`; it receives nothing from now on.
    async fn mark_closing(&self, peer_id: &PeerId);

    /// Forget a connection (`Closed`).
    async fn unregister_client(&self, peer_id: &PeerId);

    /// Send one message to one peer.
    async fn push_to(
        &self,
        peer_id: &PeerId,
        message: &OutboundMessage,
    ) -> Result<(), MessagePushError>;

    /// Best-effort delivery to every target that is `Open`.
    ///
    /// Individual failures are skipped and not retried. Returns how many
    /// peers the message was handed to.
    async fn broadcast(
        &self,
        targets: Vec<PeerId>,
        message: &OutboundMessage,
    ) -> Result<usize, MessagePushError>;
}
