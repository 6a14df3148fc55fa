//! UseCase: ピア接続処理

use std::sync::Arc;

use crate::domain::{MessagePusher, PeerId, PusherChannel};

/// ピア接続のユースケース
pub struct ConnectPeerUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectPeerUseCase {
    /// 新しい ConnectPeerUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 新しい接続に PeerId を割り当て、送信チャンネルを登録する
    ///
    /// The connection starts `Unjoined`; no room is touched.
    pub async fn execute(&self, sender: PusherChannel) -> PeerId {
        let peer_id = PeerId::generate();
        self.message_pusher.register_client(peer_id, sender).await;
        peer_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::ConnectionState, infrastructure::message_pusher::WebSocketMessagePusher};

    #[tokio::test]
    async fn test_connect_registers_open_peer() {
        // テスト項目: 接続したピアが Open 状態で登録される
        // given (前提条件):
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = ConnectPeerUseCase::new(message_pusher.clone());
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();

        // when (操作):
        let peer_id = usecase.execute(tx).await;

        // then (期待する結果):
        assert_eq!(
            message_pusher.connection_state(&peer_id).await,
            ConnectionState::Open
        );
    }

    #[tokio::test]
    async fn test_connect_assigns_distinct_ids() {
        // テスト項目: 接続ごとに異なる PeerId が割り当てられる
        // given (前提条件):
        let usecase = ConnectPeerUseCase::new(Arc::new(WebSocketMessagePusher::new()));
        let (tx1, _rx1) = tokio::sync::mpsc::unbounded_channel();
        let (tx2, _rx2) = tokio::sync::mpsc::unbounded_channel();

        // when (操作):
        let first = usecase.execute(tx1).await;
        let second = usecase.execute(tx2).await;

        // then (期待する結果):
        assert_ne!(first, second);
    }
}
