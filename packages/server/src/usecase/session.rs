//! Per-connection relay session.
//!
//! Drives the `PeerSession` state machine and dispatches each decoded
//! command to the matching use case. Commands from one connection are
//! handled strictly in arrival order by the owning socket task.

use std::sync::Arc;

use crate::domain::{
    ClientCommand, JoinDecision, LeaveOutcome, PeerId, PeerSession, RoomId, SessionState,
};

use super::{
    disconnect_peer::DisconnectPeerUseCase, error::SignalingError, join_room::JoinRoomUseCase,
    relay_message::RelayMessageUseCase,
};

/// What a handled command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Admitted to a room.
    Joined {
        room: RoomId,
        initiator: bool,
        room_size: usize,
    },
    /// Join for the room already joined; nothing changed.
    AlreadyJoined(RoomId),
    /// Negotiation frame forwarded to `sent_count` peers.
    Relayed { sent_count: usize },
}

/// Relay state of one WebSocket connection.
pub struct RelaySession {
    session: PeerSession,
    join_room_usecase: Arc<JoinRoomUseCase>,
    relay_message_usecase: Arc<RelayMessageUseCase>,
    disconnect_peer_usecase: Arc<DisconnectPeerUseCase>,
}

impl RelaySession {
    pub fn new(
        peer_id: PeerId,
        join_room_usecase: Arc<JoinRoomUseCase>,
        relay_message_usecase: Arc<RelayMessageUseCase>,
        disconnect_peer_usecase: Arc<DisconnectPeerUseCase>,
    ) -> Self {
        Self {
            session: PeerSession::new(peer_id),
            join_room_usecase,
            relay_message_usecase,
            disconnect_peer_usecase,
        }
    }

    pub fn peer_id(&self) -> PeerId {
        self.session.id()
    }

    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    /// Handle one decoded command.
    ///
    /// An `Err` means the command was dropped; the session stays usable.
    pub async fn handle(&mut self, command: ClientCommand) -> Result<SessionEvent, SignalingError> {
        match command {
            ClientCommand::Join { room } => self.join(room).await,
            ClientCommand::Negotiate { kind, room, frame } => {
                match self.session.state() {
                    SessionState::Closed => return Err(SignalingError::SessionClosed),
                    SessionState::Unjoined => return Err(SignalingError::NotJoined(kind)),
                    SessionState::Joined(joined) if *joined != room => {
                        return Err(SignalingError::RoomMismatch {
                            kind,
                            joined: joined.clone(),
                            requested: room,
                        });
                    }
                    SessionState::Joined(_) => {}
                }

                let sent_count = self
                    .relay_message_usecase
                    .execute(self.session.id(), &room, kind, frame)
                    .await?;
                Ok(SessionEvent::Relayed { sent_count })
            }
        }
    }

    async fn join(&mut self, room: RoomId) -> Result<SessionEvent, SignalingError> {
        match self.session.decide_join(&room) {
            JoinDecision::Admit => {
                let outcome = self
                    .join_room_usecase
                    .execute(self.session.id(), room.clone())
                    .await?;
                self.session.mark_joined(room.clone());
                Ok(SessionEvent::Joined {
                    room,
                    initiator: outcome.is_initiator,
                    room_size: outcome.room_size,
                })
            }
            JoinDecision::AlreadyJoined => Ok(SessionEvent::AlreadyJoined(room)),
            JoinDecision::JoinedElsewhere(current) => Err(SignalingError::JoinedElsewhere {
                current,
                requested: room,
            }),
            JoinDecision::Closed => Err(SignalingError::SessionClosed),
        }
    }

    /// Tear the session down: leave the joined room and notify the rest.
    ///
    /// Safe to call more than once; only the first call has an effect.
    pub async fn close(&mut self) -> Option<LeaveOutcome> {
        if *self.session.state() == SessionState::Closed {
            return None;
        }
        let joined_room = self.session.close();
        self.disconnect_peer_usecase
            .execute(self.session.id(), joined_room)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessagePusher, NegotiationKind, RawFrame, RoomRepository},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository,
        },
        usecase::gate::RoomGate,
    };
    use rendezvous_shared::time::SystemClock;
    use tokio::sync::mpsc;

    struct Fixture {
        repository: Arc<InMemoryRoomRepository>,
        message_pusher: Arc<WebSocketMessagePusher>,
        join_room: Arc<JoinRoomUseCase>,
        relay_message: Arc<RelayMessageUseCase>,
        disconnect_peer: Arc<DisconnectPeerUseCase>,
    }

    fn create_fixture() -> Fixture {
        let repository = Arc::new(InMemoryRoomRepository::new(Arc::new(SystemClock)));
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let gate = Arc::new(RoomGate::new());
        Fixture {
            join_room: Arc::new(JoinRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                gate.clone(),
            )),
            relay_message: Arc::new(RelayMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                gate.clone(),
            )),
            disconnect_peer: Arc::new(DisconnectPeerUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                gate,
            )),
            repository,
            message_pusher,
        }
    }

    async fn open_session(fixture: &Fixture) -> (RelaySession, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let peer_id = PeerId::generate();
        fixture.message_pusher.register_client(peer_id, tx).await;
        let session = RelaySession::new(
            peer_id,
            fixture.join_room.clone(),
            fixture.relay_message.clone(),
            fixture.disconnect_peer.clone(),
        );
        (session, rx)
    }

    fn room_id(value: &str) -> RoomId {
        RoomId::new(value.to_string()).unwrap()
    }

    fn join(room: &str) -> ClientCommand {
        ClientCommand::Join {
            room: room_id(room),
        }
    }

    fn offer(room: &str, sdp: &str) -> ClientCommand {
        let text = format!(r#"{{"type":"offer","room":"{}","sdp":"{}"}}"#, room, sdp);
        ClientCommand::Negotiate {
            kind: NegotiationKind::Offer,
            room: room_id(room),
            frame: RawFrame::new(text),
        }
    }

    #[tokio::test]
    async fn test_join_moves_session_to_joined() {
        // テスト項目: join で Joined 状態に遷移し、initiator が返される
        // given (前提条件):
        let fixture = create_fixture();
        let (mut alice, _rx) = open_session(&fixture).await;

        // when (操作):
        let event = alice.handle(join("r1")).await;

        // then (期待する結果):
        assert_eq!(
            event,
            Ok(SessionEvent::Joined {
                room: room_id("r1"),
                initiator: true,
                room_size: 1,
            })
        );
        assert_eq!(alice.state(), &SessionState::Joined(room_id("r1")));
    }

    #[tokio::test]
    async fn test_duplicate_join_is_idempotent() {
        // テスト項目: 同じ Room への再 join は何もせず、二重に数えられない
        // given (前提条件):
        let fixture = create_fixture();
        let (mut alice, mut rx_alice) = open_session(&fixture).await;
        alice.handle(join("r1")).await.unwrap();
        rx_alice.recv().await.unwrap();

        // when (操作):
        let event = alice.handle(join("r1")).await;

        // then (期待する結果):
        assert_eq!(event, Ok(SessionEvent::AlreadyJoined(room_id("r1"))));
        assert_eq!(fixture.repository.members(&room_id("r1")).await.len(), 1);
        assert!(rx_alice.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_join_other_room_is_rejected() {
        // テスト項目: 入室中に別の Room へ join しても所属は変わらない
        // given (前提条件):
        let fixture = create_fixture();
        let (mut alice, _rx) = open_session(&fixture).await;
        alice.handle(join("r1")).await.unwrap();

        // when (操作):
        let result = alice.handle(join("r2")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SignalingError::JoinedElsewhere {
                current: room_id("r1"),
                requested: room_id("r2"),
            })
        );
        assert_eq!(alice.state(), &SessionState::Joined(room_id("r1")));
        assert_eq!(fixture.repository.count_rooms().await, 1);
    }

    #[tokio::test]
    async fn test_offer_before_join_is_dropped() {
        // テスト項目: 未入室での offer は中継されない
        // given (前提条件):
        let fixture = create_fixture();
        let (mut alice, _rx_alice) = open_session(&fixture).await;
        let (mut bob, mut rx_bob) = open_session(&fixture).await;
        bob.handle(join("r1")).await.unwrap();
        rx_bob.recv().await.unwrap();

        // when (操作):
        let result = alice.handle(offer("r1", "X")).await;

        // then (期待する結果):
        assert_eq!(result, Err(SignalingError::NotJoined(NegotiationKind::Offer)));
        assert!(rx_bob.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_offer_for_other_room_is_dropped() {
        // テスト項目: 参加中の Room と異なる room 宛ての offer は中継されない
        // given (前提条件):
        let fixture = create_fixture();
        let (mut alice, _rx_alice) = open_session(&fixture).await;
        let (mut bob, mut rx_bob) = open_session(&fixture).await;
        alice.handle(join("r1")).await.unwrap();
        bob.handle(join("r2")).await.unwrap();
        rx_bob.recv().await.unwrap();

        // when (操作):
        let result = alice.handle(offer("r2", "X")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(SignalingError::RoomMismatch { .. })));
        assert!(rx_bob.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_offer_is_relayed_within_room() {
        // テスト項目: 入室後の offer は同じ Room の他のメンバーに届く
        // given (前提条件):
        let fixture = create_fixture();
        let (mut alice, mut rx_alice) = open_session(&fixture).await;
        let (mut bob, mut rx_bob) = open_session(&fixture).await;
        alice.handle(join("r1")).await.unwrap();
        bob.handle(join("r1")).await.unwrap();
        while rx_alice.try_recv().is_ok() {}
        while rx_bob.try_recv().is_ok() {}

        // when (操作):
        let event = alice.handle(offer("r1", "X")).await;

        // then (期待する結果):
        assert_eq!(event, Ok(SessionEvent::Relayed { sent_count: 1 }));
        assert_eq!(
            rx_bob.recv().await,
            Some(r#"{"type":"offer","room":"r1","sdp":"X"}"#.to_string())
        );
        assert!(rx_alice.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_close_leaves_room_and_notifies() {
        // テスト項目: close で Room から退出し、残りのメンバーに peer-left が届く
        // given (前提条件):
        let fixture = create_fixture();
        let (mut alice, _rx_alice) = open_session(&fixture).await;
        let (mut bob, mut rx_bob) = open_session(&fixture).await;
        alice.handle(join("r1")).await.unwrap();
        bob.handle(join("r1")).await.unwrap();
        while rx_bob.try_recv().is_ok() {}

        // when (操作):
        let outcome = alice.close().await;
        let second = alice.close().await;

        // then (期待する結果):
        assert_eq!(outcome.map(|o| o.remaining_size), Some(1));
        assert_eq!(second, None);
        assert_eq!(rx_bob.recv().await, Some(r#"{"type":"peer-left"}"#.to_string()));
        assert_eq!(fixture.repository.count_rooms().await, 1);
        assert_eq!(
            alice.handle(join("r1")).await,
            Err(SignalingError::SessionClosed)
        );
    }
}
