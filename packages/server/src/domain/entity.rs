//! Domain entities.
//!
//! `Room` is the unit of membership bookkeeping; `PeerSession` is the
//! per-connection state machine of the relay.

use super::{
    error::RoomError,
    value_object::{PeerId, RoomId, Timestamp},
};

/// A named group of peers that exchange negotiation messages.
///
/// Members are kept in arrival order. The first member to enter an empty
/// room is its initiator; there is no re-election when the initiator leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub members: Vec<PeerId>,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            members: Vec::new(),
            created_at,
        }
    }

    /// Add `peer_id` to the room.
    ///
    /// The returned outcome describes the room as observed at the moment of
    /// admission; `others` lists every member except the joiner.
    pub fn admit(&mut self, peer_id: PeerId) -> Result<JoinOutcome, RoomError> {
        if self.contains(&peer_id) {
            return Err(RoomError::AlreadyMember(peer_id));
        }

        let is_initiator = self.members.is_empty();
        let others = self.members.clone();
        self.members.push(peer_id);

        Ok(JoinOutcome {
            is_initiator,
            room_size: self.members.len(),
            others,
        })
    }

    /// Remove `peer_id`, returning whether it was a member.
    pub fn remove(&mut self, peer_id: &PeerId) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member != peer_id);
        self.members.len() != before
    }

    pub fn contains(&self, peer_id: &PeerId) -> bool {
        self.members.contains(peer_id)
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Result of admitting a peer to a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// The joiner was the first member of the room.
    pub is_initiator: bool,
    /// Member count after admission.
    pub room_size: usize,
    /// Members other than the joiner, snapshotted with the admission.
    pub others: Vec<PeerId>,
}

/// Result of removing a peer from a room.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeaveOutcome {
    /// The peer was a member and has been removed.
    pub was_member: bool,
    pub remaining_size: usize,
    pub room_deleted: bool,
    /// Members still in the room, snapshotted with the removal.
    pub remaining: Vec<PeerId>,
}

/// Liveness of a peer's outbound channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Open,
    Closing,
    Closed,
}

/// Relay state of one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unjoined,
    Joined(RoomId),
    Closed,
}

/// What to do with a join request in the current session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinDecision {
    /// Run admission.
    Admit,
    /// Already a member of the requested room; nothing to do.
    AlreadyJoined,
    /// Already a member of another room; the association is fixed until close.
    JoinedElsewhere(RoomId),
    /// The session has ended.
    Closed,
}

/// Per-connection state machine: `Unjoined -> Joined(room) -> Closed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerSession {
    id: PeerId,
    state: SessionState,
}

impl PeerSession {
    pub fn new(id: PeerId) -> Self {
        Self {
            id,
            state: SessionState::Unjoined,
        }
    }

    pub fn id(&self) -> PeerId {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn joined_room(&self) -> Option<&RoomId> {
        match &self.state {
            SessionState::Joined(room) => Some(room),
            _ => None,
        }
    }

    pub fn decide_join(&self, room: &RoomId) -> JoinDecision {
        match &self.state {
            SessionState::Unjoined => JoinDecision::Admit,
            SessionState::Joined(current) if current == room => JoinDecision::AlreadyJoined,
            SessionState::Joined(current) => JoinDecision::JoinedElsewhere(current.clone()),
            SessionState::Closed => JoinDecision::Closed,
        }
    }

    /// Record a successful admission. Only valid from `Unjoined`.
    pub fn mark_joined(&mut self, room: RoomId) {
        if self.state == SessionState::Unjoined {
            self.state = SessionState::Joined(room);
        }
    }

    /// Whether a negotiation message addressed to `room` may be forwarded.
    pub fn accepts_relay(&self, room: &RoomId) -> bool {
        self.joined_room() == Some(room)
    }

    /// Move to `Closed`, returning the room to leave if one was joined.
    ///
    /// Closing twice returns `None` the second time.
    pub fn close(&mut self) -> Option<RoomId> {
        match std::mem::replace(&mut self.state, SessionState::Closed) {
            SessionState::Joined(room) => Some(room),
            SessionState::Unjoined | SessionState::Closed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_id(value: &str) -> RoomId {
        RoomId::new(value.to_string()).unwrap()
    }

    fn create_test_room() -> Room {
        Room::new(room_id("r1"), Timestamp::new(1000))
    }

    #[test]
    fn test_first_member_is_initiator() {
        // テスト項目: 空の Room に最初に入った参加者が initiator になる
        // given (前提条件):
        let mut room = create_test_room();
        let alice = PeerId::generate();

        // when (操作):
        let outcome = room.admit(alice).unwrap();

        // then (期待する結果):
        assert!(outcome.is_initiator);
        assert_eq!(outcome.room_size, 1);
        assert!(outcome.others.is_empty());
    }

    #[test]
    fn test_later_members_are_not_initiator() {
        // テスト項目: 2人目以降は initiator にならず、既存メンバーが others に入る
        // given (前提条件):
        let mut room = create_test_room();
        let alice = PeerId::generate();
        let bob = PeerId::generate();
        let charlie = PeerId::generate();
        room.admit(alice).unwrap();

        // when (操作):
        let bob_outcome = room.admit(bob).unwrap();
        let charlie_outcome = room.admit(charlie).unwrap();

        // then (期待する結果):
        assert!(!bob_outcome.is_initiator);
        assert_eq!(bob_outcome.room_size, 2);
        assert_eq!(bob_outcome.others, vec![alice]);
        assert!(!charlie_outcome.is_initiator);
        assert_eq!(charlie_outcome.others, vec![alice, bob]);
    }

    #[test]
    fn test_admit_same_peer_twice_is_rejected() {
        // テスト項目: 同じ参加者の二重入室は拒否され、人数は増えない
        // given (前提条件):
        let mut room = create_test_room();
        let alice = PeerId::generate();
        room.admit(alice).unwrap();

        // when (操作):
        let result = room.admit(alice);

        // then (期待する結果):
        assert_eq!(result, Err(RoomError::AlreadyMember(alice)));
        assert_eq!(room.size(), 1);
    }

    #[test]
    fn test_no_reelection_after_initiator_leaves() {
        // テスト項目: initiator が抜けても、次の入室者は initiator にならない
        // given (前提条件):
        let mut room = create_test_room();
        let alice = PeerId::generate();
        let bob = PeerId::generate();
        room.admit(alice).unwrap();
        room.admit(bob).unwrap();

        // when (操作):
        assert!(room.remove(&alice));
        let outcome = room.admit(PeerId::generate()).unwrap();

        // then (期待する結果):
        assert!(!outcome.is_initiator);
        assert_eq!(outcome.room_size, 2);
    }

    #[test]
    fn test_remove_non_member() {
        // テスト項目: メンバーでない参加者の削除は false を返し、Room は変わらない
        // given (前提条件):
        let mut room = create_test_room();
        let alice = PeerId::generate();
        room.admit(alice).unwrap();

        // when (操作):
        let removed = room.remove(&PeerId::generate());

        // then (期待する結果):
        assert!(!removed);
        assert_eq!(room.members, vec![alice]);
    }

    #[test]
    fn test_session_join_decisions() {
        // テスト項目: セッション状態ごとに join の扱いが決まる
        // given (前提条件):
        let mut session = PeerSession::new(PeerId::generate());
        let r1 = room_id("r1");
        let r2 = room_id("r2");

        // when (操作) / then (期待する結果):
        assert_eq!(session.decide_join(&r1), JoinDecision::Admit);

        session.mark_joined(r1.clone());
        assert_eq!(session.decide_join(&r1), JoinDecision::AlreadyJoined);
        assert_eq!(
            session.decide_join(&r2),
            JoinDecision::JoinedElsewhere(r1.clone())
        );

        session.close();
        assert_eq!(session.decide_join(&r1), JoinDecision::Closed);
    }

    #[test]
    fn test_session_accepts_relay_only_for_joined_room() {
        // テスト項目: 中継は参加中の Room 宛てのメッセージに限られる
        // given (前提条件):
        let mut session = PeerSession::new(PeerId::generate());
        let r1 = room_id("r1");
        let r2 = room_id("r2");

        // when (操作):
        let before_join = session.accepts_relay(&r1);
        session.mark_joined(r1.clone());

        // then (期待する結果):
        assert!(!before_join);
        assert!(session.accepts_relay(&r1));
        assert!(!session.accepts_relay(&r2));
    }

    #[test]
    fn test_session_close_returns_room_once() {
        // テスト項目: close は参加中の Room を一度だけ返す
        // given (前提条件):
        let mut session = PeerSession::new(PeerId::generate());
        session.mark_joined(room_id("r1"));

        // when (操作):
        let first = session.close();
        let second = session.close();

        // then (期待する結果):
        assert_eq!(first, Some(room_id("r1")));
        assert_eq!(second, None);
        assert_eq!(session.state(), &SessionState::Closed);
    }

    #[test]
    fn test_unjoined_session_close_has_no_room() {
        // テスト項目: 未参加のまま close しても退出対象の Room はない
        // given (前提条件):
        let mut session = PeerSession::new(PeerId::generate());

        // when (操作):
        let room = session.close();

        // then (期待する結果):
        assert_eq!(room, None);
    }
}
