//! Domain error types.

use thiserror::Error;

use super::value_object::PeerId;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Room identifier is empty
    #[error("room id must not be empty")]
    EmptyRoomId,
}

/// Room entity invariant violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// The peer is already a member of the room
    #[error("peer {0} is already a member of the room")]
    AlreadyMember(PeerId),
}

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Duplicate admission of the same peer to the same room
    #[error("peer {peer_id} has already joined room '{room_id}'")]
    PeerAlreadyJoined { room_id: String, peer_id: PeerId },
}

/// Message push errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// The target peer has no registered channel
    #[error("peer {0} is not connected")]
    ClientNotFound(PeerId),

    /// The target peer is closing or its channel is gone
    #[error("peer {0} is not open")]
    NotOpen(PeerId),

    /// The message could not be encoded for the wire
    #[error("failed to encode outbound message: {0}")]
    EncodeFailed(String),
}
