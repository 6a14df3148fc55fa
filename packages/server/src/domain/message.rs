//! Messages exchanged between peers and the relay.

use std::fmt;

use super::value_object::RoomId;

/// Negotiation message types forwarded between peers without inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationKind {
    Offer,
    Answer,
    IceCandidate,
}

impl NegotiationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Offer => "offer",
            Self::Answer => "answer",
            Self::IceCandidate => "ice-candidate",
        }
    }
}

impl fmt::Display for NegotiationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A client frame kept exactly as it arrived on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame(String);

impl RawFrame {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A decoded client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// Enter a room, creating it if needed.
    Join { room: RoomId },
    /// Forward a negotiation message to the other members of `room`.
    Negotiate {
        kind: NegotiationKind,
        room: RoomId,
        frame: RawFrame,
    },
}

impl ClientCommand {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Negotiate { kind, .. } => kind.as_str(),
        }
    }

    pub fn room(&self) -> &RoomId {
        match self {
            Self::Join { room } | Self::Negotiate { room, .. } => room,
        }
    }
}

/// A message the relay sends to a peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    /// Admission result, or the room size update sent to existing members.
    Ready { initiator: bool, room_size: usize },
    /// Another member of the room disconnected.
    PeerLeft,
    /// A negotiation frame from another member, unmodified.
    Relay(RawFrame),
}

impl OutboundMessage {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Ready { .. } => "ready",
            Self::PeerLeft => "peer-left",
            Self::Relay(_) => "relay",
        }
    }
}
