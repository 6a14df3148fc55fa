//! WebSocket envelope DTOs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ValueObjectError;

/// Envelope type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    Join,
    Offer,
    Answer,
    IceCandidate,
    Ready,
    PeerLeft,
}

impl MessageType {
    /// Parse a wire type tag.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "join" => Some(Self::Join),
            "offer" => Some(Self::Offer),
            "answer" => Some(Self::Answer),
            "ice-candidate" => Some(Self::IceCandidate),
            "ready" => Some(Self::Ready),
            "peer-left" => Some(Self::PeerLeft),
            _ => None,
        }
    }
}

/// The fields the relay reads from an inbound envelope.
///
/// Any other field (SDP, candidate, ...) is skipped during decoding and
/// never re-encoded.
#[derive(Debug, Deserialize)]
pub struct EnvelopeHeader {
    pub r#type: String,
    #[serde(default)]
    pub room: Option<String>,
}

/// Server -> client `ready`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReadyMessage {
    pub r#type: MessageType,
    pub initiator: bool,
    #[serde(rename = "roomSize")]
    pub room_size: usize,
}

/// Server -> client `peer-left`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PeerLeftMessage {
    pub r#type: MessageType,
}

/// Inbound envelope decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// Not a JSON object with a string `type`
    #[error("malformed envelope: {0}")]
    Malformed(String),

    /// `type` is not one a client may send
    #[error("unknown message type '{0}'")]
    UnknownType(String),

    /// A room-addressed type without a `room` field
    #[error("'{0}' envelope has no room")]
    MissingRoom(&'static str),

    /// The `room` field is not a valid room id
    #[error("invalid room: {0}")]
    InvalidRoom(#[from] ValueObjectError),
}
