//! Conversion logic between DTOs and domain messages.

use crate::domain::{ClientCommand, NegotiationKind, OutboundMessage, RawFrame, RoomId};
use crate::infrastructure::dto::websocket::{
    EnvelopeError, EnvelopeHeader, MessageType, PeerLeftMessage, ReadyMessage,
};

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<&str> for ClientCommand {
    type Error = EnvelopeError;

    /// Decode one inbound text frame.
    ///
    /// Negotiation commands keep the frame verbatim so it can be forwarded
    /// byte-for-byte.
    fn try_from(text: &str) -> Result<Self, Self::Error> {
        if !text.trim_start().starts_with('{') {
            return Err(EnvelopeError::Malformed("expected a JSON object".to_string()));
        }

        let header: EnvelopeHeader =
            serde_json::from_str(text).map_err(|e| EnvelopeError::Malformed(e.to_string()))?;

        let kind = match MessageType::parse(&header.r#type) {
            Some(MessageType::Join) => None,
            Some(MessageType::Offer) => Some(NegotiationKind::Offer),
            Some(MessageType::Answer) => Some(NegotiationKind::Answer),
            Some(MessageType::IceCandidate) => Some(NegotiationKind::IceCandidate),
            // server-originated types are not accepted from clients
            Some(MessageType::Ready | MessageType::PeerLeft) | None => {
                return Err(EnvelopeError::UnknownType(header.r#type));
            }
        };

        let type_name = kind.map_or("join", |kind| kind.as_str());
        let room = header.room.ok_or(EnvelopeError::MissingRoom(type_name))?;
        let room = RoomId::new(room)?;

        Ok(match kind {
            None => ClientCommand::Join { room },
            Some(kind) => ClientCommand::Negotiate {
                kind,
                room,
                frame: RawFrame::new(text.to_string()),
            },
        })
    }
}

// ========================================
// Domain → DTO
// ========================================

/// Encode an outbound message as a text frame.
pub fn encode_outbound(message: &OutboundMessage) -> Result<String, serde_json::Error> {
    match message {
        OutboundMessage::Ready {
            initiator,
            room_size,
        } => serde_json::to_string(&ReadyMessage {
            r#type: MessageType::Ready,
            initiator: *initiator,
            room_size: *room_size,
        }),
        OutboundMessage::PeerLeft => serde_json::to_string(&PeerLeftMessage {
            r#type: MessageType::PeerLeft,
        }),
        OutboundMessage::Relay(frame) => Ok(frame.as_str().to_string()),
    }
}
