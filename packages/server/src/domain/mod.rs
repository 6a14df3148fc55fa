//! Domain layer: value objects, entities, messages and the interfaces the
//! use cases depend on.

pub mod entity;
pub mod error;
pub mod factory;
pub mod message;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{
    ConnectionState, JoinDecision, JoinOutcome, LeaveOutcome, PeerSession, Room, SessionState,
};
pub use error::{MessagePushError, RepositoryError, RoomError, ValueObjectError};
pub use factory::RoomIdFactory;
pub use message::{ClientCommand, NegotiationKind, OutboundMessage, RawFrame};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::RoomRepository;
pub use value_object::{PeerId, RoomId, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
#[cfg(test)]
pub use repository::MockRoomRepository;
