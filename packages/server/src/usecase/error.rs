//! UseCase error types.

use thiserror::Error;

use crate::domain::{MessagePushError, NegotiationKind, RepositoryError, RoomId};

/// Reasons a client command was dropped.
///
/// None of these end the connection; the handler logs them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalingError {
    /// Join for a room other than the one already joined
    #[error("already joined room '{current}', cannot join '{requested}'")]
    JoinedElsewhere { current: RoomId, requested: RoomId },

    /// Negotiation message before any join
    #[error("'{0}' received before join")]
    NotJoined(NegotiationKind),

    /// Negotiation message addressed to a room other than the joined one
    #[error("'{kind}' addressed to room '{requested}' but joined '{joined}'")]
    RoomMismatch {
        kind: NegotiationKind,
        joined: RoomId,
        requested: RoomId,
    },

    /// Command after the session has closed
    #[error("session is closed")]
    SessionClosed,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Push(#[from] MessagePushError),
}
