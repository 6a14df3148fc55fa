//! Server state shared by all handlers.

use std::sync::Arc;

use crate::{
    domain::PeerId,
    usecase::{
        ConnectPeerUseCase, CreateRoomUseCase, DisconnectPeerUseCase, GetRoomsUseCase,
        GetServerStatusUseCase, JoinRoomUseCase, RelayMessageUseCase, RelaySession,
    },
};

/// Shared application state
pub struct AppState {
    pub connect_peer_usecase: Arc<ConnectPeerUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
    pub disconnect_peer_usecase: Arc<DisconnectPeerUseCase>,
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub get_server_status_usecase: Arc<GetServerStatusUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
}

impl AppState {
    /// Start the relay state machine for a newly connected peer
    pub fn open_session(&self, peer_id: PeerId) -> RelaySession {
        RelaySession::new(
            peer_id,
            self.join_room_usecase.clone(),
            self.relay_message_usecase.clone(),
            self.disconnect_peer_usecase.clone(),
        )
    }
}
