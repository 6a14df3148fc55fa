//! UseCase layer: one struct per operation of the relay and the HTTP surface.

mod connect_peer;
mod create_room;
mod disconnect_peer;
mod error;
mod gate;
mod get_rooms;
mod get_server_status;
mod join_room;
mod relay_message;
mod session;

pub use connect_peer::ConnectPeerUseCase;
pub use create_room::{CreateRoomUseCase, IssuedRoom};
pub use disconnect_peer::DisconnectPeerUseCase;
pub use error::SignalingError;
pub use gate::RoomGate;
pub use get_rooms::GetRoomsUseCase;
pub use get_server_status::{GetServerStatusUseCase, ServerStatus};
pub use join_room::JoinRoomUseCase;
pub use relay_message::RelayMessageUseCase;
pub use session::{RelaySession, SessionEvent};
