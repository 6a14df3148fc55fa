//! HTTP and WebSocket handlers.

mod http;
mod websocket;

pub use http::{create_room, get_rooms, health_check, root};
pub use websocket::websocket_handler;
