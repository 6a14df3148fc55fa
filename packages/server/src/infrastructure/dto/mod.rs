//! Data Transfer Objects (DTOs) for the signaling server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket envelope DTOs
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
