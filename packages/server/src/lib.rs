//! Rendezvous relay for peer-to-peer connection negotiation.
//!
//! Peers join named rooms over WebSocket and exchange opaque negotiation
//! messages (offers, answers, ICE candidates). The server only brokers the
//! handshake and never looks inside the payloads.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
