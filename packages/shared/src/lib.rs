//! Shared utilities for the rendezvous signaling server.

pub mod logger;
pub mod time;
