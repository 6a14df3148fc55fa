//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthDto {
    pub status: String,
    pub rooms: usize,
    /// Process uptime in seconds
    pub uptime: f64,
}

/// `GET /`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerInfoDto {
    pub status: String,
    pub version: String,
    pub rooms: usize,
    pub uptime: f64,
}

/// `POST /api/create-room`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomDto {
    pub room_id: String,
    pub url: String,
}

/// One entry of `GET /api/rooms`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub room_id: String,
    pub size: usize,
    pub created_at: String,
}
