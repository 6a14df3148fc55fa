//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, ws::WebSocketUpgrade, ws::rejection::WebSocketUpgradeRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use rendezvous_shared::time::timestamp_to_rfc3339;

use crate::{
    infrastructure::dto::http::{CreateRoomDto, HealthDto, RoomSummaryDto, ServerInfoDto},
    ui::state::AppState,
};

use super::websocket::upgrade;

const SERVER_NAME: &str = "Rendezvous Signaling Server";

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let status = state.get_server_status_usecase.execute().await;
    Json(HealthDto {
        status: "ok".to_string(),
        rooms: status.room_count,
        uptime: status.uptime_seconds,
    })
}

/// Root endpoint
///
/// WebSocket upgrade requests to `/` enter the relay; plain requests get
/// the server summary.
pub async fn root(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    State(state): State<Arc<AppState>>,
) -> Response {
    if let Ok(ws) = ws {
        return upgrade(ws, state);
    }

    let status = state.get_server_status_usecase.execute().await;
    Json(ServerInfoDto {
        status: SERVER_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rooms: status.room_count,
        uptime: status.uptime_seconds,
    })
    .into_response()
}

/// Issue a fresh room id and its join link
pub async fn create_room(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CreateRoomDto>, StatusCode> {
    match state.create_room_usecase.execute() {
        Ok(issued) => Ok(Json(CreateRoomDto {
            room_id: issued.room_id.into_string(),
            url: issued.join_url,
        })),
        Err(e) => {
            tracing::error!("Failed to issue room id: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let room_summaries: Vec<RoomSummaryDto> = rooms
        .into_iter()
        .map(|room| RoomSummaryDto {
            size: room.size(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
            room_id: room.id.into_string(),
        })
        .collect();

    Json(room_summaries)
}
