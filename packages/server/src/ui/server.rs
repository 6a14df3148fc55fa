//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::usecase::{
    ConnectPeerUseCase, CreateRoomUseCase, DisconnectPeerUseCase, GetRoomsUseCase,
    GetServerStatusUseCase, JoinRoomUseCase, RelayMessageUseCase,
};

use super::{
    handler::{create_room, get_rooms, health_check, root, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket signaling server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_peer_usecase,
///     join_room_usecase,
///     relay_message_usecase,
///     disconnect_peer_usecase,
///     create_room_usecase,
///     get_server_status_usecase,
///     get_rooms_usecase,
/// );
/// server.run("0.0.0.0".to_string(), 8080).await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        connect_peer_usecase: Arc<ConnectPeerUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        relay_message_usecase: Arc<RelayMessageUseCase>,
        disconnect_peer_usecase: Arc<DisconnectPeerUseCase>,
        create_room_usecase: Arc<CreateRoomUseCase>,
        get_server_status_usecase: Arc<GetServerStatusUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
    ) -> Self {
        Self {
            app_state: Arc::new(AppState {
                connect_peer_usecase,
                join_room_usecase,
                relay_message_usecase,
                disconnect_peer_usecase,
                create_room_usecase,
                get_server_status_usecase,
                get_rooms_usecase,
            }),
        }
    }

    /// Build the router with every endpoint
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント（`/` は upgrade リクエストも受け付ける）
            .route("/", get(root))
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/health", get(health_check))
            .route("/api/create-room", post(create_room))
            .route("/api/rooms", get(get_rooms))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.app_state.clone())
    }

    /// Run the signaling server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "0.0.0.0")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Signaling server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("WebSocket server ready at ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
