//! Rendezvous signaling server for WebRTC peers.
//!
//! Peers join a room over WebSocket and the server relays their offer, answer
//! and ICE candidate messages to the other members.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin rendezvous-server
//! cargo run --bin rendezvous-server -- --host 127.0.0.1 --port 3001
//! ```

use std::sync::Arc;

use clap::Parser;
use rendezvous_server::{
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::Server,
    usecase::{
        ConnectPeerUseCase, CreateRoomUseCase, DisconnectPeerUseCase, GetRoomsUseCase,
        GetServerStatusUseCase, JoinRoomUseCase, RelayMessageUseCase, RoomGate,
    },
};
use rendezvous_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "rendezvous-server")]
#[command(about = "Signaling relay for WebRTC connection negotiation", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "8080")]
    port: u16,

    /// Frontend page that create-room links point at
    #[arg(long, env = "FRONTEND_URL", default_value = "http://localhost:3000")]
    frontend_url: String,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory database)
    let clock = Arc::new(SystemClock);
    let repository = Arc::new(InMemoryRoomRepository::new(clock.clone()));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let gate = Arc::new(RoomGate::new());
    let connect_peer_usecase = Arc::new(ConnectPeerUseCase::new(message_pusher.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        gate.clone(),
    ));
    let relay_message_usecase = Arc::new(RelayMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        gate.clone(),
    ));
    let disconnect_peer_usecase = Arc::new(DisconnectPeerUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        gate,
    ));
    let create_room_usecase = Arc::new(CreateRoomUseCase::new(args.frontend_url));
    let get_server_status_usecase =
        Arc::new(GetServerStatusUseCase::new(repository.clone(), clock));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository));

    // 4. Create and run the server
    let server = Server::new(
        connect_peer_usecase,
        join_room_usecase,
        relay_message_usecase,
        disconnect_peer_usecase,
        create_room_usecase,
        get_server_status_usecase,
        get_rooms_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
