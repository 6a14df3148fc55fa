//! WebSocket connection handlers.

use std::{ops::ControlFlow, sync::Arc};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::{IntoResponse, Response},
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::ClientCommand,
    infrastructure::dto::websocket::EnvelopeError,
    ui::state::AppState,
    usecase::{RelaySession, SessionEvent},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    upgrade(ws, state)
}

pub(super) fn upgrade(ws: WebSocketUpgrade, state: Arc<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: messages queued for this peer
/// (via rx channel) are written to its WebSocket connection in enqueue order.
///
/// # Arguments
///
/// * `rx` - Channel receiver for messages addressed to this peer
/// * `sender` - WebSocket sink to send messages to this peer
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Create a channel for this peer to receive messages
    let (tx, rx) = mpsc::unbounded_channel();
    let peer_id = state.connect_peer_usecase.execute(tx).await;
    tracing::info!("New client connected: {}", peer_id);

    let (sender, mut receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);
    let mut session = state.open_session(peer_id);

    loop {
        tokio::select! {
            msg = receiver.next() => {
                let msg = match msg {
                    Some(Ok(msg)) => msg,
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error for peer {}: {}", peer_id, e);
                        break;
                    }
                    None => break,
                };
                if handle_frame(&mut session, msg).await.is_break() {
                    break;
                }
            }
            _ = &mut send_task => {
                tracing::debug!("Outbound channel for peer {} closed", peer_id);
                break;
            }
        }
    }

    send_task.abort();

    match session.close().await {
        Some(outcome) if outcome.room_deleted => {
            tracing::info!("Client {} disconnected. Room deleted", peer_id);
        }
        Some(outcome) => tracing::info!(
            "Client {} disconnected. Room size: {}",
            peer_id,
            outcome.remaining_size
        ),
        None => tracing::info!("Client {} disconnected", peer_id),
    }
}

async fn handle_frame(session: &mut RelaySession, msg: Message) -> ControlFlow<()> {
    match msg {
        Message::Text(text) => dispatch(session, text.as_str()).await,
        Message::Binary(bytes) => match std::str::from_utf8(&bytes) {
            Ok(text) => dispatch(session, text).await,
            Err(_) => tracing::warn!(
                "Dropped non-UTF-8 binary frame from peer {} ({} bytes)",
                session.peer_id(),
                bytes.len()
            ),
        },
        Message::Ping(_) | Message::Pong(_) => {
            // ping/pong は WebSocket プロトコル側で処理される
            tracing::debug!("Received ping/pong from peer {}", session.peer_id());
        }
        Message::Close(_) => {
            tracing::info!("Client {} requested close", session.peer_id());
            return ControlFlow::Break(());
        }
    }
    ControlFlow::Continue(())
}

async fn dispatch(session: &mut RelaySession, text: &str) {
    let peer_id = session.peer_id();

    let command = match ClientCommand::try_from(text) {
        Ok(command) => command,
        Err(EnvelopeError::UnknownType(message_type)) => {
            tracing::info!("Unknown message type from peer {}: {}", peer_id, message_type);
            return;
        }
        Err(e) => {
            tracing::warn!("Error parsing message from peer {}: {}", peer_id, e);
            return;
        }
    };

    tracing::info!(
        "Received: {} for room: {}",
        command.type_name(),
        command.room()
    );

    match session.handle(command).await {
        Ok(SessionEvent::AlreadyJoined(room)) => {
            tracing::info!("Peer {} already in room {}, join ignored", peer_id, room);
        }
        Ok(SessionEvent::Relayed { sent_count }) => {
            tracing::debug!("Relayed frame from peer {} to {} peer(s)", peer_id, sent_count);
        }
        Ok(SessionEvent::Joined { .. }) => {}
        Err(e) => tracing::warn!("Dropped message from peer {}: {}", peer_id, e),
    }
}
