//! WebSocket handler for the live chat.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use tracing::{debug, info};

use crate::state::AppState;

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Handle individual WebSocket connection.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let registry = state.hub.registry().clone();
    let (id, mut outbound) = registry.register();
    let guard = registry.guard(id);

    info!(connection = %id, connections = registry.len(), "WebSocket client connected");

    // Forward broadcasts to this client until the queue closes
    let mut send_task = tokio::spawn(async move {
        while let Some(payload) = outbound.recv().await {
            if sender.send(Message::Text(payload.into())).await.is_err() {
                debug!("WebSocket send failed, client disconnected");
                return;
            }
        }
        // queue closed by the registry: server is shutting down
        let _ = sender.send(Message::Close(None)).await;
    });

    // Handle incoming frames from client
    let hub = state.hub.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    debug!(connection = %id, "Received from WebSocket client: {}", text.as_str());
                    hub.handle_frame(text.as_str());
                }
                Ok(Message::Close(_)) => {
                    debug!(connection = %id, "WebSocket client sent close frame");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    debug!(connection = %id, error = %e, "WebSocket transport error");
                    break;
                }
            }
        }
    });

    // Wait for either side to finish, then stop the other
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    let id = guard.id();
    drop(guard);
    info!(connection = %id, connections = registry.len(), "WebSocket client disconnected");
}
