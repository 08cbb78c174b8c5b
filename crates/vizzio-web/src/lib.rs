//! VIZZIO Web Server
//!
//! Axum-based WebSocket relay and REST API for chat and build notifications.

pub mod routes;
pub mod state;
pub mod websocket;

use std::future::Future;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use vizzio_core::Hub;

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/chat/notify", post(routes::notify::notify_build))
        .route("/chat/messages", get(routes::chat::get_messages))
        .route("/chat/unread", get(routes::chat::get_unread))
        .with_state(state.clone());

    Router::new()
        .route("/", get(routes::status::index))
        .nest("/api", api_routes)
        .route("/ws", get(websocket::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server until `shutdown` resolves, then close every connection.
pub async fn run_server(
    hub: Hub,
    host: &str,
    port: u16,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let state = AppState::new(hub.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    info!("Relay listening on http://{}:{}", host, port);

    let closing = hub.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            let closed = closing.shutdown();
            info!(closed, "Shutting down, closed WebSocket connections");
        })
        .await?;

    Ok(())
}
