//! Service status.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn index(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "online",
        "service": "VIZZIO Relay",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "connections": state.hub.registry().len(),
        "messages": state.hub.log().len(),
        "endpoints": {
            "websocket": "/ws",
            "notify": "/api/chat/notify",
            "messages": "/api/chat/messages",
            "unread": "/api/chat/unread"
        }
    }))
}
