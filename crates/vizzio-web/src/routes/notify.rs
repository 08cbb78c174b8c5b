//! Build notification intake endpoint.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::info;
use vizzio_core::intake::BuildNotification;

use crate::state::AppState;

/// Receive a build notification and broadcast it to all WebSocket clients.
///
/// Always acknowledges; unusable detail fields are rendered as placeholders.
pub async fn notify_build(
    State(state): State<AppState>,
    Json(notification): Json<BuildNotification>,
) -> Json<Value> {
    info!(
        build_id = %notification.build_id,
        workflow = %notification.workflow,
        status = %notification.status,
        "Received build notification"
    );
    state.hub.ingest(notification);
    Json(json!({ "success": true }))
}
