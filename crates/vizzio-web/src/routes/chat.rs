//! Chat log queries.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use vizzio_core::model::ChatEntry;

use crate::state::AppState;

/// Number of entries returned when no limit is given.
pub const DEFAULT_LIMIT: usize = 50;

#[derive(Deserialize)]
pub struct MessagesQuery {
    pub limit: Option<usize>,
}

/// Most recent entries, oldest first.
pub async fn get_messages(
    State(state): State<AppState>,
    Query(query): Query<MessagesQuery>,
) -> Json<Vec<ChatEntry>> {
    Json(state.hub.recent(query.limit.unwrap_or(DEFAULT_LIMIT)))
}

/// Count of unread bot entries.
pub async fn get_unread(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "unread": state.hub.unread_count() }))
}
