//! HTTP client for a running relay.
//!
//! CI jobs and the CLI use this to post build notifications and to read the
//! chat log without opening a WebSocket.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{RelayError, RelayResult};
use crate::intake::BuildNotification;
use crate::model::ChatEntry;

/// Default relay URL.
pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:3001";

#[derive(Deserialize)]
struct Ack {
    success: bool,
}

#[derive(Deserialize)]
struct Unread {
    unread: usize,
}

/// Talks to the relay's REST endpoints.
#[derive(Clone)]
pub struct RelayNotifier {
    client: reqwest::Client,
    base_url: String,
}

impl RelayNotifier {
    /// Create a notifier with a custom base URL.
    pub fn with_url(base_url: &str) -> Self {
        debug!(base_url = %base_url, "RelayNotifier initialized");
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Post a build notification to `/api/chat/notify`.
    pub async fn notify_build(&self, notification: &BuildNotification) -> RelayResult<()> {
        let url = format!("{}/api/chat/notify", self.base_url);
        debug!(url = %url, build_id = %notification.build_id, status = %notification.status, "Sending build notification");

        let response = self.client.post(&url).json(notification).send().await?;
        if !response.status().is_success() {
            return Err(RelayError::UnexpectedStatus(response.status().as_u16()));
        }
        let ack: Ack = response.json().await?;
        if !ack.success {
            return Err(RelayError::NotAcknowledged);
        }
        Ok(())
    }

    /// Fetch the most recent entries, oldest first.
    pub async fn recent_messages(&self, limit: usize) -> RelayResult<Vec<ChatEntry>> {
        let url = format!("{}/api/chat/messages", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(RelayError::UnexpectedStatus(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    /// Fetch the number of unread bot entries.
    pub async fn unread_count(&self) -> RelayResult<usize> {
        let url = format!("{}/api/chat/unread", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(RelayError::UnexpectedStatus(response.status().as_u16()));
        }
        let unread: Unread = response.json().await?;
        Ok(unread.unread)
    }
}
