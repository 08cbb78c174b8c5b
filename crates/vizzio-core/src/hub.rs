//! The relay hub: message log, connection registry and responder.
//!
//! A `Hub` is created once at startup and shared (cheaply cloned) by every
//! connection task and HTTP handler. All state lives behind it; there are no
//! process-wide globals.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::intake::BuildNotification;
use crate::log::MessageLog;
use crate::model::{ChatEntry, Sender};
use crate::protocol::{InboundFrame, OutboundFrame};
use crate::registry::ConnectionRegistry;
use crate::responder::Responder;

/// Default pause before the bot answers a user message.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_secs(1);

/// Shared relay state.
#[derive(Clone)]
pub struct Hub {
    log: MessageLog,
    registry: ConnectionRegistry,
    responder: Arc<Responder>,
    reply_delay: Duration,
    // held across append + broadcast so wire order matches log order
    publishing: Arc<Mutex<()>>,
}

impl Default for Hub {
    fn default() -> Self {
        Self::new(Responder::default(), DEFAULT_REPLY_DELAY)
    }
}

impl Hub {
    pub fn new(responder: Responder, reply_delay: Duration) -> Self {
        Self {
            log: MessageLog::new(),
            registry: ConnectionRegistry::new(),
            responder: Arc::new(responder),
            reply_delay,
            publishing: Arc::new(Mutex::new(())),
        }
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Most recent entries, oldest first.
    pub fn recent(&self, limit: usize) -> Vec<ChatEntry> {
        self.log.recent(limit)
    }

    /// Bot entries nobody has read yet.
    pub fn unread_count(&self) -> usize {
        self.log.count_unread_from(Sender::Bot)
    }

    /// Append an entry and push it to every connection.
    ///
    /// Appends and broadcasts happen as one step, so every connection sees
    /// entries in log order. Returns the number of connections reached.
    pub fn publish(&self, entry: &ChatEntry) -> usize {
        let payload = match (OutboundFrame::NewMessage { message: entry }).to_json() {
            Ok(payload) => Some(payload),
            Err(e) => {
                error!(id = %entry.id, error = %e, "Failed to encode outbound frame");
                None
            }
        };

        let _publishing = self.publishing.lock().unwrap_or_else(|e| e.into_inner());
        self.log.append(entry.clone());
        payload.map_or(0, |payload| self.registry.broadcast(&payload))
    }

    /// Dispatch one raw text frame from a client.
    ///
    /// Malformed and unknown frames are dropped. For a chat message the handle
    /// of the scheduled bot reply is returned.
    pub fn handle_frame(&self, text: &str) -> Option<JoinHandle<()>> {
        match InboundFrame::parse(text) {
            Ok(InboundFrame::SendMessage { content }) => Some(self.post_message(content)),
            Ok(InboundFrame::Unknown) => {
                debug!(frame = %text, "Ignoring unsupported frame type");
                None
            }
            Err(e) => {
                warn!(error = %e, "Dropping malformed frame");
                None
            }
        }
    }

    /// Record a user message and schedule the bot's reply.
    ///
    /// The user entry is appended and broadcast before the reply task exists.
    /// The reply runs after the configured delay whether or not the author is
    /// still connected.
    pub fn post_message(&self, content: String) -> JoinHandle<()> {
        let entry = ChatEntry::user(content.clone());
        let reached = self.publish(&entry);
        debug!(id = %entry.id, reached, "User message broadcast");

        let hub = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(hub.reply_delay).await;
            hub.reply_to(&content);
        })
    }

    /// Run the responder on `content` and publish its answer.
    pub fn reply_to(&self, content: &str) -> ChatEntry {
        let reply = self.responder.respond(content);
        let entry = ChatEntry::bot(reply.content, reply.kind);
        let reached = self.publish(&entry);
        debug!(id = %entry.id, kind = entry.kind.as_str(), reached, "Bot reply broadcast");
        entry
    }

    /// Turn a build notification into a bot entry and publish it.
    pub fn ingest(&self, notification: BuildNotification) -> ChatEntry {
        let entry = notification.into_entry();
        let reached = self.publish(&entry);
        debug!(id = %entry.id, kind = entry.kind.as_str(), reached, "Build notification broadcast");
        entry
    }

    /// Close every open connection.
    pub fn shutdown(&self) -> usize {
        self.registry.close_all()
    }
}
