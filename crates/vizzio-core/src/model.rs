//! Chat log domain models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Delivery status shown next to an entry. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Sent,
    Delivered,
}

/// Rendering category of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Text,
    Notification,
    Alert,
    Success,
}

impl EntryKind {
    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Notification => "notification",
            Self::Alert => "alert",
            Self::Success => "success",
        }
    }
}

/// One entry in the chat log.
///
/// Entries are immutable once appended; there is no edit or delete path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub id: String,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(default)]
    pub status: EntryStatus,
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
}

impl ChatEntry {
    /// A message typed by a user in the chat.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: new_id("msg"),
            sender: Sender::User,
            content: content.into(),
            timestamp: Utc::now(),
            read: true,
            status: EntryStatus::Sent,
            kind: EntryKind::Text,
            metadata: None,
        }
    }

    /// An unread bot reply to a chat message.
    pub fn bot(content: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            id: new_id("msg"),
            sender: Sender::Bot,
            content: content.into(),
            timestamp: Utc::now(),
            read: false,
            status: EntryStatus::Delivered,
            kind,
            metadata: None,
        }
    }

    /// An unread bot entry produced by notification intake.
    pub fn notification(
        content: impl Into<String>,
        kind: EntryKind,
        metadata: BTreeMap<String, String>,
    ) -> Self {
        Self {
            id: new_id("notif"),
            metadata: Some(metadata),
            ..Self::bot(content, kind)
        }
    }
}

fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_entry_defaults() {
        let entry = ChatEntry::user("hello");
        assert!(entry.id.starts_with("msg-"));
        assert_eq!(entry.sender, Sender::User);
        assert!(entry.read);
        assert_eq!(entry.status, EntryStatus::Sent);
        assert_eq!(entry.kind, EntryKind::Text);
        assert!(entry.metadata.is_none());
    }

    #[test]
    fn test_notification_entry_is_unread_bot() {
        let mut meta = BTreeMap::new();
        meta.insert("buildId".to_string(), "7".to_string());
        let entry = ChatEntry::notification("done", EntryKind::Success, meta);
        assert!(entry.id.starts_with("notif-"));
        assert_eq!(entry.sender, Sender::Bot);
        assert!(!entry.read);
        assert_eq!(entry.status, EntryStatus::Delivered);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = ChatEntry::user("x");
        let b = ChatEntry::user("x");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serializes_flat_record() {
        let entry = ChatEntry::bot("hi", EntryKind::Alert);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["sender"], "bot");
        assert_eq!(json["type"], "alert");
        assert_eq!(json["status"], "delivered");
        assert_eq!(json["read"], false);
        assert!(json.get("metadata").is_none());
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
    }
}
