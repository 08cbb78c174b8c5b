//! Append-only message log.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::model::{ChatEntry, Sender};

/// Ordered, append-only store of chat entries.
///
/// Cloning yields another handle to the same log. Growth is unbounded.
#[derive(Clone, Default)]
pub struct MessageLog {
    entries: Arc<RwLock<Vec<ChatEntry>>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end of the log.
    pub fn append(&self, entry: ChatEntry) {
        self.write().push(entry);
    }

    /// The last `limit` entries, oldest first.
    pub fn recent(&self, limit: usize) -> Vec<ChatEntry> {
        let entries = self.read();
        let start = entries.len().saturating_sub(limit);
        entries[start..].to_vec()
    }

    /// Count unread entries authored by `sender`.
    pub fn count_unread_from(&self, sender: Sender) -> usize {
        self.read()
            .iter()
            .filter(|e| !e.read && e.sender == sender)
            .count()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panic while holding the lock cannot leave a half-pushed Vec, so
    // poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Vec<ChatEntry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<ChatEntry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}
