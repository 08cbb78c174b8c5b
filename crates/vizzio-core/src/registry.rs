//! Registry of open duplex connections.
//!
//! Each connection is represented by an outbound queue. The transport side
//! (a WebSocket writer task) drains the receiving half; once that task is gone
//! the queue is closed and the next broadcast prunes the connection.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

/// Outbound queue handed to the transport for one connection.
pub type Outbound = mpsc::UnboundedReceiver<String>;

/// Identifier of a registered connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Set of currently open connections.
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    connections: Arc<Mutex<HashMap<ConnectionId, mpsc::UnboundedSender<String>>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection and return its id and outbound queue.
    pub fn register(&self) -> (ConnectionId, Outbound) {
        let id = ConnectionId(Uuid::new_v4());
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().insert(id, tx);
        (id, rx)
    }

    /// Remove a connection. Removing an unknown id is a no-op.
    ///
    /// Returns whether the connection was still registered.
    pub fn unregister(&self, id: ConnectionId) -> bool {
        self.lock().remove(&id).is_some()
    }

    /// Unregisters `id` when the returned guard is dropped.
    pub fn guard(&self, id: ConnectionId) -> ConnectionGuard {
        ConnectionGuard {
            id,
            registry: self.clone(),
        }
    }

    /// Send `payload` to every registered connection.
    ///
    /// Connections whose queue is closed are removed in the same pass.
    /// Returns the number of connections the payload reached.
    pub fn broadcast(&self, payload: &str) -> usize {
        let mut connections = self.lock();
        let before = connections.len();
        connections.retain(|id, tx| match tx.send(payload.to_string()) {
            Ok(()) => true,
            Err(_) => {
                debug!(connection = %id, "Pruning dead connection");
                false
            }
        });
        let delivered = connections.len();
        if delivered < before {
            debug!(pruned = before - delivered, remaining = delivered, "Broadcast pruned connections");
        }
        delivered
    }

    /// Drop every outbound queue so the transports close their sockets.
    pub fn close_all(&self) -> usize {
        let mut connections = self.lock();
        let count = connections.len();
        connections.clear();
        count
    }

    #[cfg(test)]
    fn contains(&self, id: ConnectionId) -> bool {
        self.lock().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ConnectionId, mpsc::UnboundedSender<String>>> {
        self.connections.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Unregisters its connection exactly once, when dropped.
pub struct ConnectionGuard {
    id: ConnectionId,
    registry: ConnectionRegistry,
}

impl ConnectionGuard {
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.registry.unregister(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_reaches_every_connection() {
        let registry = ConnectionRegistry::new();
        let (_a, mut rx_a) = registry.register();
        let (_b, mut rx_b) = registry.register();

        assert_eq!(registry.broadcast("ping"), 2);
        assert_eq!(rx_a.try_recv().unwrap(), "ping");
        assert_eq!(rx_b.try_recv().unwrap(), "ping");
    }

    #[test]
    fn test_broadcast_prunes_only_dead_connections() {
        let registry = ConnectionRegistry::new();
        let (alive, mut rx_alive) = registry.register();
        let (dead, rx_dead) = registry.register();
        let (other, mut rx_other) = registry.register();
        drop(rx_dead);

        assert_eq!(registry.broadcast("hello"), 2);
        assert!(registry.contains(alive));
        assert!(registry.contains(other));
        assert!(!registry.contains(dead));
        assert_eq!(rx_alive.try_recv().unwrap(), "hello");
        assert_eq!(rx_other.try_recv().unwrap(), "hello");
    }

    #[test]
    fn test_broadcast_on_empty_registry() {
        let registry = ConnectionRegistry::new();
        assert_eq!(registry.broadcast("nobody"), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unregister_is_idempotent() {
        let registry = ConnectionRegistry::new();
        let (id, _rx) = registry.register();
        assert!(registry.unregister(id));
        assert!(!registry.unregister(id));

        let other = ConnectionRegistry::new();
        let (stranger, _rx2) = other.register();
        assert!(!registry.unregister(stranger));
    }

    #[test]
    fn test_guard_unregisters_on_drop() {
        let registry = ConnectionRegistry::new();
        let (id, _rx) = registry.register();
        let guard = registry.guard(id);
        assert_eq!(guard.id(), id);
        assert_eq!(registry.len(), 1);
        drop(guard);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_guard_after_prune_is_noop() {
        let registry = ConnectionRegistry::new();
        let (id, rx) = registry.register();
        let guard = registry.guard(id);
        drop(rx);
        registry.broadcast("x");
        assert!(registry.is_empty());
        drop(guard);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_close_all_closes_queues() {
        let registry = ConnectionRegistry::new();
        let (_id, mut rx) = registry.register();
        assert_eq!(registry.close_all(), 1);
        assert!(registry.is_empty());
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }
}
