use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use pulseboard_core::types::{DbId, Timestamp};
use pulseboard_events::MonitorEvent;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single observer connection.
pub struct WsConnection {
    /// Authenticated admin user behind this connection.
    pub user_id: DbId,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Manages the live set of connected monitoring observers.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared between the connection handler and the monitor router task.
/// Constructed once at service start, torn down via [`shutdown_all`]
/// (`WsManager::shutdown_all`) at service shutdown.
///
/// Each observer owns an independent unbounded channel drained by a
/// dedicated sender task, so a slow or dead observer never delays
/// delivery to the others.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new observer connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(
        &self,
        conn_id: String,
        user_id: DbId,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            user_id,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection by its ID, releasing its channel.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Fan out one event to every currently registered observer.
    ///
    /// The event is serialized once; each delivery is an independent
    /// non-blocking send into that observer's channel. Observers whose
    /// channels are closed are unregistered after the snapshot is
    /// released, so one dead observer costs exactly one unregistration
    /// and never blocks or fails delivery to the rest.
    ///
    /// Returns the number of observers the event was delivered to.
    pub async fn broadcast(&self, event: &MonitorEvent) -> usize {
        let payload = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, event_type = %event.event_type, "Failed to serialize monitor event");
                return 0;
            }
        };
        let message = Message::Text(payload.into());

        let mut delivered = 0;
        let mut dead: Vec<String> = Vec::new();
        {
            let conns = self.connections.read().await;
            for (conn_id, conn) in conns.iter() {
                if conn.sender.send(message.clone()).is_ok() {
                    delivered += 1;
                } else {
                    dead.push(conn_id.clone());
                }
            }
        }

        // Deferred cleanup: the read lock is released before unregistering
        // failed observers, so broadcast never blocks on hub mutation.
        for conn_id in dead {
            tracing::debug!(conn_id = %conn_id, "Unregistering dead observer after failed send");
            self.remove(&conn_id).await;
        }

        delivered
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all observers before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all monitoring connections");
    }

    /// Send a Ping frame to every connected observer.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
