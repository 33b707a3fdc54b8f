//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] decouples ingestion from the WebSocket layer: the
//! ingestion pipeline publishes a [`MonitorEvent`] and the monitor router
//! task forwards it to every connected observer. It is designed to be
//! shared via `Arc<EventBus>` across the application.

use pulseboard_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// MonitorEvent
// ---------------------------------------------------------------------------

/// A transient live-monitoring event.
///
/// Not persisted; delivery is best-effort, at most once per connected
/// observer. Serializes to the wire shape `{"type": ..., "data": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorEvent {
    /// Event name, e.g. `"segments"`.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Free-form JSON payload carrying event-specific data.
    pub data: serde_json::Value,
}

impl MonitorEvent {
    /// Create a new event with an empty data object.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            data: serde_json::Value::Object(Default::default()),
        }
    }

    /// Event emitted when a user's segment batch finishes ingesting.
    pub fn segments_ingested(user_id: DbId, received: usize) -> Self {
        Self {
            event_type: "segments".to_string(),
            data: serde_json::json!({
                "user_id": user_id,
                "received": received,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`MonitorEvent`].
pub struct EventBus {
    sender: broadcast::Sender<MonitorEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of subscribers the event reached. Zero is not
    /// an error — monitoring is best-effort, and losing events while
    /// nobody watches is the intended behaviour.
    pub fn publish(&self, event: MonitorEvent) -> usize {
        // SendError only means there are zero receivers.
        self.sender.send(event).unwrap_or(0)
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(MonitorEvent::segments_ingested(7, 12));

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, "segments");
        assert_eq!(received.data["user_id"], 7);
        assert_eq!(received.data["received"], 12);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(MonitorEvent::new("multi.test"));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(e1.event_type, "multi.test");
        assert_eq!(e2.event_type, "multi.test");
    }

    #[test]
    fn publish_with_no_subscribers_reaches_zero() {
        let bus = EventBus::default();
        assert_eq!(bus.publish(MonitorEvent::new("orphan.event")), 0);
    }

    #[tokio::test]
    async fn publish_reports_subscriber_count() {
        let bus = EventBus::default();
        let _rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.publish(MonitorEvent::new("counted")), 2);
    }

    #[test]
    fn event_serializes_to_type_and_data_shape() {
        let event = MonitorEvent::segments_ingested(3, 2);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "segments");
        assert_eq!(json["data"]["user_id"], 3);
        assert_eq!(json["data"]["received"], 2);
        assert!(json.get("event_type").is_none());
    }
}
