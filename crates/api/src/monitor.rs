//! Event-to-observer forwarding task.
//!
//! Subscribes to the [`EventBus`](pulseboard_events::EventBus) and fans
//! each [`MonitorEvent`] out to every connected observer through the
//! [`WsManager`]. Keeping this in a dedicated task means the ingestion
//! pipeline publishes and returns without ever touching WebSocket state.

use std::sync::Arc;

use pulseboard_events::MonitorEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Spawn the forwarding loop.
///
/// The task runs until the event bus is dropped (broadcast channel
/// closed), which is the shutdown signal.
pub fn start_monitor_router(
    ws_manager: Arc<WsManager>,
    mut receiver: broadcast::Receiver<MonitorEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let delivered = ws_manager.broadcast(&event).await;
                    tracing::debug!(
                        event_type = %event.event_type,
                        delivered,
                        "Forwarded monitor event"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    // Best-effort delivery: skipped events are not replayed.
                    tracing::warn!(skipped = n, "Monitor router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, monitor router shutting down");
                    break;
                }
            }
        }
    })
}
