use std::sync::Arc;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pulseboard_db::DbPool,
    /// Server configuration (accessed by auth extractors and handlers).
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (live-monitoring observers).
    pub ws_manager: Arc<WsManager>,
    /// Event bus linking ingestion to the monitoring fan-out.
    pub event_bus: Arc<pulseboard_events::EventBus>,
}
