use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use pulseboard_core::error::CoreError;
use pulseboard_core::types::roles::ROLE_ADMIN;
use pulseboard_core::types::DbId;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::ws::manager::WsManager;

/// Query parameters for the monitoring WebSocket upgrade.
///
/// Browsers cannot set an `Authorization` header on a WebSocket upgrade,
/// so the token travels as a query parameter and is validated before the
/// upgrade completes.
#[derive(Debug, Deserialize)]
pub struct MonitorQuery {
    pub token: String,
}

/// GET /api/v1/ws/monitor?token=...
///
/// Authenticates the token, requires the monitoring (admin) role, then
/// upgrades the connection and registers it with the [`WsManager`].
pub async fn monitor_ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<MonitorQuery>,
    State(state): State<AppState>,
) -> AppResult<Response> {
    let claims = state
        .config
        .jwt
        .verify(&query.token)
        .map_err(|_| AppError::Core(CoreError::Unauthorized("Invalid or expired token".into())))?;

    if claims.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Monitoring role required".into(),
        )));
    }

    let user_id = claims.sub;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager, user_id)))
}

/// Manage a single observer connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that drains this observer's channel.
///   3. Reads inbound frames only to detect liveness (the client is not
///      expected to send anything beyond keep-alives).
///   4. Cleans up on disconnect: unregisters and stops the sender task.
async fn handle_socket(socket: WebSocket, ws_manager: Arc<WsManager>, user_id: DbId) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id, "Monitoring observer connected");

    // Register and get the receiver for outbound messages.
    let mut rx = ws_manager.add(conn_id.clone(), user_id).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "Observer sink closed");
                break;
            }
        }
    });

    // Receiver loop: blocks until peer input or disconnect.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_msg) => {
                // Keep-alive / no-op traffic; nothing to dispatch.
            }
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "Observer receive error");
                break;
            }
        }
    }

    // Clean up: unregister and stop the sender task.
    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, user_id, "Monitoring observer disconnected");
}
