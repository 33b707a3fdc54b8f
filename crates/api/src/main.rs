use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulseboard_api::config::ServerConfig;
use pulseboard_api::state::AppState;
use pulseboard_api::{monitor, router, ws};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Arc::new(ServerConfig::from_env());
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let pool = prepare_database(&config).await;

    // Broadcast hub: constructed once here, injected into the connection
    // handler (via state) and the monitor router, torn down at shutdown.
    let ws_manager = Arc::new(ws::WsManager::new());
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    // Event bus links ingestion to the fan-out; dropping the bus is the
    // monitor router's shutdown signal.
    let event_bus = Arc::new(pulseboard_events::EventBus::default());
    let monitor_handle =
        monitor::start_monitor_router(Arc::clone(&ws_manager), event_bus.subscribe());

    let state = AppState {
        pool,
        config: Arc::clone(&config),
        ws_manager: Arc::clone(&ws_manager),
        event_bus: Arc::clone(&event_bus),
    };
    let app = router::build_app_router(state);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server stopped accepting connections, cleaning up");

    // Close the broadcast channel, then wait for the monitor router to
    // drain before cutting off the observers it writes to.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), monitor_handle).await;

    let observers = ws_manager.connection_count().await;
    tracing::info!(observers, "Closing remaining monitoring connections");
    ws_manager.shutdown_all().await;

    heartbeat_handle.abort();
    tracing::info!("Graceful shutdown complete");
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulseboard_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect the pool, verify reachability, and apply pending migrations.
///
/// Startup aborts on any failure; the service must not come up against a
/// database it cannot write segments to.
async fn prepare_database(config: &ServerConfig) -> pulseboard_db::DbPool {
    let pool = pulseboard_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");

    pulseboard_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    pulseboard_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database pool ready, migrations applied");
    pool
}

/// Wait for SIGINT (Ctrl-C) or SIGTERM to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
