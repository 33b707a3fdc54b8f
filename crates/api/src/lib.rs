//! Pulseboard API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! ingestion, aggregation, WebSocket infrastructure) so integration tests
//! and the binary entrypoint can both access them.

pub mod aggregation;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod ingest;
pub mod middleware;
pub mod monitor;
pub mod router;
pub mod routes;
pub mod state;
pub mod ws;
