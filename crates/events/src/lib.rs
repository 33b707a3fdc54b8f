//! Pulseboard in-process event infrastructure.
//!
//! Provides the building blocks for live-monitoring fan-out:
//!
//! - [`EventBus`] — publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`MonitorEvent`] — the transient event pushed to connected
//!   monitoring observers.

pub mod bus;

pub use bus::{EventBus, MonitorEvent};
