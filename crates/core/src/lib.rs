//! Pulseboard core domain logic.
//!
//! This crate has no internal dependencies so it can be used by the data
//! layer, the API server, and any future worker or CLI tooling. It contains:
//!
//! - [`types`] — shared id/time aliases and the segment kind enum.
//! - [`error`] — the domain error taxonomy ([`error::CoreError`]).
//! - [`privacy`] — window-title redaction applied before persistence.
//! - [`rollup`] — the pure per-(user, date) daily rollup computation.
//! - [`audit`] — audit action-type constants for privileged reads.

pub mod audit;
pub mod error;
pub mod privacy;
pub mod rollup;
pub mod types;
