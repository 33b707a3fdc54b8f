//! HTTP handlers, grouped by resource.

pub mod agent;
pub mod aggregation;
pub mod segment;
