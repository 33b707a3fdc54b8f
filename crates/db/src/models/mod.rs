//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the writes this subsystem accepts

pub mod aggregation;
pub mod audit;
pub mod segment;
pub mod user;
