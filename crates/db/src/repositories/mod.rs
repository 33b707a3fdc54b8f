//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod aggregation_repo;
pub mod audit_repo;
pub mod segment_repo;
pub mod user_repo;

pub use aggregation_repo::AggregationRepo;
pub use audit_repo::AuditRepo;
pub use segment_repo::SegmentRepo;
pub use user_repo::UserRepo;
