//! Request extractors for authentication, role checks, and body parsing.

pub mod auth;
pub mod json;
pub mod rbac;

pub use auth::AuthUser;
pub use json::BodyJson;
pub use rbac::RequireAdmin;
