//! Authentication primitives: JWT claims, generation, validation.

pub mod jwt;
