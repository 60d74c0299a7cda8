//! Token primitives: secure random strings and constant-time comparison.

pub mod compare;
pub mod random;
