//! CLI command implementations.

pub mod common;
pub mod grover;
pub mod qaoa;
pub mod random;
pub mod version;
