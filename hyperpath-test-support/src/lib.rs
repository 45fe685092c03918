//! Shared test utilities used across hyperpath crates.

pub mod ci;
pub mod tracing;
