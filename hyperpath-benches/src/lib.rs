//! Benchmark support crate for hyperpath.
//!
//! Provides a seeded synthetic hypergraph generator and parameter types used
//! by the Criterion benchmarks for traversal and structural analysis.

pub mod error;
pub mod params;
pub mod source;
