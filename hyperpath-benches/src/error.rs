//! Benchmark setup error type.

use crate::source::SyntheticError;
use hyperpath_core::HyperpathError;

/// Errors that may occur while preparing a benchmark.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic hypergraph generation failed.
    #[error("synthetic hypergraph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// The engine rejected generated data or a query.
    #[error("engine operation failed: {0}")]
    Core(#[from] HyperpathError),
}
