//! Benchmark parameter types, rendered as Criterion benchmark ids.

use std::fmt;

/// Parameters for a path or component benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct TraversalBenchParams {
    /// Number of hyperedges in the synthetic store.
    pub hyperedge_count: usize,
    /// Minimum overlap between consecutive hyperedges.
    pub s: usize,
}

impl fmt::Display for TraversalBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},s={}", self.hyperedge_count, self.s)
    }
}

/// Parameters for a K-shortest-paths benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct KPathsBenchParams {
    /// Number of hyperedges in the synthetic store.
    pub hyperedge_count: usize,
    /// Number of paths requested.
    pub k: usize,
}

impl fmt::Display for KPathsBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.hyperedge_count, self.k)
    }
}
