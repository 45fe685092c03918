//! Type definitions for hypergraph property-based tests.

use test_strategy::Arbitrary;

use crate::Hypergraph;

/// Shape of the generated hypergraph.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum Topology {
    /// Hyperedges draw entities uniformly from a small shared vocabulary.
    #[weight(3)]
    Random,
    /// Sliding windows over an ordered vocabulary, overlapping in long runs.
    #[weight(2)]
    Chain,
    /// Several disjoint vocabularies, each dense internally.
    #[weight(2)]
    Clustered,
    /// A large vocabulary so most hyperedges share little or nothing.
    #[weight(1)]
    Fragmented,
}

/// Generated hypergraph together with the inputs that produced it.
#[derive(Clone, Debug)]
pub(super) struct HypergraphFixture {
    /// The generated store.
    pub graph: Hypergraph,
    /// Topology used during generation.
    pub topology: Topology,
    /// Seed fed to the generator, for reproduction.
    pub seed: u64,
}

/// Query inputs drawn alongside a fixture.
#[derive(Clone, Copy, Debug)]
pub(super) struct PathQuery {
    /// Raw start selector, reduced modulo the store size.
    pub start: usize,
    /// Raw target selector, reduced modulo the store size.
    pub target: usize,
    /// Number of paths requested.
    pub k: usize,
    /// Minimum intersection size.
    pub s: usize,
    /// Depth bound applied to every search.
    pub max_depth: usize,
}
