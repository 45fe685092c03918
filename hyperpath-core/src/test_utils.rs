//! Shared test utilities for `hyperpath-core`.

use hyperpath_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{hyperedge::Hyperedge, hypergraph::Hypergraph};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `HYPERPATH_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Four overlapping hyperedges forming a chain at `s = 2`:
/// `h0 = {a, b, c}`, `h1 = {b, c, d}`, `h2 = {c, d, e}`, `h3 = {d, e, f}`.
#[must_use]
pub(crate) fn chain_graph() -> Hypergraph {
    Hypergraph::from_hyperedges([
        Hyperedge::from_entities("h0", ["a", "b", "c"]),
        Hyperedge::from_entities("h1", ["b", "c", "d"]),
        Hyperedge::from_entities("h2", ["c", "d", "e"]),
        Hyperedge::from_entities("h3", ["d", "e", "f"]),
    ])
    .expect("chain fixture is valid")
}

/// Appends `h4 = {x, y, z}`, which shares nothing with the chain.
#[must_use]
pub(crate) fn with_isolated(mut graph: Hypergraph) -> Hypergraph {
    graph
        .add(Hyperedge::from_entities("h4", ["x", "y", "z"]))
        .expect("isolated fixture is valid");
    graph
}
