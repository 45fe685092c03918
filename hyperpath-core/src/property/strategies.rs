//! Strategy builders for hypergraph property-based tests.
//!
//! Generators keep stores small (at most a dozen hyperedges) so the
//! brute-force oracles stay cheap, while the topologies still cover dense
//! overlap, long chains, disjoint clusters, and mostly isolated records.

use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::index::sample};

use crate::{Hyperedge, Hypergraph};

use super::types::{HypergraphFixture, PathQuery, Topology};

const MIN_HYPEREDGES: usize = 2;
const MAX_HYPEREDGES: usize = 12;

/// Generates fixtures across every [`Topology`].
pub(super) fn fixture_strategy() -> impl Strategy<Value = HypergraphFixture> {
    (any::<Topology>(), any::<u64>())
        .prop_map(|(topology, seed)| generate_fixture(topology, seed))
}

/// Generates path queries whose selectors are reduced against the store.
pub(super) fn query_strategy() -> impl Strategy<Value = PathQuery> {
    (any::<usize>(), any::<usize>(), 1_usize..=6, 1_usize..=3, 0_usize..=3).prop_map(
        |(start, target, k, s, max_depth)| PathQuery {
            start,
            target,
            k,
            s,
            max_depth,
        },
    )
}

/// Builds the fixture for `topology` deterministically from `seed`.
pub(super) fn generate_fixture(topology: Topology, seed: u64) -> HypergraphFixture {
    let mut rng = SmallRng::seed_from_u64(seed);
    let hyperedges = match topology {
        Topology::Random => generate_random(&mut rng, 6),
        Topology::Chain => generate_chain(&mut rng),
        Topology::Clustered => generate_clustered(&mut rng),
        Topology::Fragmented => generate_random(&mut rng, 40),
    };
    let graph = Hypergraph::from_hyperedges(hyperedges)
        .expect("generated hyperedges have unique ids and at least two entities");
    HypergraphFixture {
        graph,
        topology,
        seed,
    }
}

fn entity(label: &str, index: usize) -> String {
    format!("{label}{index}")
}

fn random_hyperedge(rng: &mut SmallRng, id: String, label: &str, vocabulary: usize) -> Hyperedge {
    let cardinality = rng.gen_range(2..=4_usize.min(vocabulary));
    let members = sample(rng, vocabulary, cardinality);
    Hyperedge::from_entities(id, members.into_iter().map(|index| entity(label, index)))
}

fn generate_random(rng: &mut SmallRng, base_vocabulary: usize) -> Vec<Hyperedge> {
    let count = rng.gen_range(MIN_HYPEREDGES..=MAX_HYPEREDGES);
    let vocabulary = rng.gen_range(base_vocabulary..=base_vocabulary * 2);
    (0..count)
        .map(|n| random_hyperedge(rng, format!("r{n}"), "e", vocabulary))
        .collect()
}

fn generate_chain(rng: &mut SmallRng) -> Vec<Hyperedge> {
    let count = rng.gen_range(MIN_HYPEREDGES..=MAX_HYPEREDGES);
    let width = rng.gen_range(2..=4_usize);
    (0..count)
        .map(|n| {
            let members = (n..n + width).map(|index| entity("e", index));
            Hyperedge::from_entities(format!("c{n}"), members)
        })
        .collect()
}

fn generate_clustered(rng: &mut SmallRng) -> Vec<Hyperedge> {
    let clusters = rng.gen_range(2..=3_usize);
    let mut hyperedges = Vec::new();
    for cluster in 0..clusters {
        let members = rng.gen_range(1..=4_usize);
        let label = format!("k{cluster}_");
        for n in 0..members {
            hyperedges.push(random_hyperedge(rng, format!("k{cluster}-{n}"), &label, 5));
        }
    }
    hyperedges
}
