//! Structural properties: index agreement, neighbour symmetry, component
//! partition and monotonicity, and the reachable-set round trip.

use std::collections::BTreeSet;

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::TraversalParams;

use super::{oracle, types::HypergraphFixture};

const THRESHOLDS: [usize; 3] = [1, 2, 3];

fn fail(fixture: &HypergraphFixture, message: String) -> TestCaseError {
    TestCaseError::fail(format!(
        "{message} (topology={:?}, seed={}, hyperedges={})",
        fixture.topology,
        fixture.seed,
        fixture.graph.len()
    ))
}

/// Index-driven neighbours match the pairwise oracle, exclude the queried
/// hyperedge, and are symmetric.
pub(super) fn run_neighbour_property(fixture: &HypergraphFixture) -> TestCaseResult {
    let graph = &fixture.graph;
    for s in THRESHOLDS {
        for position in 0..graph.len() {
            let neighbours = graph
                .neighbours(position, s)
                .map_err(|err| fail(fixture, format!("neighbours({position}, {s}) failed: {err}")))?;
            if neighbours != oracle::neighbours(graph, position, s) {
                return Err(fail(fixture, format!("neighbours({position}, {s}) disagree with oracle")));
            }
            if neighbours.contains(&position) {
                return Err(fail(fixture, format!("{position} lists itself at s = {s}")));
            }
            for &other in &neighbours {
                let back = graph
                    .neighbours(other, s)
                    .map_err(|err| fail(fixture, format!("neighbours({other}, {s}) failed: {err}")))?;
                if !back.contains(&position) {
                    return Err(fail(fixture, format!("{position} -> {other} is not symmetric at s = {s}")));
                }
            }
        }
    }
    Ok(())
}

/// Components partition the store, are closed under adjacency, refine as `s`
/// grows, and coincide with unbounded reachable sets.
pub(super) fn run_component_property(fixture: &HypergraphFixture) -> TestCaseResult {
    let graph = &fixture.graph;
    let mut coarser: Option<Vec<BTreeSet<usize>>> = None;
    for s in THRESHOLDS {
        let components = graph
            .connected_components(s)
            .map_err(|err| fail(fixture, format!("components at s = {s} failed: {err}")))?;

        let mut owner = vec![None; graph.len()];
        for (label, component) in components.iter().enumerate() {
            for &member in component {
                let Some(slot) = owner.get_mut(member) else {
                    return Err(fail(fixture, format!("{member} is out of range")));
                };
                if slot.replace(label).is_some() {
                    return Err(fail(fixture, format!("{member} claimed twice at s = {s}")));
                }
            }
        }
        if owner.iter().any(Option::is_none) {
            return Err(fail(fixture, format!("components at s = {s} miss a hyperedge")));
        }

        let sizes: Vec<usize> = components.iter().map(BTreeSet::len).collect();
        if sizes.windows(2).any(|pair| pair.first() < pair.get(1)) {
            return Err(fail(fixture, format!("components at s = {s} are not sorted by size")));
        }

        let params = TraversalParams::unbounded(s)
            .map_err(|err| fail(fixture, format!("params rejected: {err}")))?;
        for component in &components {
            let Some(&start) = component.first() else {
                return Err(fail(fixture, format!("empty component at s = {s}")));
            };
            let reached = graph
                .reachable_set(start, params)
                .map_err(|err| fail(fixture, format!("reachable_set({start}) failed: {err}")))?;
            if &reached != component {
                return Err(fail(fixture, format!("reachable set of {start} differs from its component")));
            }
        }

        if let Some(previous) = &coarser {
            for component in &components {
                if !previous.iter().any(|parent| component.is_subset(parent)) {
                    return Err(fail(
                        fixture,
                        format!("component {component:?} at s = {s} is not nested in s - 1"),
                    ));
                }
            }
        }
        coarser = Some(components);
    }
    Ok(())
}
