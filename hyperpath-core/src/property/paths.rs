//! Path properties checked against brute-force enumeration.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{HyperPath, PathParams, TraversalParams};

use super::{
    oracle,
    types::{HypergraphFixture, PathQuery},
};

fn fail(fixture: &HypergraphFixture, query: &PathQuery, message: String) -> TestCaseError {
    TestCaseError::fail(format!(
        "{message} (topology={:?}, seed={}, query={query:?})",
        fixture.topology, fixture.seed
    ))
}

/// Shortest and K-shortest results are valid s-paths whose lengths match
/// the shortest lengths among every loopless path within the depth bound.
pub(super) fn run_path_property(fixture: &HypergraphFixture, query: &PathQuery) -> TestCaseResult {
    let graph = &fixture.graph;
    if graph.is_empty() {
        return Ok(());
    }
    let start = query.start % graph.len();
    let target = query.target % graph.len();

    let mut expected = oracle::simple_paths(graph, start, target, query.s, query.max_depth);
    expected.sort_by(|left, right| left.len().cmp(&right.len()).then_with(|| left.cmp(right)));

    let traversal = TraversalParams::new(query.s, Some(query.max_depth))
        .map_err(|err| fail(fixture, query, format!("params rejected: {err}")))?;
    let shortest = graph
        .shortest_path(start, target, traversal)
        .map_err(|err| fail(fixture, query, format!("shortest_path failed: {err}")))?;
    match (&shortest, expected.first()) {
        (None, None) => {}
        (Some(path), Some(best)) if path.len() == best.len() => {}
        _ => {
            return Err(fail(
                fixture,
                query,
                format!("shortest path {shortest:?} disagrees with oracle {:?}", expected.first()),
            ));
        }
    }

    let params = PathParams::new(query.k, query.s, Some(query.max_depth))
        .map_err(|err| fail(fixture, query, format!("params rejected: {err}")))?;
    let paths = graph
        .k_shortest_paths(start, target, params)
        .map_err(|err| fail(fixture, query, format!("k_shortest_paths failed: {err}")))?;

    check_paths(fixture, query, &paths, start, target)?;

    let returned: Vec<usize> = paths.iter().map(HyperPath::len).collect();
    let wanted: Vec<usize> = expected.iter().take(query.k).map(Vec::len).collect();
    if returned != wanted {
        return Err(fail(
            fixture,
            query,
            format!("path lengths {returned:?} differ from the {} shortest {wanted:?}", query.k),
        ));
    }
    Ok(())
}

fn check_paths(
    fixture: &HypergraphFixture,
    query: &PathQuery,
    paths: &[HyperPath],
    start: usize,
    target: usize,
) -> TestCaseResult {
    if paths.len() > query.k {
        return Err(fail(fixture, query, format!("{} paths exceed k", paths.len())));
    }
    for path in paths {
        if !path.is_valid_in(&fixture.graph) {
            return Err(fail(fixture, query, format!("{path:?} is not an s-path")));
        }
        if path.start() != Some(start) || path.target() != Some(target) {
            return Err(fail(fixture, query, format!("{path:?} has the wrong endpoints")));
        }
        if path.hops() > query.max_depth {
            return Err(fail(fixture, query, format!("{path:?} exceeds the depth bound")));
        }
    }
    if paths.windows(2).any(|pair| pair.first() >= pair.get(1)) {
        return Err(fail(fixture, query, "paths are not strictly ordered".to_owned()));
    }
    Ok(())
}
