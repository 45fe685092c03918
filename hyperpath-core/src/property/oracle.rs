//! Brute-force reference implementations.
//!
//! These compare every pair of hyperedges directly instead of going through
//! the entity index, so they share no code with the engine under test.

use std::collections::BTreeSet;

use crate::Hypergraph;

fn shared(graph: &Hypergraph, left: usize, right: usize) -> usize {
    match (graph.get(left), graph.get(right)) {
        (Some(left), Some(right)) => left
            .entities()
            .filter(|&entity| right.entities().any(|other| other == entity))
            .count(),
        _ => 0,
    }
}

/// Neighbours of `position` by pairwise comparison.
pub(super) fn neighbours(graph: &Hypergraph, position: usize, s: usize) -> BTreeSet<usize> {
    (0..graph.len())
        .filter(|&other| other != position && shared(graph, position, other) >= s)
        .collect()
}

/// Every loopless s-path from `start` to `target` of at most `max_depth`
/// hops, in no particular order.
pub(super) fn simple_paths(
    graph: &Hypergraph,
    start: usize,
    target: usize,
    s: usize,
    max_depth: usize,
) -> Vec<Vec<usize>> {
    let mut found = Vec::new();
    let mut path = vec![start];
    extend(graph, target, s, max_depth, &mut path, &mut found);
    found
}

fn extend(
    graph: &Hypergraph,
    target: usize,
    s: usize,
    max_depth: usize,
    path: &mut Vec<usize>,
    found: &mut Vec<Vec<usize>>,
) {
    let Some(&current) = path.last() else {
        return;
    };
    if current == target {
        found.push(path.clone());
        return;
    }
    if path.len() > max_depth {
        return;
    }
    for next in neighbours(graph, current, s) {
        if path.contains(&next) {
            continue;
        }
        path.push(next);
        extend(graph, target, s, max_depth, path, found);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::chain_graph;

    #[test]
    fn oracle_agrees_with_hand_counted_chain() {
        let graph = chain_graph();
        assert_eq!(neighbours(&graph, 1, 1), BTreeSet::from([0, 2, 3]));
        assert_eq!(neighbours(&graph, 1, 2), BTreeSet::from([0, 2]));
        let mut paths = simple_paths(&graph, 0, 3, 1, 3);
        paths.sort();
        assert_eq!(
            paths,
            vec![vec![0, 1, 2, 3], vec![0, 1, 3], vec![0, 2, 1, 3], vec![0, 2, 3]]
        );
        assert_eq!(simple_paths(&graph, 0, 3, 1, 1), Vec::<Vec<usize>>::new());
    }
}
