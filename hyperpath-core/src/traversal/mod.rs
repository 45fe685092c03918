//! Constrained breadth-first traversal over s-adjacency.
//!
//! The search keeps three implicit states per position: unvisited, queued
//! (already marked visited with a parent pointer), and expanded. Neighbours
//! are expanded in ascending position order so results are deterministic for
//! a fixed store, threshold, and depth bound.

mod path;
mod yen;

#[cfg(test)]
mod tests;

use std::collections::{BTreeSet, HashSet, VecDeque};

use tracing::trace;

pub use self::path::HyperPath;
use crate::{error::Result, hypergraph::Hypergraph, params::TraversalParams};

/// Positions and directed transitions a restricted search may not use.
#[derive(Debug, Default)]
pub(crate) struct Restrictions {
    positions: HashSet<usize>,
    transitions: HashSet<(usize, usize)>,
}

impl Restrictions {
    pub(crate) fn exclude_position(&mut self, position: usize) {
        self.positions.insert(position);
    }

    pub(crate) fn exclude_transition(&mut self, from: usize, to: usize) {
        self.transitions.insert((from, to));
    }
}

/// What a single breadth-first run discovered.
#[derive(Debug)]
pub(crate) struct Frontier {
    pub(crate) reached: BTreeSet<usize>,
    pub(crate) found: Option<Vec<usize>>,
}

/// Runs a breadth-first search from a known `start`.
///
/// When `target` is set the search stops as soon as it is dequeued. Excluded
/// positions are treated as already visited; excluded transitions are skipped
/// only from their source position.
pub(crate) fn breadth_first(
    graph: &Hypergraph,
    start: usize,
    target: Option<usize>,
    params: TraversalParams,
    restrictions: &Restrictions,
) -> Frontier {
    let mut parent: Vec<Option<usize>> = vec![None; graph.len()];
    let mut visited = vec![false; graph.len()];
    for &position in &restrictions.positions {
        if let Some(slot) = visited.get_mut(position) {
            *slot = true;
        }
    }
    if let Some(slot) = visited.get_mut(start) {
        *slot = true;
    }

    let mut reached = BTreeSet::from([start]);
    let mut queue = VecDeque::from([(start, 0_usize)]);
    while let Some((current, depth)) = queue.pop_front() {
        if target == Some(current) {
            record_visited(reached.len());
            return Frontier {
                reached,
                found: Some(unwind(&parent, current)),
            };
        }
        if params.max_depth().is_some_and(|limit| depth >= limit) {
            continue;
        }
        for next in graph.adjacent(current, params.threshold()) {
            if restrictions.transitions.contains(&(current, next)) {
                continue;
            }
            let Some(seen) = visited.get_mut(next) else {
                continue;
            };
            if *seen {
                continue;
            }
            *seen = true;
            if let Some(slot) = parent.get_mut(next) {
                *slot = Some(current);
            }
            reached.insert(next);
            queue.push_back((next, depth + 1));
        }
    }
    trace!(start, visited = reached.len(), "breadth-first search exhausted");
    record_visited(reached.len());
    Frontier {
        reached,
        found: None,
    }
}

#[cfg(feature = "metrics")]
fn record_visited(count: usize) {
    metrics::histogram!("traversal_visited_hyperedges").record(count as f64);
}

#[cfg(not(feature = "metrics"))]
fn record_visited(_count: usize) {}

fn unwind(parent: &[Option<usize>], target: usize) -> Vec<usize> {
    let mut positions = vec![target];
    let mut cursor = target;
    while let Some(previous) = parent.get(cursor).copied().flatten() {
        positions.push(previous);
        cursor = previous;
    }
    positions.reverse();
    positions
}

impl Hypergraph {
    /// Shortest s-path from `start` to `target`, or `None` when the target is
    /// unreachable within the depth bound.
    ///
    /// A query whose start is its target yields the one-hyperedge path.
    ///
    /// # Errors
    /// Returns [`crate::HyperpathError::UnknownPosition`] when either
    /// position is not stored.
    ///
    /// # Examples
    /// ```
    /// use hyperpath_core::{Hyperedge, Hypergraph, TraversalParams};
    ///
    /// let graph = Hypergraph::from_hyperedges([
    ///     Hyperedge::from_entities("h0", ["a", "b", "c"]),
    ///     Hyperedge::from_entities("h1", ["b", "c", "d"]),
    ///     Hyperedge::from_entities("h2", ["c", "d", "e"]),
    /// ])?;
    /// let path = graph
    ///     .shortest_path(0, 2, TraversalParams::unbounded(2)?)?
    ///     .expect("h0 reaches h2 through h1");
    /// assert_eq!(path.positions(), [0, 1, 2]);
    /// # Ok::<(), hyperpath_core::HyperpathError>(())
    /// ```
    pub fn shortest_path(
        &self,
        start: usize,
        target: usize,
        params: TraversalParams,
    ) -> Result<Option<HyperPath>> {
        self.hyperedge(start)?;
        self.hyperedge(target)?;
        let frontier = breadth_first(self, start, Some(target), params, &Restrictions::default());
        Ok(frontier
            .found
            .map(|positions| HyperPath::new_unchecked(positions, params.s())))
    }

    /// Every position reachable from `start` within the depth bound,
    /// including `start` itself.
    ///
    /// # Errors
    /// Returns [`crate::HyperpathError::UnknownPosition`] when `start` is not
    /// stored.
    pub fn reachable_set(&self, start: usize, params: TraversalParams) -> Result<BTreeSet<usize>> {
        self.hyperedge(start)?;
        Ok(breadth_first(self, start, None, params, &Restrictions::default()).reached)
    }
}
